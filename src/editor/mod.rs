//! Image editing engine: the live image, its file path, and the undo/redo log.

mod builtin_font;
pub mod filter;
pub mod history;
pub mod text;

use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

use crate::geometry::{Color, TextPosition};
use crate::storage::{self, CodecError};

pub use filter::{FilterKind, BLUR_INTENSITY_DEFAULT, BLUR_INTENSITY_RANGE};
pub use history::{EditHistory, DEFAULT_HISTORY_CAPACITY};
pub use text::{
    FontResolver, TextFont, TextOptions, DEFAULT_FONT_FACE, TEXT_SIZE_DEFAULT, TEXT_SIZE_RANGE,
};

const RESIZE_FILTER: FilterType = FilterType::CatmullRom;

#[derive(Debug, Error)]
pub enum EditorError {
    #[error("failed to open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: CodecError,
    },

    #[error("failed to save {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
}

pub type EditorResult<T> = std::result::Result<T, EditorError>;

/// Why a mutating operation left the image and history untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoImage,
    InvalidDimensions,
    UnknownFilter,
    InvalidIntensity,
    EmptyText,
}

impl SkipReason {
    pub const fn message(self) -> &'static str {
        match self {
            Self::NoImage => "no image loaded",
            Self::InvalidDimensions => "dimensions must be positive",
            Self::UnknownFilter => "unrecognized filter name",
            Self::InvalidIntensity => "blur intensity must be positive",
            Self::EmptyText => "text is empty",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Applied,
    Skipped(SkipReason),
}

impl EditOutcome {
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Engine-facing subset of the application config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub history_capacity: usize,
    pub text_font: String,
    pub font_dirs: Vec<PathBuf>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            text_font: DEFAULT_FONT_FACE.to_string(),
            font_dirs: Vec::new(),
        }
    }
}

/// Display-ready RGBA copy of the live image. Never aliases engine storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSnapshot {
    image: RgbaImage,
}

impl RenderSnapshot {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba8(&self) -> &RgbaImage {
        &self.image
    }

    /// Tightly packed RGBA rows, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub fn into_rgba8(self) -> RgbaImage {
        self.image
    }
}

#[derive(Debug)]
pub struct ImageEditor {
    image: Option<DynamicImage>,
    path: Option<PathBuf>,
    history: EditHistory<DynamicImage>,
    fonts: FontResolver,
    font: Option<TextFont>,
}

impl ImageEditor {
    pub fn new() -> Self {
        Self::with_settings(&EditorSettings::default())
    }

    pub fn with_settings(settings: &EditorSettings) -> Self {
        Self {
            image: None,
            path: None,
            history: EditHistory::new(settings.history_capacity),
            fonts: FontResolver::new(settings.text_font.clone(), &settings.font_dirs),
            font: None,
        }
    }

    /// Replaces the font lookup used by [`Self::draw_text`].
    pub fn with_font_resolver(mut self, fonts: FontResolver) -> Self {
        self.fonts = fonts;
        self.font = None;
        self
    }

    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Read-only view of the live image.
    pub fn image(&self) -> Option<&DynamicImage> {
        self.image.as_ref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.image
            .as_ref()
            .map(|image| (image.width(), image.height()))
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    pub fn history_index(&self) -> Option<usize> {
        self.history.index()
    }

    pub fn history_capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Loads `path` as the new live image and restarts history from it.
    /// On failure the current image, path and history are kept.
    pub fn open(&mut self, path: impl AsRef<Path>) -> EditorResult<()> {
        let path = path.as_ref();
        let image = storage::decode_image(path).map_err(|source| EditorError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::info!(
            path = %path.display(),
            width = image.width(),
            height = image.height(),
            color = ?image.color(),
            "opened image"
        );
        self.history.reset(image.clone());
        self.image = Some(image);
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Writes the live image to `path`, or to the path it was opened from.
    /// Returns the written path, or `None` when no image is loaded.
    pub fn save(&self, path: Option<&Path>) -> EditorResult<Option<PathBuf>> {
        let Some(image) = self.image.as_ref() else {
            tracing::debug!("save skipped: no image loaded");
            return Ok(None);
        };
        let Some(target) = path.or(self.path.as_deref()) else {
            return Ok(None);
        };

        storage::encode_image(image, target).map_err(|source| EditorError::Save {
            path: target.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %target.display(), "saved image");
        Ok(Some(target.to_path_buf()))
    }

    pub fn resize(&mut self, width: i32, height: i32) -> EditOutcome {
        let Some(image) = self.image.as_ref() else {
            return skipped("resize", SkipReason::NoImage);
        };
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return skipped("resize", SkipReason::InvalidDimensions);
        };
        if width == 0 || height == 0 {
            return skipped("resize", SkipReason::InvalidDimensions);
        }

        let resized = image.resize_exact(width, height, RESIZE_FILTER);
        tracing::debug!(width, height, "resized image");
        self.commit(resized)
    }

    /// Applies a named filter; names match [`FilterKind`] case-insensitively.
    pub fn apply_filter(&mut self, name: &str) -> EditOutcome {
        if self.image.is_none() {
            return skipped("filter", SkipReason::NoImage);
        }
        match FilterKind::from_name(name) {
            Some(kind) => self.apply_filter_kind(kind),
            None => {
                tracing::debug!(name, "ignoring unknown filter");
                EditOutcome::Skipped(SkipReason::UnknownFilter)
            }
        }
    }

    pub fn apply_filter_kind(&mut self, kind: FilterKind) -> EditOutcome {
        let Some(image) = self.image.as_ref() else {
            return skipped("filter", SkipReason::NoImage);
        };

        let filtered = kind.apply(image);
        tracing::debug!(filter = kind.name(), "applied filter");
        self.commit(filtered)
    }

    /// Gaussian blur with radius `intensity`, clamped to [`BLUR_INTENSITY_RANGE`].
    pub fn apply_blur(&mut self, intensity: u32) -> EditOutcome {
        let Some(image) = self.image.as_ref() else {
            return skipped("blur", SkipReason::NoImage);
        };
        let Some(radius) = filter::clamp_blur_intensity(intensity) else {
            return skipped("blur", SkipReason::InvalidIntensity);
        };

        let blurred = image.blur(radius as f32);
        tracing::debug!(requested = intensity, radius, "applied blur");
        self.commit(blurred)
    }

    /// Draws `text` in place on the live image, then records the result.
    pub fn draw_text(
        &mut self,
        text: &str,
        position: TextPosition,
        font_size: u16,
        color: Color,
    ) -> EditOutcome {
        let Some(image) = self.image.as_mut() else {
            return skipped("text", SkipReason::NoImage);
        };
        if text.is_empty() {
            return skipped("text", SkipReason::EmptyText);
        }

        let fonts = &self.fonts;
        let font = self.font.get_or_insert_with(|| fonts.resolve());
        let options = TextOptions::new(font_size, color);
        font.draw(image, text, position, options);
        tracing::debug!(
            x = position.x,
            y = position.y,
            size = options.size,
            builtin_font = font.is_builtin(),
            "drew text"
        );

        let snapshot = image.clone();
        self.history.push(snapshot);
        EditOutcome::Applied
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.image = Some(snapshot);
                tracing::debug!(index = ?self.history.index(), "undo applied");
                true
            }
            None => {
                tracing::debug!("undo stack empty");
                false
            }
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.image = Some(snapshot);
                tracing::debug!(index = ?self.history.index(), "redo applied");
                true
            }
            None => {
                tracing::debug!("redo stack empty");
                false
            }
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn render_snapshot(&self) -> Option<RenderSnapshot> {
        self.image.as_ref().map(|image| RenderSnapshot {
            image: image.to_rgba8(),
        })
    }

    fn commit(&mut self, image: DynamicImage) -> EditOutcome {
        self.history.push(image.clone());
        self.image = Some(image);
        EditOutcome::Applied
    }
}

impl Default for ImageEditor {
    fn default() -> Self {
        Self::new()
    }
}

fn skipped(operation: &'static str, reason: SkipReason) -> EditOutcome {
    tracing::debug!(operation, reason = reason.message(), "edit skipped");
    EditOutcome::Skipped(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba};
    use std::fs;

    fn fixture_root() -> PathBuf {
        let mut path = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::SystemTime::UNIX_EPOCH)
            .map_or(0, |d| d.as_nanos());
        let pid = std::process::id();
        path.push(format!("imagedit-editor-{pid}-{nanos}"));
        path
    }

    fn with_temp_root<F: FnOnce(&Path)>(f: F) {
        let root = fixture_root();
        fs::create_dir_all(&root).unwrap();
        f(&root);
        let _ = fs::remove_dir_all(&root);
    }

    fn checkerboard(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            if (x / 4 + y / 4) % 2 == 0 {
                Rgba([240, 240, 240, 255])
            } else {
                Rgba([20, 40, 160, 255])
            }
        })
    }

    fn builtin_only() -> FontResolver {
        FontResolver::with_search_dirs("no-such-face-for-tests.ttf", Vec::new())
    }

    fn editor_with_image(root: &Path) -> (ImageEditor, PathBuf) {
        let path = root.join("source.png");
        checkerboard(32, 24).save(&path).expect("fixture should be written");
        let mut editor = ImageEditor::new().with_font_resolver(builtin_only());
        editor.open(&path).expect("fixture should open");
        (editor, path)
    }

    fn pixels(editor: &ImageEditor) -> RgbaImage {
        editor
            .render_snapshot()
            .expect("image should be loaded")
            .into_rgba8()
    }

    #[test]
    fn empty_editor_has_nothing_to_undo_or_render() {
        let mut editor = ImageEditor::new();
        assert!(!editor.has_image());
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert!(!editor.can_undo());
        assert!(!editor.can_redo());
        assert!(editor.render_snapshot().is_none());
        assert_eq!(editor.history_index(), None);
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn operations_without_image_are_silent_no_ops() {
        let mut editor = ImageEditor::new().with_font_resolver(builtin_only());
        let skipped = EditOutcome::Skipped(SkipReason::NoImage);

        assert_eq!(editor.resize(10, 10), skipped);
        assert_eq!(editor.apply_filter("sharpen"), skipped);
        assert_eq!(editor.apply_blur(3), skipped);
        assert_eq!(
            editor.draw_text("hi", TextPosition::new(0, 0), 12, Color::BLACK),
            skipped
        );
        assert_eq!(editor.save(None).expect("save without image is a no-op"), None);
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn open_sets_path_and_undo_floor() {
        with_temp_root(|root| {
            let (editor, path) = editor_with_image(root);
            assert_eq!(editor.current_path(), Some(path.as_path()));
            assert_eq!(editor.dimensions(), Some((32, 24)));
            assert_eq!(editor.history_len(), 1);
            assert_eq!(editor.history_index(), Some(0));
            assert!(!editor.can_undo());
            assert!(!editor.can_redo());
        });
    }

    #[test]
    fn open_failure_keeps_previous_state() {
        with_temp_root(|root| {
            let (mut editor, path) = editor_with_image(root);
            editor.resize(16, 12);

            let bad = root.join("broken.png");
            fs::write(&bad, b"not an image").unwrap();
            let err = editor.open(&bad).unwrap_err();
            assert!(matches!(err, EditorError::Open { .. }));

            let missing = editor.open(root.join("missing.png")).unwrap_err();
            assert!(matches!(
                missing,
                EditorError::Open {
                    source: CodecError::Io(_),
                    ..
                }
            ));

            assert_eq!(editor.current_path(), Some(path.as_path()));
            assert_eq!(editor.dimensions(), Some((16, 12)));
            assert_eq!(editor.history_len(), 2);
        });
    }

    #[test]
    fn reopening_resets_history() {
        with_temp_root(|root| {
            let (mut editor, path) = editor_with_image(root);
            editor.resize(8, 8);
            editor.apply_blur(2);
            assert_eq!(editor.history_len(), 3);

            editor.open(&path).expect("reopen should succeed");
            assert_eq!(editor.history_len(), 1);
            assert_eq!(editor.dimensions(), Some((32, 24)));
            assert!(!editor.can_undo());
        });
    }

    #[test]
    fn n_successful_edits_produce_n_plus_one_snapshots() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            let outcomes = [
                editor.resize(30, 20),
                editor.apply_filter("detail"),
                editor.apply_blur(1),
                editor.draw_text("ok", TextPosition::new(1, 1), 8, Color::BLACK),
                editor.apply_filter("Contour"),
            ];
            assert!(outcomes.iter().all(|outcome| outcome.is_applied()));
            assert_eq!(editor.history_len(), outcomes.len() + 1);
            assert_eq!(editor.history_index(), Some(outcomes.len()));
        });
    }

    #[test]
    fn undo_then_redo_restores_identical_pixels_for_every_operation() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            let operations: [fn(&mut ImageEditor) -> EditOutcome; 4] = [
                |editor| editor.resize(20, 40),
                |editor| editor.apply_filter("sharpen"),
                |editor| editor.apply_blur(4),
                |editor| {
                    editor.draw_text("Abc", TextPosition::new(2, 3), 16, Color::rgb(255, 0, 0))
                }
            ];

            for operation in operations {
                let before = pixels(&editor);
                assert!(operation(&mut editor).is_applied());
                let after = pixels(&editor);
                assert_ne!(after, before);

                assert!(editor.undo());
                assert_eq!(pixels(&editor), before);
                assert!(editor.redo());
                assert_eq!(pixels(&editor), after);
            }
        });
    }

    #[test]
    fn new_edit_after_undo_discards_redo() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            editor.resize(20, 20);
            editor.resize(10, 10);
            assert!(editor.undo());
            assert!(editor.can_redo());

            assert!(editor.apply_blur(3).is_applied());
            assert!(!editor.can_redo());
            assert!(!editor.redo());
            assert_eq!(editor.history_len(), 3);
            assert_eq!(editor.dimensions(), Some((20, 20)));
        });
    }

    #[test]
    fn history_is_capped_and_undo_bottoms_out_at_oldest_retained() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            for step in 1..=25 {
                assert!(editor.resize(step, step).is_applied());
            }
            assert_eq!(editor.history_len(), DEFAULT_HISTORY_CAPACITY);
            assert_eq!(editor.history_index(), Some(DEFAULT_HISTORY_CAPACITY - 1));

            let mut undos = 0;
            while editor.undo() {
                undos += 1;
            }
            assert_eq!(undos, DEFAULT_HISTORY_CAPACITY - 1);
            assert_eq!(editor.dimensions(), Some((6, 6)));
            assert_ne!(editor.dimensions(), Some((32, 24)));
        });
    }

    #[test]
    fn configured_capacity_bounds_history() {
        with_temp_root(|root| {
            let path = root.join("small.png");
            checkerboard(8, 8).save(&path).unwrap();
            let settings = EditorSettings {
                history_capacity: 3,
                ..EditorSettings::default()
            };
            let mut editor = ImageEditor::with_settings(&settings);
            editor.open(&path).unwrap();
            for step in 1..=5 {
                editor.resize(step, step);
            }
            assert_eq!(editor.history_capacity(), 3);
            assert_eq!(editor.history_len(), 3);
        });
    }

    #[test]
    fn non_positive_resize_is_rejected_without_history() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            let before = pixels(&editor);
            let invalid = EditOutcome::Skipped(SkipReason::InvalidDimensions);

            assert_eq!(editor.resize(0, 5), invalid);
            assert_eq!(editor.resize(-1, 10), invalid);
            assert_eq!(editor.resize(10, 0), invalid);
            assert_eq!(pixels(&editor), before);
            assert_eq!(editor.history_len(), 1);
        });
    }

    #[test]
    fn filter_names_are_case_insensitive_and_unknown_is_ignored() {
        with_temp_root(|root| {
            let (mut upper, _) = editor_with_image(root);
            let (mut lower, _) = editor_with_image(root);
            assert!(upper.apply_filter("SHARPEN").is_applied());
            assert!(lower.apply_filter("sharpen").is_applied());
            assert_eq!(pixels(&upper), pixels(&lower));

            let before = pixels(&lower);
            assert_eq!(
                lower.apply_filter("nonexistent"),
                EditOutcome::Skipped(SkipReason::UnknownFilter)
            );
            assert_eq!(
                lower.apply_filter("blur"),
                EditOutcome::Skipped(SkipReason::UnknownFilter)
            );
            assert_eq!(pixels(&lower), before);
            assert_eq!(lower.history_len(), 2);
        });
    }

    #[test]
    fn zero_blur_is_rejected_and_large_blur_is_clamped() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            assert_eq!(
                editor.apply_blur(0),
                EditOutcome::Skipped(SkipReason::InvalidIntensity)
            );
            assert_eq!(editor.history_len(), 1);

            let (mut clamped, _) = editor_with_image(root);
            let (mut maximum, _) = editor_with_image(root);
            clamped.apply_blur(500);
            maximum.apply_blur(*BLUR_INTENSITY_RANGE.end());
            assert_eq!(pixels(&clamped), pixels(&maximum));
        });
    }

    #[test]
    fn empty_text_does_not_create_history() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            assert_eq!(
                editor.draw_text("", TextPosition::new(0, 0), 40, Color::BLACK),
                EditOutcome::Skipped(SkipReason::EmptyText)
            );
            assert_eq!(editor.history_len(), 1);
        });
    }

    #[test]
    fn text_falls_back_to_builtin_font_and_undo_restores_exactly() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            let before = pixels(&editor);
            let color = Color::rgb(255, 0, 255);

            assert!(editor
                .draw_text("Hello", TextPosition::new(0, 0), 8, color)
                .is_applied());
            let drawn = pixels(&editor);
            assert!(drawn.pixels().any(|p| p.0 == color.to_rgba()));

            assert!(editor.undo());
            assert_eq!(pixels(&editor), before);
        });
    }

    #[test]
    fn stored_snapshots_survive_later_mutation() {
        with_temp_root(|root| {
            let (mut editor, _) = editor_with_image(root);
            editor.apply_filter("contour");
            let contoured = pixels(&editor);
            editor.draw_text("X", TextPosition::new(0, 0), 40, Color::BLACK);

            assert!(editor.undo());
            assert_eq!(pixels(&editor), contoured);
        });
    }

    #[test]
    fn render_snapshot_is_rgba_copy_of_any_color_mode() {
        with_temp_root(|root| {
            let path = root.join("rgb.bmp");
            DynamicImage::ImageRgb8(RgbImage::from_pixel(5, 3, Rgb([9, 8, 7])))
                .save(&path)
                .unwrap();
            let mut editor = ImageEditor::new();
            editor.open(&path).unwrap();

            let snapshot = editor.render_snapshot().expect("image should render");
            assert_eq!((snapshot.width(), snapshot.height()), (5, 3));
            assert_eq!(snapshot.as_bytes().len(), 5 * 3 * 4);
            assert_eq!(snapshot.as_rgba8().get_pixel(0, 0).0, [9, 8, 7, 255]);
            assert_eq!(editor.history_len(), 1);
        });
    }

    #[test]
    fn save_defaults_to_current_path_and_round_trips() {
        with_temp_root(|root| {
            let (mut editor, path) = editor_with_image(root);
            editor.apply_filter("detail");
            let edited = pixels(&editor);

            let written = editor.save(None).expect("save should succeed");
            assert_eq!(written.as_deref(), Some(path.as_path()));
            assert_eq!(editor.history_len(), 2);

            let mut reopened = ImageEditor::new();
            reopened.open(&path).unwrap();
            assert_eq!(pixels(&reopened), edited);
        });
    }

    #[test]
    fn save_as_jpeg_is_visually_close() {
        with_temp_root(|root| {
            let (editor, _) = editor_with_image(root);
            let target = root.join("copy.jpg");
            editor.save(Some(target.as_path())).expect("jpeg save should succeed");

            let mut reopened = ImageEditor::new();
            reopened.open(&target).unwrap();
            let original = pixels(&editor);
            let decoded = pixels(&reopened);
            assert_eq!(decoded.dimensions(), original.dimensions());

            let total_error: u64 = original
                .pixels()
                .zip(decoded.pixels())
                .flat_map(|(a, b)| a.0.into_iter().zip(b.0).take(3))
                .map(|(a, b)| u64::from(a.abs_diff(b)))
                .sum();
            let mean_error = total_error / u64::from(original.width() * original.height() * 3);
            assert!(mean_error < 24, "mean channel error {mean_error} too high");
        });
    }

    #[test]
    fn save_failure_is_reported_and_history_untouched() {
        with_temp_root(|root| {
            let (editor, _) = editor_with_image(root);
            let err = editor.save(Some(root.join("out.tga-nope").as_path())).unwrap_err();
            assert!(matches!(
                err,
                EditorError::Save {
                    source: CodecError::UnsupportedFormat { .. },
                    ..
                }
            ));

            let unwritable = root.join("missing-dir").join("out.png");
            assert!(editor.save(Some(unwritable.as_path())).is_err());
            assert_eq!(editor.history_len(), 1);
        });
    }

    #[test]
    fn open_rejects_formats_that_cannot_be_saved_back() {
        with_temp_root(|root| {
            let (mut editor, source) = editor_with_image(root);
            let gif = root.join("anim.gif");
            fs::write(&gif, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();

            let err = editor.open(&gif).unwrap_err();
            assert!(matches!(
                err,
                EditorError::Open {
                    source: CodecError::UnsupportedFormat { .. },
                    ..
                }
            ));
            assert_eq!(editor.current_path(), Some(source.as_path()));
            assert_eq!(editor.save(None).expect("save back should work"), Some(source));
        });
    }

    #[test]
    fn read_only_view_matches_dimensions() {
        with_temp_root(|root| {
            let (editor, _) = editor_with_image(root);
            let view = editor.image().expect("image should be loaded");
            assert_eq!(view.dimensions(), (32, 24));
        });
    }
}
