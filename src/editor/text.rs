use std::fs;
use std::io;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use ab_glyph::{point, Font, FontVec, GlyphId, InvalidFont, PxScale, ScaleFont};
use image::{DynamicImage, GenericImage, GenericImageView, Rgba};
use thiserror::Error;

use super::builtin_font;
use crate::geometry::{Color, TextPosition};

pub const TEXT_SIZE_RANGE: RangeInclusive<u16> = 8..=200;
pub const TEXT_SIZE_DEFAULT: u16 = 40;
pub const DEFAULT_FONT_FACE: &str = "DejaVuSans.ttf";

const FONT_SEARCH_DEPTH: usize = 4;
const SYSTEM_FONT_DIRS: &[&str] = &[
    "/usr/share/fonts",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "/System/Library/Fonts",
    "C:\\Windows\\Fonts",
];

#[derive(Debug, Error)]
pub(crate) enum FontLoadError {
    #[error("font face {face:?} not found in search paths")]
    NotFound { face: String },
    #[error("failed to read font file: {0}")]
    Io(#[from] io::Error),
    #[error("invalid font data in {}: {source}", path.display())]
    Invalid {
        path: PathBuf,
        #[source]
        source: InvalidFont,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextOptions {
    pub size: u16,
    pub color: Color,
}

impl TextOptions {
    pub fn new(size: u16, color: Color) -> Self {
        Self {
            size: clamp_text_size(size),
            color,
        }
    }

    pub fn set_size(&mut self, size: u16) {
        self.size = clamp_text_size(size);
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::new(TEXT_SIZE_DEFAULT, Color::BLACK)
    }
}

fn clamp_text_size(size: u16) -> u16 {
    size.clamp(*TEXT_SIZE_RANGE.start(), *TEXT_SIZE_RANGE.end())
}

/// A face ready to rasterize: a loaded outline font or the built-in bitmap font.
pub enum TextFont {
    Outline(FontVec),
    Builtin,
}

impl std::fmt::Debug for TextFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline(_) => f.write_str("TextFont::Outline"),
            Self::Builtin => f.write_str("TextFont::Builtin"),
        }
    }
}

impl TextFont {
    pub const fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    /// Draws `text` onto `image` in place with its top-left corner at `position`.
    /// Lines split on `\n`; pixels falling outside the image are clipped.
    pub fn draw(
        &self,
        image: &mut DynamicImage,
        text: &str,
        position: TextPosition,
        options: TextOptions,
    ) {
        match self {
            Self::Outline(font) => draw_outline(font, image, text, position, options),
            Self::Builtin => draw_builtin(image, text, position, options),
        }
    }
}

/// Locates the configured font face, falling back to the built-in font.
#[derive(Debug, Clone)]
pub struct FontResolver {
    face: String,
    search_dirs: Vec<PathBuf>,
}

impl FontResolver {
    pub fn new(face: impl Into<String>, extra_dirs: &[PathBuf]) -> Self {
        let mut search_dirs = extra_dirs.to_vec();
        if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
            search_dirs.push(home.join(".local/share/fonts"));
            search_dirs.push(home.join(".fonts"));
        }
        search_dirs.extend(SYSTEM_FONT_DIRS.iter().map(PathBuf::from));
        Self::with_search_dirs(face, search_dirs)
    }

    pub fn with_search_dirs(face: impl Into<String>, search_dirs: Vec<PathBuf>) -> Self {
        Self {
            face: face.into(),
            search_dirs,
        }
    }

    pub fn face(&self) -> &str {
        &self.face
    }

    /// Never fails: any lookup or parse problem yields [`TextFont::Builtin`].
    pub fn resolve(&self) -> TextFont {
        match self.load() {
            Ok(font) => {
                tracing::debug!(face = %self.face, "loaded outline font");
                TextFont::Outline(font)
            }
            Err(err) => {
                tracing::warn!(face = %self.face, %err, "font unavailable; using built-in font");
                TextFont::Builtin
            }
        }
    }

    fn load(&self) -> Result<FontVec, FontLoadError> {
        let path = self.locate().ok_or_else(|| FontLoadError::NotFound {
            face: self.face.clone(),
        })?;
        let bytes = fs::read(&path)?;
        FontVec::try_from_vec(bytes).map_err(|source| FontLoadError::Invalid { path, source })
    }

    fn locate(&self) -> Option<PathBuf> {
        if self.face.is_empty() {
            return None;
        }
        let direct = Path::new(&self.face);
        if direct.components().count() > 1 || direct.is_absolute() {
            return direct.is_file().then(|| direct.to_path_buf());
        }
        self.search_dirs
            .iter()
            .find_map(|dir| find_file(dir, &self.face, FONT_SEARCH_DEPTH))
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new(DEFAULT_FONT_FACE, &[])
    }
}

fn find_file(dir: &Path, file_name: &str, depth: usize) -> Option<PathBuf> {
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
            continue;
        }
        if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.eq_ignore_ascii_case(file_name))
        {
            return Some(path);
        }
    }

    if depth == 0 {
        return None;
    }
    subdirs.sort();
    subdirs
        .iter()
        .find_map(|subdir| find_file(subdir, file_name, depth - 1))
}

fn draw_outline(
    font: &FontVec,
    image: &mut DynamicImage,
    text: &str,
    position: TextPosition,
    options: TextOptions,
) {
    let scale = PxScale::from(f32::from(options.size));
    let scaled = font.as_scaled(scale);
    let line_height = scaled.height() + scaled.line_gap();

    for (line_index, line) in text.split('\n').enumerate() {
        let baseline = position.y as f32 + scaled.ascent() + line_index as f32 * line_height;
        let mut caret = position.x as f32;
        let mut previous: Option<GlyphId> = None;

        for c in line.chars() {
            let id = font.glyph_id(c);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);
            previous = Some(id);

            if let Some(outlined) = font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let left = bounds.min.x.floor() as i64;
                let top = bounds.min.y.floor() as i64;
                outlined.draw(|gx, gy, coverage| {
                    blend_pixel(
                        image,
                        left + i64::from(gx),
                        top + i64::from(gy),
                        options.color,
                        coverage,
                    );
                });
            }
        }
    }
}

fn draw_builtin(
    image: &mut DynamicImage,
    text: &str,
    position: TextPosition,
    options: TextOptions,
) {
    let scale = builtin_font::scale_for_size(options.size);
    let advance = i64::from(builtin_font::ADVANCE_COLUMNS * scale);
    let line_height = i64::from(builtin_font::LINE_ROWS * scale);
    let block = i64::from(scale);

    for (line_index, line) in text.split('\n').enumerate() {
        let top = i64::from(position.y) + line_index as i64 * line_height;
        for (char_index, c) in line.chars().enumerate() {
            let left = i64::from(position.x) + char_index as i64 * advance;
            builtin_font::for_each_lit(c, |column, row| {
                let x0 = left + i64::from(column) * block;
                let y0 = top + i64::from(row) * block;
                for y in y0..y0 + block {
                    for x in x0..x0 + block {
                        blend_pixel(image, x, y, options.color, 1.0);
                    }
                }
            });
        }
    }
}

/// Source-over blend of `color` at `coverage` into one pixel; out-of-bounds is a no-op.
fn blend_pixel(image: &mut DynamicImage, x: i64, y: i64, color: Color, coverage: f32) {
    let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
        return;
    };
    if x >= image.width() || y >= image.height() {
        return;
    }

    let alpha = coverage.clamp(0.0, 1.0) * f32::from(color.a) / 255.0;
    if alpha <= 0.0 {
        return;
    }

    let Rgba(dst) = image.get_pixel(x, y);
    let src = color.to_rgba();
    let mix = |s: u8, d: u8| (f32::from(s) * alpha + f32::from(d) * (1.0 - alpha)).round() as u8;
    let out_alpha = (alpha * 255.0 + f32::from(dst[3]) * (1.0 - alpha)).round() as u8;
    image.put_pixel(
        x,
        y,
        Rgba([
            mix(src[0], dst[0]),
            mix(src[1], dst[1]),
            mix(src[2], dst[2]),
            out_alpha,
        ]),
    );
}
