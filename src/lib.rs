mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod storage;

use std::path::PathBuf;

pub use config::{load_app_config, AppConfig};
pub use editor::{
    EditOutcome, EditorError, EditorSettings, FilterKind, ImageEditor, RenderSnapshot,
    SkipReason,
};
pub use error::{AppError, AppResult};
pub use geometry::{Color, TextPosition};

/// Entrypoint used by the launcher and presentation layers: sets up logging,
/// reads the user config, and builds an engine, opening `initial_path` if given.
///
/// There is no windowed front end in this crate. The bundled launcher only
/// loads the image, reports its dimensions and exits; a presentation layer
/// drives the returned engine and displays its render snapshots.
pub fn run(initial_path: Option<PathBuf>) -> AppResult<ImageEditor> {
    logging::init();
    tracing::info!("starting imagedit");

    let settings = load_app_config().editor_settings();
    start_editor(&settings, initial_path)
}

/// Builds an engine from resolved settings without touching global state.
pub fn start_editor(
    settings: &EditorSettings,
    initial_path: Option<PathBuf>,
) -> AppResult<ImageEditor> {
    tracing::debug!(
        history_capacity = settings.history_capacity,
        text_font = %settings.text_font,
        "editor settings resolved"
    );

    let mut editor = ImageEditor::with_settings(settings);
    if let Some(path) = initial_path {
        editor.open(path)?;
    }

    tracing::info!(has_image = editor.has_image(), "startup complete");
    Ok(editor)
}
