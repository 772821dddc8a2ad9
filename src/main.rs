use std::path::PathBuf;

use anyhow::Context;

/// Opens the image named on the command line, if any, and reports what loaded.
fn main() -> anyhow::Result<()> {
    let initial_path = std::env::args_os().nth(1).map(PathBuf::from);
    let editor = match &initial_path {
        Some(path) => imagedit::run(Some(path.clone()))
            .with_context(|| format!("could not open {}", path.display()))?,
        None => imagedit::run(None)?,
    };

    match editor.dimensions() {
        Some((width, height)) => tracing::info!(width, height, "image ready"),
        None => tracing::info!("no image loaded"),
    }
    Ok(())
}
