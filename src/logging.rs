use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,imagedit=debug";

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default filter.
/// Calling this more than once is harmless.
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(true)
        .with_line_number(true)
        .try_init();
}
