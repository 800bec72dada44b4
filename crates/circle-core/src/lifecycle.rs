use tracing_subscriber::EnvFilter;

/// Initialize tracing with env filter support.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` (usually
/// `logging.filter` from the config) is used, falling back to `info`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (e.g. from tests sharing a process) is not an error.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
}

pub fn log_startup() {
    tracing::info!("Circle client starting up");
}

pub fn log_shutdown() {
    tracing::info!("Circle client shutting down");
}
