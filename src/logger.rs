use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system.
///
/// The level is controlled through the RUST_LOG environment variable.
/// Default level: info
///
/// Examples:
/// - RUST_LOG=debug cargo test
/// - RUST_LOG=rendez=trace cargo test
pub fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // try_init so that repeated calls from test binaries are harmless
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init();

    tracing::debug!("Logger initialized");
}
