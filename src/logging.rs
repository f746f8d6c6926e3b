// 📝 Logging setup shared by the CLI and the server
// Level comes from RUST_LOG (default: info)

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Build the filter from RUST_LOG, falling back to `default`
pub fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the global subscriber, writing to stderr
///
/// stdout is reserved for renamed output, so logs never mix with it.
/// Calling twice is harmless (the second install is ignored).
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(DEFAULT_FILTER))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
