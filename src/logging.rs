use tracing_subscriber::EnvFilter;

/// Install the `tracing` subscriber used by the binaries
///
/// Logs go to stderr so stdout only ever carries command output. `RUST_LOG`
/// overrides `default_filter` when set. Calling this twice is harmless; the
/// second call leaves the first subscriber in place.
pub fn init(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
