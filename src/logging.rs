use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber. Logs go to stderr so stdout stays
/// reserved for grid snapshots and the mission summary.
///
/// `RUST_LOG` overrides the default level, which is `info` in debug builds
/// and `warn` in release builds.
pub fn init() {
    let default_level = if cfg!(debug_assertions) { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A subscriber may already be installed (tests); keep the existing one.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();
}
