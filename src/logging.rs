use tracing_subscriber::EnvFilter;

/// Install the fmt subscriber for the binaries. `RUST_LOG` wins; otherwise `info`.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt().with_env_filter(filter).with_target(false).try_init();
}
