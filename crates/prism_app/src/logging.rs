//! Logging setup for application entry points

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins when set; otherwise `debug` in dev mode and `info`
/// elsewhere. Calling this more than once is harmless.
pub fn init(dev: bool) {
    let default = if dev { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(dev)
        .try_init();
}
