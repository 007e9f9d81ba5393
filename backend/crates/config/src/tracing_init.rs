use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise `log_level` (normally the configured
/// `LOG_LEVEL`) is used as the filter directive, falling back to `info` if it
/// does not parse. Calling this twice is harmless: the second install is
/// ignored.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt().with_env_filter(filter).with_target(true).try_init();
}
