use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a `tracing` filter directive
pub const LOG_ENV: &str = "ISPQUOTE_LOG";

/// Install the stderr subscriber.
///
/// `ISPQUOTE_LOG` wins when set; otherwise `verbose` picks `debug` over the
/// default `warn`. Calling this twice is harmless.
pub fn init(verbose: bool) {
    let default_level = if verbose { "ispquote=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}
