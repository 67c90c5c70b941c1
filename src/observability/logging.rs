//! Structured logging.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is not set.
pub fn default_directive(level: &str) -> String {
    format!("log_crawler={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Output goes to stderr so stdout stays reserved for the correlated log stream.
pub fn init_logging(level: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_directive(level).into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
