use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingSettings;

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Returns `false`
/// when a subscriber was already installed (e.g. by a test harness).
pub fn init_logging(settings: &LoggingSettings) -> bool {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_ansi(settings.ansi))
        .try_init()
        .is_ok()
}
