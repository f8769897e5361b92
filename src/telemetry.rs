//! Tracing bootstrap for embedding shells.

use atlas_core::config::logging::LoggingConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber from logging configuration.
///
/// The `RUST_LOG` environment variable takes precedence over the
/// configured level. Repeated calls are no-ops.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.clone()));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.format == "json" {
        let _ = builder.json().try_init();
    } else {
        let _ = builder.try_init();
    }
}
