//! Telemetry - Tracing subscriber initialization

use application::ApplicationError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` wins when set; otherwise the verbosity count picks the level.
/// `log_format` selects human-readable text or structured JSON lines.
pub fn init_telemetry(log_format: &str, verbosity: u8) -> Result<(), ApplicationError> {
    let default_level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if log_format == "json" {
        registry.with(fmt::layer().json()).try_init()
    } else {
        registry.with(fmt::layer()).try_init()
    };

    result.map_err(|err| ApplicationError::Configuration(err.to_string()))
}
