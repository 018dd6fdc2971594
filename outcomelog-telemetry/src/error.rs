use outcomelog_config::ConfigError;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::util::TryInitError;

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Failed to install subscriber: {0}")]
    Subscriber(#[from] TryInitError),

    #[error("Invalid filter directive: {0}")]
    Filter(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
