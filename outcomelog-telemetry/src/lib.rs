//! # Outcomelog Telemetry
//!
//! Wires the outcome builder to `tracing`.
//!
//! - `backend`: [`TracingBackend`], one `tracing` event per outcome record
//! - `logging`: process-wide subscriber installation from
//!   [`LoggingConfig`](outcomelog_config::LoggingConfig)

use outcomelog_config::OutcomelogConfig;
use outcomelog_core::OutcomeLogger;

pub mod backend;
pub mod error;
pub mod logging;

pub use backend::TracingBackend;
pub use error::TelemetryError;

/// Builds a logger bound to `component.operation` that emits through `tracing`.
pub fn outcome_logger(
    config: &OutcomelogConfig,
    component: &str,
    operation: &str,
) -> OutcomeLogger<TracingBackend> {
    OutcomeLogger::new(
        TracingBackend::new(config.dispatch.clone()),
        component,
        operation,
    )
}

/// Loads configuration and installs the global subscriber.
pub fn init() -> Result<OutcomelogConfig, TelemetryError> {
    let config = OutcomelogConfig::load()?;
    logging::init(&config.logging)?;
    Ok(config)
}
