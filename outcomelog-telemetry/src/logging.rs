//! ## outcomelog-telemetry::logging
//! Process-wide `tracing` subscriber installation.
//!
//! Call [`init`] once at startup, before any outcome is emitted. Records
//! emitted before a subscriber exists are dropped by `tracing`.

use outcomelog_config::{LogFormat, LoggingConfig};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::TelemetryError;

/// Builds the env filter for `config`. `RUST_LOG` wins when it is set.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter, TelemetryError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(config.directive())?),
    }
}

/// Installs the global fmt subscriber described by `config`.
pub fn init(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = env_filter(config)?;
    let builder = fmt()
        .with_env_filter(filter)
        .with_thread_names(config.with_thread_names)
        .with_target(config.with_target);

    match config.format {
        LogFormat::Pretty => builder.pretty().finish().try_init()?,
        LogFormat::Compact => builder.compact().finish().try_init()?,
        LogFormat::Json => builder.json().finish().try_init()?,
    }

    tracing::debug!(format = ?config.format, directive = config.directive(), "Outcome logging initialized");
    Ok(())
}
