//! ## outcomelog-telemetry::backend
//! Emits outcome records as `tracing` events.
//!
//! Each record becomes one event carrying `pkg`, `severity` and the
//! outcome as `outcome.*` fields (`outcome.result`, then `outcome.stack`,
//! `outcome.error`, `outcome.identifier`, `outcome.tax_year` when set),
//! plus the message when one was given. `tracing` has no fatal or panic
//! level, so both are emitted at `ERROR` with `severity` telling them apart.

use outcomelog_config::DispatchConfig;
use outcomelog_core::{Backend, Record, Severity};
use tracing::Level;

macro_rules! emit {
    ($level:expr, $record:expr) => {{
        let Record {
            pkg,
            severity,
            outcome,
            message,
        } = *$record;
        let result = outcome.result;
        let stack = outcome.stack.as_deref();
        let error = outcome.error.as_deref();
        let identifier = outcome.identifier.as_deref();
        let tax_year = outcome.tax_year;
        match message {
            Some(message) => tracing::event!(
                $level,
                pkg,
                %severity,
                outcome.result = %result,
                outcome.stack = stack,
                outcome.error = error,
                outcome.identifier = identifier,
                outcome.tax_year = tax_year,
                "{}",
                message
            ),
            None => tracing::event!(
                $level,
                pkg,
                %severity,
                outcome.result = %result,
                outcome.stack = stack,
                outcome.error = error,
                outcome.identifier = identifier,
                outcome.tax_year = tax_year
            ),
        }
    }};
}

#[derive(Debug, Clone, Default)]
pub struct TracingBackend {
    dispatch: DispatchConfig,
}

impl TracingBackend {
    pub fn new(dispatch: DispatchConfig) -> Self {
        Self { dispatch }
    }

    pub fn dispatch_config(&self) -> &DispatchConfig {
        &self.dispatch
    }
}

impl Backend for TracingBackend {
    fn dispatch(&self, record: &Record<'_>) {
        match record.severity {
            Severity::Trace => emit!(Level::TRACE, record),
            Severity::Debug => emit!(Level::DEBUG, record),
            Severity::Info => emit!(Level::INFO, record),
            Severity::Warning => emit!(Level::WARN, record),
            Severity::Error | Severity::Fatal | Severity::Panic => emit!(Level::ERROR, record),
        }

        match record.severity {
            Severity::Fatal if self.dispatch.exit_on_fatal => {
                std::process::exit(self.dispatch.fatal_exit_code)
            }
            Severity::Panic if self.dispatch.panic_on_panic => match record.message {
                Some(message) => panic!("{}", message),
                None => panic!("{}: panic-level outcome", record.pkg),
            },
            _ => {}
        }
    }
}
