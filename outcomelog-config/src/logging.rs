//! Subscriber installation settings.
//!
//! Consumed once at startup when the process-wide `tracing` subscriber
//! is installed.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use crate::validation;

/// Output encoding of the installed subscriber.
#[derive(Debug, Default, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    #[default]
    Compact,
    Json,
}

/// Logging configuration.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Maximum verbosity (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    #[validate(custom(function = validation::validate_level))]
    pub level: String,

    /// `EnvFilter` directive; takes precedence over `level` when set.
    #[serde(default)]
    #[validate(custom(function = validation::validate_filter))]
    pub filter: Option<String>,

    #[serde(default)]
    pub format: LogFormat,

    #[serde(default)]
    pub with_thread_names: bool,

    #[serde(default = "default_true")]
    pub with_target: bool,
}

fn default_level() -> String {
    "info".into()
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            filter: None,
            format: LogFormat::default(),
            with_thread_names: false,
            with_target: default_true(),
        }
    }
}

impl LoggingConfig {
    /// Directive handed to the subscriber's env filter.
    pub fn directive(&self) -> &str {
        self.filter.as_deref().unwrap_or(&self.level)
    }
}
