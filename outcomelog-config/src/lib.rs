//! # Outcomelog Configuration
//!
//! Layered configuration for outcome logging: how the process-wide
//! subscriber is installed and how the tracing backend treats fatal and
//! panic records.
//!
//! ## Sources
//! - **Defaults**: every field has one, an empty environment is valid
//! - **YAML**: `config/outcomelog.yaml` and `config/<environment>.yaml`
//! - **Environment**: `OUTCOMELOG_*` variables, nested keys split on `__`

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod dispatch;
mod error;
mod logging;
mod validation;

pub use dispatch::DispatchConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};

const BASE_FILE: &str = "config/outcomelog.yaml";
const ENV_PREFIX: &str = "OUTCOMELOG_";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone, PartialEq)]
pub struct OutcomelogConfig {
    /// Subscriber installation (level, filter, format).
    #[validate(nested)]
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Level-specific side effects of the tracing backend.
    #[validate(nested)]
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl OutcomelogConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/outcomelog.yaml`, if present
    /// 3. `config/<environment>.yaml`, if present, where the environment
    ///    comes from `OUTCOMELOG_ENV` (default `production`)
    /// 4. `OUTCOMELOG_*` environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(OutcomelogConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        }

        let env = std::env::var("OUTCOMELOG_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file plus environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        let figment = Figment::from(Serialized::defaults(OutcomelogConfig::default()))
            .merge(Yaml::file(path));
        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["env"]).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}
