//! Level-specific side effects applied after a record is emitted.

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

/// How the tracing backend treats fatal and panic records.
#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct DispatchConfig {
    /// Terminate the process after emitting a fatal record.
    #[serde(default = "default_true")]
    pub exit_on_fatal: bool,

    /// Exit status used when terminating on a fatal record.
    #[serde(default = "default_exit_code")]
    #[validate(range(min = 1, max = 255))]
    pub fatal_exit_code: i32,

    /// Panic after emitting a panic record.
    #[serde(default = "default_true")]
    pub panic_on_panic: bool,
}

fn default_true() -> bool {
    true
}

fn default_exit_code() -> i32 {
    1
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            exit_on_fatal: default_true(),
            fatal_exit_code: default_exit_code(),
            panic_on_panic: default_true(),
        }
    }
}
