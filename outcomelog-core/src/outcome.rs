//! ## outcomelog-core::outcome
//! The nested `outcome` field attached to every emitted record.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OutcomeError;

/// Result status of one unit of work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    #[default]
    Success,
    Fail,
}

impl ResultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultStatus::Success => "success",
            ResultStatus::Fail => "fail",
        }
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResultStatus {
    type Err = OutcomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(ResultStatus::Success),
            "fail" => Ok(ResultStatus::Fail),
            _ => Err(OutcomeError::UnknownResult(s.to_string())),
        }
    }
}

/// Composed outcome of one emission cycle.
///
/// Serializes with a fixed key order: `result`, `stack`, `error`,
/// `identifier`, `tax_year`. Unset keys are omitted rather than `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub result: ResultStatus,

    /// Backtrace captured with the pending error, if the runtime captured one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Full cause chain, outermost context first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_year: Option<i32>,
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        self.result == ResultStatus::Fail
    }
}

/// Compact JSON, suitable for attaching as a single text field.
impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}
