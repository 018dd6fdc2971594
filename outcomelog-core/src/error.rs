use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutcomeError {
    /// A terminal call was made before any severity was selected.
    #[error("no severity selected before emitting outcome for '{pkg}'{}", dropped_suffix(.dropped_error))]
    MissingSeverity {
        pkg: String,
        /// Rendered pending error that could not be emitted.
        dropped_error: Option<String>,
    },

    #[error("Unknown severity: {0}")]
    UnknownSeverity(String),

    #[error("Unknown result status: {0}")]
    UnknownResult(String),
}

fn dropped_suffix(dropped: &Option<String>) -> String {
    match dropped {
        Some(err) => format!(" (dropped error: {})", err),
        None => String::new(),
    }
}
