//! Custom validation functions for configuration.

use validator::ValidationError;

/// Validate a subscriber level name.
pub fn validate_level(level: &str) -> Result<(), ValidationError> {
    let valid = ["trace", "debug", "info", "warn", "error"]
        .contains(&level.to_lowercase().as_str());
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_level"))
    }
}

/// Validate that a filter directive, when present, is not blank.
pub fn validate_filter(filter: &str) -> Result<(), ValidationError> {
    if filter.trim().is_empty() {
        Err(ValidationError::new("blank_filter"))
    } else {
        Ok(())
    }
}
