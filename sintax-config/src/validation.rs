//! Custom validation functions for configuration.
//!
//! Provides shared validation logic used across multiple configuration modules.

use validator::ValidationError;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Validate that a prevalence lies strictly between 0 and 1.
pub fn validate_open_unit_interval(value: f64) -> Result<(), ValidationError> {
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::new("open_unit_interval")
            .with_message("must be in (0,1)".into()))
    }
}

/// Validate that a floating-point field holds a finite number.
pub fn validate_finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("not_finite").with_message("must be a finite number".into()))
    }
}

/// Validate the default log level.
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level")
            .with_message("must be one of trace, debug, info, warn, error".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_unit_interval_excludes_bounds() {
        assert!(validate_open_unit_interval(0.15).is_ok());
        assert!(validate_open_unit_interval(0.0).is_err());
        assert!(validate_open_unit_interval(1.0).is_err());
        assert!(validate_open_unit_interval(f64::NAN).is_err());
    }

    #[test]
    fn log_level_is_case_insensitive() {
        assert!(validate_log_level("INFO").is_ok());
        assert!(validate_log_level("verbose").is_err());
    }

    #[test]
    fn finite_rejects_infinity() {
        assert!(validate_finite(-0.4).is_ok());
        assert!(validate_finite(f64::INFINITY).is_err());
    }
}
