//! Error types for the event financials engine.
//!
//! The calculation itself never fails: configuration gaps fall back to
//! defaults and business-limit breaches become warnings. These errors only
//! surface at the edges, when rules are loaded from disk or when the API
//! receives input it refuses to compute with.

use thiserror::Error;

/// The main error type for the event financials engine.
///
/// # Example
///
/// ```
/// use event_financials::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/rules.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/rules.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A rules document had the wrong shape entirely (not a mapping at the root).
    #[error("Invalid money rules: {message}")]
    InvalidRules {
        /// A description of what was wrong with the document.
        message: String,
    },

    /// An event input field was rejected before calculation.
    #[error("Invalid event field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rules.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rules.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_rules_displays_message() {
        let error = EngineError::InvalidRules {
            message: "expected a mapping".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid money rules: expected a mapping");
    }

    #[test]
    fn test_invalid_input_displays_field_and_message() {
        let error = EngineError::InvalidInput {
            field: "distance_miles".to_string(),
            message: "must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid event field 'distance_miles': must not be negative"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_rules() -> EngineResult<()> {
            Err(EngineError::InvalidRules {
                message: "not a mapping".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_rules()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
