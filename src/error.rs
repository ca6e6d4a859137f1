//! Error types for stepwise.
//!
//! Every fallible operation returns `Result<T, VizError>` instead of
//! panicking. Playback controls are deliberately absent from this taxonomy:
//! misusing the controller is a silent no-op, never an error.

use thiserror::Error;

/// Result type alias for stepwise operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for all stepwise operations.
///
/// Errors fall into three groups:
/// 1. Input rejected before an algorithm runs
/// 2. Configuration loading and validation
/// 3. I/O and serialization at the CLI boundary
#[derive(Debug, Error)]
pub enum VizError {
    // ===== Input Errors =====
    /// Input rejected by an algorithm's validation.
    #[error("Invalid input for '{algorithm}': {reason}")]
    InvalidInput {
        /// Algorithm that rejected the input.
        algorithm: String,
        /// Why the input was rejected.
        reason: String,
    },

    /// No algorithm registered under this name.
    #[error("Unknown algorithm '{0}'")]
    UnknownAlgorithm(String),

    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    /// Create an input rejection for the named algorithm.
    #[must_use]
    pub fn invalid_input(algorithm: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            algorithm: algorithm.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }

    /// Check if this error was caused by user-supplied input.
    ///
    /// Input errors are shown to the user next to the input form; nothing
    /// was recorded and the previous session state is untouched.
    #[must_use]
    pub const fn is_input_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. } | Self::UnknownAlgorithm(_))
    }
}

impl From<serde_json::Error> for VizError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_detection() {
        let invalid = VizError::invalid_input("n_queens", "board size 9 exceeds 8");
        assert!(invalid.is_input_error());

        let unknown = VizError::UnknownAlgorithm("bogo_sort".to_string());
        assert!(unknown.is_input_error());

        let config = VizError::config("invalid");
        assert!(!config.is_input_error());
    }

    #[test]
    fn test_error_invalid_input_display() {
        let err = VizError::invalid_input("factorial", "n must be at most 12");
        let msg = err.to_string();
        assert!(msg.contains("Invalid input"));
        assert!(msg.contains("factorial"));
        assert!(msg.contains("at most 12"));
    }

    #[test]
    fn test_error_unknown_algorithm_display() {
        let err = VizError::UnknownAlgorithm("bogo_sort".to_string());
        assert_eq!(err.to_string(), "Unknown algorithm 'bogo_sort'");
    }

    #[test]
    fn test_error_config() {
        let err = VizError::config("interval out of range");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("interval out of range"));
    }

    #[test]
    fn test_error_serialization() {
        let err = VizError::serialization("failed to serialize");
        assert!(!err.is_input_error());
        assert!(err.to_string().contains("Serialization error"));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<u32>("not a number").err();
        assert!(json_err.is_some());
        if let Some(e) = json_err {
            let err: VizError = e.into();
            assert!(matches!(err, VizError::Serialization(_)));
        }
    }

    #[test]
    fn test_error_io() {
        let err: VizError = std::io::Error::other("file not found").into();
        let msg = err.to_string();
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("file not found"));
    }

    #[test]
    fn test_error_debug() {
        let err = VizError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
