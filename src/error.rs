//! Error types for studybuddy.

use thiserror::Error;

/// Errors that can occur anywhere in studybuddy.
#[derive(Debug, Error)]
pub enum StudyError {
    /// Configuration could not be loaded, saved or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A configuration value is out of range for a focus session.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A `SQLite` operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Input or output could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for StudyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StudyError::InvalidConfig("focus duration must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid configuration: focus duration must be positive"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err: StudyError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, StudyError::Parse(_)));
    }
}
