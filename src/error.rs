//! Error types for lapwatch.

use thiserror::Error;

/// Errors produced by lapwatch.
#[derive(Debug, Error)]
pub enum LapwatchError {
    /// Configuration could not be read, parsed, or resolved.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The backing database failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Persisted or user-provided data could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Filesystem or stream failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for LapwatchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LapwatchError::NotFound("session 42".to_string());
        assert_eq!(err.to_string(), "Not found: session 42");
    }

    #[test]
    fn test_from_serde_json() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: LapwatchError = err.into();
        assert!(matches!(err, LapwatchError::Parse(_)));
    }
}
