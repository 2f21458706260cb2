//! Error types for wherekit.

use thiserror::Error;

/// The main error type for condition building and rendering.
#[derive(Debug, Error)]
pub enum WhereError {
    /// A constructor received arguments that cannot form a valid condition.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Failed to parse a shorthand condition string.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// The escaping collaborator refused an identifier or literal.
    #[error("Escape error: {0}")]
    Escape(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid condition document.
    #[error("Document error: {0}")]
    Document(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WhereError {
    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Create an escape error.
    pub fn escape(message: impl Into<String>) -> Self {
        Self::Escape(message.into())
    }
}

/// Result type alias for wherekit operations.
pub type WhereResult<T> = Result<T, WhereError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = WhereError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = WhereError::invalid("BETWEEN needs exactly two bounds");
        assert_eq!(
            err.to_string(),
            "Invalid argument: BETWEEN needs exactly two bounds"
        );
    }
}
