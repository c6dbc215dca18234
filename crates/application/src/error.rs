//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Speech adapter error
    #[error("Speech error: {0}")]
    Speech(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err = ApplicationError::from(DomainError::EmptyLog);
        assert_eq!(err.to_string(), "Conversation log is empty");
    }

    #[test]
    fn speech_error_message() {
        let err = ApplicationError::Speech("engine offline".to_string());
        assert_eq!(err.to_string(), "Speech error: engine offline");
    }

    #[test]
    fn configuration_error_message() {
        let err = ApplicationError::Configuration("bad locale".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad locale");
    }
}
