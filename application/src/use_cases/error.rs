//! Use case error type

use crate::ports::drive_gateway::GatewayError;
use gdrive_domain::DomainError;
use thiserror::Error;

/// Errors that can occur while executing a Drive use case
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UseCaseError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(
        "File {file_id} changed while appending (read at version {expected}, now {actual}); nothing was written"
    )]
    Conflict {
        file_id: String,
        expected: String,
        actual: String,
    },
}

impl UseCaseError {
    pub fn invalid(message: impl Into<String>) -> Self {
        UseCaseError::InvalidInput(message.into())
    }

    /// Whether the caller's input was rejected before any remote call
    pub fn is_input_error(&self) -> bool {
        match self {
            UseCaseError::InvalidInput(_) => true,
            UseCaseError::Domain(e) => e.is_input_error(),
            UseCaseError::Gateway(GatewayError::InvalidRequest(_)) => true,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_message_is_transparent() {
        let err: UseCaseError = GatewayError::NotFound("File not found: B.".to_string()).into();
        assert_eq!(err.to_string(), "File not found: B.");
        assert!(!err.is_input_error());
    }

    #[test]
    fn test_input_errors() {
        assert!(UseCaseError::invalid("bad").is_input_error());
        assert!(UseCaseError::from(DomainError::EmptyField("fileId")).is_input_error());
    }

    #[test]
    fn test_conflict_display() {
        let err = UseCaseError::Conflict {
            file_id: "f1".to_string(),
            expected: "3".to_string(),
            actual: "4".to_string(),
        };
        assert!(err.to_string().contains("read at version 3, now 4"));
    }
}
