//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid role '{0}' (expected one of: reader, commenter, writer, organizer, owner)")]
    InvalidRole(String),

    #[error("Invalid grantee type '{0}' (expected one of: user, group, domain, anyone)")]
    InvalidGranteeType(String),

    #[error("Role '{role}' is not allowed for {operation}")]
    RoleNotAllowed { role: String, operation: String },

    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid batch input: {0}")]
    InvalidBatch(String),

    #[error("File '{name}' has content type {mime_type}, which cannot be edited as text")]
    NotText { name: String, mime_type: String },
}

impl DomainError {
    /// Whether the error describes caller input (as opposed to file state)
    pub fn is_input_error(&self) -> bool {
        !matches!(self, DomainError::NotText { .. })
    }
}

/// Reject empty or whitespace-only identifiers
pub fn require_non_empty<'a>(field: &'static str, value: &'a str) -> Result<&'a str, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(DomainError::EmptyField(field))
    } else {
        Ok(trimmed)
    }
}
