//! Shared utilities for use cases.

use crate::use_cases::error::UseCaseError;
use crate::ports::drive_gateway::GatewayError;
use gdrive_domain::core::error::require_non_empty;
use serde::Serialize;

/// Trimmed identifier, rejecting empty input before any remote call
pub(crate) fn require_id(field: &'static str, value: &str) -> Result<String, UseCaseError> {
    Ok(require_non_empty(field, value)?.to_string())
}

/// Serialize a provider payload for a batch outcome
pub(crate) fn to_payload<T: Serialize>(value: &T) -> Result<serde_json::Value, UseCaseError> {
    serde_json::to_value(value).map_err(|e| GatewayError::Decode(e.to_string()).into())
}
