//! Helpers shared by the tool families: parameter builders, argument
//! parsing and the mapping from use case errors to tool errors.

use gdrive_application::{GatewayError, ListInput, UseCaseError};
use gdrive_domain::tool::{
    entities::{ToolCall, ToolParameter},
    value_objects::ToolError,
};
use gdrive_domain::Role;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Text returned by a tool, plus the number of sub-operations for batches
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub operation_count: Option<usize>,
}

impl ToolOutput {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            operation_count: None,
        }
    }

    /// Pretty-printed JSON of a provider payload
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ToolError> {
        serde_json::to_string_pretty(value)
            .map(Self::text)
            .map_err(|e| ToolError::execution_failed(format!("Failed to encode result: {}", e)))
    }

    pub fn with_operation_count(mut self, count: usize) -> Self {
        self.operation_count = Some(count);
        self
    }
}

pub type ToolOutcome = Result<ToolOutput, ToolError>;

/// Deserialize the call's arguments into a typed input record
pub fn parse<T: DeserializeOwned>(call: &ToolCall) -> Result<T, ToolError> {
    serde_json::from_value(call.arguments_json()).map_err(|e| {
        ToolError::invalid_argument(format!("Invalid arguments for {}: {}", call.tool_name, e))
    })
}

/// Classify a use case failure for the caller
pub fn tool_error(err: UseCaseError) -> ToolError {
    let message = err.to_string();
    match &err {
        UseCaseError::Gateway(GatewayError::NotFound(_)) => ToolError::not_found(message),
        UseCaseError::Gateway(GatewayError::Auth(_)) => ToolError::unauthenticated(message),
        UseCaseError::Gateway(GatewayError::Conflict(_)) | UseCaseError::Conflict { .. } => {
            ToolError::conflict(message)
        }
        _ if err.is_input_error() => ToolError::invalid_argument(message),
        _ => ToolError::execution_failed(message),
    }
}

/// Pagination arguments accepted by every listing tool
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageArgs {
    #[serde(default)]
    pub page_size: Option<i64>,
    #[serde(default)]
    pub page_token: Option<String>,
}

impl From<PageArgs> for ListInput {
    fn from(args: PageArgs) -> Self {
        ListInput::new(args.page_size, args.page_token)
    }
}

pub fn string_param(name: &str, description: &str, required: bool) -> ToolParameter {
    ToolParameter::new(name, description, required).with_type("string")
}

pub fn bool_param(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, description, false).with_type("boolean")
}

pub fn file_id_param() -> ToolParameter {
    string_param("fileId", "ID of the file", true)
}

pub fn page_size_param() -> ToolParameter {
    ToolParameter::new("pageSize", "Maximum number of results to return", false)
        .with_type("integer")
}

pub fn page_token_param() -> ToolParameter {
    string_param(
        "pageToken",
        "Continuation token from a previous call",
        false,
    )
}

pub fn role_param(description: &str, roles: &[Role]) -> ToolParameter {
    string_param("role", description, true).with_enum(Role::names(roles))
}

/// Array of strings, for id lists
pub fn string_array_param(name: &str, description: &str) -> ToolParameter {
    ToolParameter::new(name, description, true)
        .with_type("array")
        .with_items(serde_json::json!({ "type": "string" }))
}
