//! Tool domain traits
//!
//! Pure validation of a tool call against its definition. No I/O happens
//! here; the async executor port lives in the application layer.

use super::entities::{ToolCall, ToolDefinition, ToolParameter, json_type_name};
use serde_json::Value;

/// Validator for tool calls
pub trait ToolValidator {
    /// Validate a tool call against its definition
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String>;
}

/// Default implementation of ToolValidator
///
/// Checks presence of required parameters, rejects unknown ones, and checks
/// the JSON type (and enumerated values) of every supplied argument.
#[derive(Debug, Clone, Default)]
pub struct DefaultToolValidator;

impl ToolValidator for DefaultToolValidator {
    fn validate(&self, call: &ToolCall, definition: &ToolDefinition) -> Result<(), String> {
        for param in &definition.parameters {
            let supplied = call.arguments.get(&param.name).filter(|v| !v.is_null());
            if param.required && supplied.is_none() {
                return Err(format!(
                    "Missing required parameter '{}' for tool '{}'",
                    param.name, definition.name
                ));
            }
        }

        for (arg_name, value) in &call.arguments {
            let Some(param) = definition.parameter(arg_name) else {
                return Err(format!(
                    "Unknown parameter '{}' for tool '{}'",
                    arg_name, definition.name
                ));
            };
            // Optional parameters may be passed as explicit null
            if value.is_null() {
                continue;
            }
            check_type(param, value)?;
        }

        Ok(())
    }
}

fn check_type(param: &ToolParameter, value: &Value) -> Result<(), String> {
    let matches = match param.param_type.as_str() {
        "string" => value.is_string(),
        "integer" => value.is_i64() || value.is_u64(),
        "number" => value.is_number(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        _ => true,
    };
    if !matches {
        return Err(format!(
            "Parameter '{}' must be of type {}, got {}",
            param.name,
            param.param_type,
            json_type_name(value)
        ));
    }

    if !param.enum_values.is_empty()
        && let Some(s) = value.as_str()
        && !param.enum_values.iter().any(|allowed| allowed == s)
    {
        return Err(format!(
            "Parameter '{}' must be one of [{}], got '{}'",
            param.name,
            param.enum_values.join(", "),
            s
        ));
    }

    Ok(())
}
