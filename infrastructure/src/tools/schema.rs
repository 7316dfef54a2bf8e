//! JSON Schema tool converter.
//!
//! Default implementation of [`ToolSchemaPort`] producing the MCP
//! `tools/list` entries: name, description, `inputSchema` and annotations.

use gdrive_application::ToolSchemaPort;
use gdrive_domain::tool::entities::{ToolDefinition, ToolParameter};
use serde_json::{Map, Value, json};

/// Default implementation producing MCP tool listings.
///
/// Handles param_type → JSON Schema type mapping:
/// - `"string"`, `"number"`, `"integer"`, `"boolean"`, `"array"`, `"object"` as is
/// - anything else → `"string"`
pub struct JsonSchemaToolConverter;

fn schema_type(param: &ToolParameter) -> &str {
    match param.param_type.as_str() {
        t @ ("string" | "number" | "integer" | "boolean" | "array" | "object") => t,
        _ => "string",
    }
}

impl ToolSchemaPort for JsonSchemaToolConverter {
    fn input_schema(&self, tool: &ToolDefinition) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for param in &tool.parameters {
            let mut prop = Map::new();
            prop.insert("type".to_string(), json!(schema_type(param)));
            prop.insert("description".to_string(), json!(param.description));
            if let Some(items) = &param.items {
                prop.insert("items".to_string(), items.clone());
            }
            if !param.enum_values.is_empty() {
                prop.insert("enum".to_string(), json!(param.enum_values));
            }
            properties.insert(param.name.clone(), Value::Object(prop));

            if param.required {
                required.push(json!(param.name));
            }
        }

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({
            "name": tool.name,
            "description": tool.description,
            "inputSchema": self.input_schema(tool),
            "annotations": {
                "readOnlyHint": tool.kind.is_read_only(),
                "destructiveHint": tool.kind.is_destructive(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gdrive_domain::tool::entities::{ToolKind, ToolSpec};

    #[test]
    fn test_tool_to_schema() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("gdrive_read_file", "Read file contents", ToolKind::Read)
            .with_parameter(
                ToolParameter::new("fileId", "ID of the file", true).with_type("string"),
            )
            .with_parameter(
                ToolParameter::new("pageSize", "Max results", false).with_type("integer"),
            );

        let schema = converter.tool_to_schema(&tool);

        assert_eq!(schema["name"], "gdrive_read_file");
        assert_eq!(schema["description"], "Read file contents");
        assert_eq!(schema["inputSchema"]["type"], "object");
        assert_eq!(schema["inputSchema"]["properties"]["fileId"]["type"], "string");
        assert_eq!(schema["inputSchema"]["properties"]["pageSize"]["type"], "integer");
        assert_eq!(schema["inputSchema"]["required"], json!(["fileId"]));
        assert_eq!(schema["annotations"]["readOnlyHint"], true);
        assert_eq!(schema["annotations"]["destructiveHint"], false);
    }

    #[test]
    fn test_items_and_enum_are_published() {
        let converter = JsonSchemaToolConverter;
        let tool = ToolDefinition::new("gdrive_batch_delete", "Delete", ToolKind::Destructive)
            .with_parameter(
                ToolParameter::new("fileIds", "IDs", true)
                    .with_type("array")
                    .with_items(json!({"type": "string"})),
            )
            .with_parameter(
                ToolParameter::new("role", "Role", false).with_enum(["reader", "writer"]),
            );

        let schema = converter.input_schema(&tool);
        assert_eq!(schema["properties"]["fileIds"]["items"], json!({"type": "string"}));
        assert_eq!(schema["properties"]["role"]["enum"], json!(["reader", "writer"]));
        assert!(schema["properties"]["role"].get("items").is_none());

        let listing = converter.tool_to_schema(&tool);
        assert_eq!(listing["annotations"]["destructiveHint"], true);
        assert_eq!(listing["annotations"]["readOnlyHint"], false);
    }

    #[test]
    fn test_all_tools_schema_is_sorted() {
        let converter = JsonSchemaToolConverter;
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("gdrive_search", "Search", ToolKind::Read))
            .register(ToolDefinition::new("gdrive_copy_file", "Copy", ToolKind::Write));

        let tools = converter.all_tools_schema(&spec);
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], "gdrive_copy_file");
        assert_eq!(tools[1]["name"], "gdrive_search");
        for tool in &tools {
            assert_eq!(tool["inputSchema"]["required"], json!([]));
        }
    }
}
