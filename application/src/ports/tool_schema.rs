//! Tool schema conversion port.
//!
//! Separates "which tools exist" (domain) from "how they are described on
//! the wire" (infrastructure). The domain layer defines [`ToolDefinition`]
//! and [`ToolSpec`]; this port renders them as JSON Schema for `tools/list`.

use gdrive_domain::tool::entities::{ToolDefinition, ToolSpec};

/// Port for converting tool definitions to JSON Schema.
pub trait ToolSchemaPort: Send + Sync {
    /// Convert a single tool's parameters to a JSON Schema object.
    fn input_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert a tool to its listing entry (name, description, schema, annotations).
    fn tool_to_schema(&self, tool: &ToolDefinition) -> serde_json::Value;

    /// Convert all tools to listing entries (sorted by name).
    fn all_tools_schema(&self, spec: &ToolSpec) -> Vec<serde_json::Value> {
        spec.sorted()
            .into_iter()
            .map(|tool| self.tool_to_schema(tool))
            .collect()
    }
}
