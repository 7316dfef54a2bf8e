//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Effect a tool has on the remote drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// Read-only (search, metadata, content, listings)
    Read,
    /// Creates or modifies resources
    Write,
    /// Removes resources or access (delete, empty trash, revoke)
    Destructive,
}

impl ToolKind {
    pub fn as_str(&self) -> &str {
        match self {
            ToolKind::Read => "read",
            ToolKind::Write => "write",
            ToolKind::Destructive => "destructive",
        }
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self, ToolKind::Read)
    }

    pub fn is_destructive(&self) -> bool {
        matches!(self, ToolKind::Destructive)
    }
}

impl std::fmt::Display for ToolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Definition of a tool exposed to the calling agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique name of the tool (e.g., "gdrive_search")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Effect on the remote drive
    pub kind: ToolKind,
    /// Parameter specifications
    pub parameters: Vec<ToolParameter>,
}

/// Parameter specification for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Parameter type hint ("string", "integer", "number", "boolean", "array", "object")
    pub param_type: String,
    /// JSON Schema of array items (only for `array` parameters)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<serde_json::Value>,
    /// Allowed values for enumerated string parameters
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
}

impl ToolDefinition {
    pub fn new(name: impl Into<String>, description: impl Into<String>, kind: ToolKind) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            kind,
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.parameters.push(param);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn is_read_only(&self) -> bool {
        self.kind.is_read_only()
    }
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: "string".to_string(),
            items: None,
            enum_values: Vec::new(),
        }
    }

    pub fn with_type(mut self, param_type: impl Into<String>) -> Self {
        self.param_type = param_type.into();
        self
    }

    /// Mark as an array parameter whose items follow `items` (a JSON Schema)
    pub fn with_items(mut self, items: serde_json::Value) -> Self {
        self.param_type = "array".to_string();
        self.items = Some(items);
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// Immutable set of tools, built once at start-up
#[derive(Debug, Clone, Default)]
pub struct ToolSpec {
    tools: HashMap<String, ToolDefinition>,
}

impl ToolSpec {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    pub fn register(mut self, tool: ToolDefinition) -> Self {
        self.tools.insert(tool.name.clone(), tool);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn all(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values()
    }

    /// All definitions sorted by name
    pub fn sorted(&self) -> Vec<&ToolDefinition> {
        let mut tools: Vec<&ToolDefinition> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name));
        tools
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn read_only_tools(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().filter(|t| t.is_read_only())
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    pub arguments: BTreeMap<String, serde_json::Value>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: BTreeMap::new(),
        }
    }

    /// Build a call from a JSON object of arguments.
    ///
    /// `null` means "no arguments"; any other non-object value is rejected.
    pub fn from_json(
        tool_name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Result<Self, String> {
        let arguments = match arguments {
            serde_json::Value::Null => BTreeMap::new(),
            serde_json::Value::Object(map) => map.into_iter().collect(),
            other => {
                return Err(format!(
                    "Tool arguments must be a JSON object, got {}",
                    json_type_name(&other)
                ));
            }
        };
        Ok(Self {
            tool_name: tool_name.into(),
            arguments,
        })
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Get a required string argument or return an error message
    pub fn require_string(&self, key: &str) -> Result<&str, String> {
        self.get_string(key)
            .ok_or_else(|| format!("Missing required argument: {}", key))
    }

    /// Arguments as a JSON object, for typed deserialization
    pub fn arguments_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.arguments
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

/// JSON type name as used in JSON Schema
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_kind() {
        assert!(ToolKind::Read.is_read_only());
        assert!(!ToolKind::Write.is_read_only());
        assert!(ToolKind::Destructive.is_destructive());
        assert_eq!(ToolKind::Write.to_string(), "write");
    }

    #[test]
    fn test_tool_definition() {
        let tool = ToolDefinition::new("gdrive_get_metadata", "Get file metadata", ToolKind::Read)
            .with_parameter(ToolParameter::new("fileId", "ID of the file", true));

        assert_eq!(tool.name, "gdrive_get_metadata");
        assert!(tool.is_read_only());
        assert_eq!(tool.parameters.len(), 1);
        assert!(tool.parameter("fileId").is_some());
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_array_parameter() {
        let param =
            ToolParameter::new("fileIds", "Files", true).with_items(json!({"type": "string"}));
        assert_eq!(param.param_type, "array");
        assert_eq!(param.items, Some(json!({"type": "string"})));
    }

    #[test]
    fn test_tool_spec() {
        let spec = ToolSpec::new()
            .register(ToolDefinition::new("gdrive_search", "Search", ToolKind::Read))
            .register(ToolDefinition::new("gdrive_delete_file", "Delete", ToolKind::Destructive));

        assert!(spec.get("gdrive_search").is_some());
        assert!(spec.get("unknown").is_none());
        assert_eq!(spec.len(), 2);
        assert_eq!(spec.read_only_tools().count(), 1);

        let sorted: Vec<&str> = spec.sorted().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(sorted, vec!["gdrive_delete_file", "gdrive_search"]);
    }

    #[test]
    fn test_tool_call_from_json() {
        let call = ToolCall::from_json("gdrive_search", json!({"query": "report"})).unwrap();
        assert_eq!(call.get_string("query"), Some("report"));
        assert!(call.require_string("pageToken").is_err());

        let empty = ToolCall::from_json("gdrive_get_quota", serde_json::Value::Null).unwrap();
        assert!(empty.arguments.is_empty());

        let err = ToolCall::from_json("gdrive_search", json!(["nope"])).unwrap_err();
        assert!(err.contains("array"));
    }

    #[test]
    fn test_json_type_name() {
        assert_eq!(json_type_name(&json!(3)), "integer");
        assert_eq!(json_type_name(&json!(3.5)), "number");
        assert_eq!(json_type_name(&json!(true)), "boolean");
        assert_eq!(json_type_name(&json!({})), "object");
    }
}
