//! Stub tool executors for handler and server tests.

use async_trait::async_trait;
use gdrive_application::{Credentials, ToolExecutorFactory, ToolExecutorPort, ToolSchemaPort};
use gdrive_domain::{ToolCall, ToolDefinition, ToolError, ToolKind, ToolResult, ToolSpec};
use serde_json::{Value, json};
use std::sync::Arc;

/// `echo` answers `<caller>:<text>`, where caller is the refresh token in
/// use or `default`. `fail` always fails.
pub struct StubExecutor {
    spec: ToolSpec,
    caller: String,
}

impl StubExecutor {
    fn new(caller: impl Into<String>) -> Self {
        Self {
            spec: ToolSpec::new()
                .register(ToolDefinition::new("fail", "Always fails", ToolKind::Write))
                .register(ToolDefinition::new("echo", "Echo text", ToolKind::Read)),
            caller: caller.into(),
        }
    }
}

#[async_trait]
impl ToolExecutorPort for StubExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        match call.tool_name.as_str() {
            "echo" => ToolResult::success(
                "echo",
                format!("{}:{}", self.caller, call.get_string("text").unwrap_or("")),
            ),
            "fail" => ToolResult::failure("fail", ToolError::execution_failed("boom")),
            other => ToolResult::failure(other, ToolError::unknown_tool(other)),
        }
    }
}

pub struct StubFactory;

impl ToolExecutorFactory for StubFactory {
    fn default_executor(&self) -> Arc<dyn ToolExecutorPort> {
        Arc::new(StubExecutor::new("default"))
    }

    fn executor_with(&self, overrides: &Credentials) -> Arc<dyn ToolExecutorPort> {
        match &overrides.refresh_token {
            Some(token) => Arc::new(StubExecutor::new(token.clone())),
            None => self.default_executor(),
        }
    }
}

/// Lists tools by name only
pub struct StubSchema;

impl ToolSchemaPort for StubSchema {
    fn input_schema(&self, _tool: &ToolDefinition) -> Value {
        json!({"type": "object"})
    }

    fn tool_to_schema(&self, tool: &ToolDefinition) -> Value {
        json!({"name": tool.name})
    }
}
