//! Tool Executor port
//!
//! Defines the interface for executing Drive tools.

use crate::config::Credentials;
use async_trait::async_trait;
use gdrive_domain::tool::{
    entities::{ToolCall, ToolDefinition, ToolSpec},
    value_objects::ToolResult,
};
use std::sync::Arc;

/// Port for tool execution
///
/// This port defines how the outer layers execute tools.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Get the specification of all available tools
    fn tool_spec(&self) -> &ToolSpec;

    /// Check if a tool is available
    fn has_tool(&self, name: &str) -> bool {
        self.tool_spec().get(name).is_some()
    }

    /// Get the definition of a specific tool
    fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tool_spec().get(name)
    }

    /// Get names of all available tools
    fn available_tools(&self) -> Vec<&str> {
        self.tool_spec().names().collect()
    }

    /// Execute a tool call.
    ///
    /// Never panics or errors: every failure is reported in the result.
    async fn execute(&self, call: &ToolCall) -> ToolResult;
}

/// Builds tool executors bound to a set of credentials
///
/// The server keeps one executor for process-level credentials and asks for
/// a fresh one when an invocation carries its own credentials.
pub trait ToolExecutorFactory: Send + Sync {
    /// Executor using the process-level credentials
    fn default_executor(&self) -> Arc<dyn ToolExecutorPort>;

    /// Executor using `overrides` layered over the process-level credentials
    fn executor_with(&self, overrides: &Credentials) -> Arc<dyn ToolExecutorPort>;
}
