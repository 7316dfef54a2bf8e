//! Drive tool executor, the concrete implementation of [`ToolExecutorPort`].
//!
//! [`DriveToolExecutor`] validates a call against its definition, parses the
//! arguments into a typed record, runs the matching use case against a
//! [`DriveGateway`] and renders the result as text.
//!
//! ```text
//! ToolExecutorPort::execute()
//!   ├─ unknown tool?          → NOT_FOUND
//!   ├─ DefaultToolValidator   → INVALID_ARGUMENT
//!   └─ dispatch()             → files | permissions | comments
//!                               | shared_drives | quota | batch
//! ```

use super::common::ToolOutcome;
use super::{batch, comments, files, permissions, quota, shared_drives};
use async_trait::async_trait;
use gdrive_application::{DriveGateway, ToolExecutorPort, ToolParams};
use gdrive_domain::tool::{
    entities::{ToolCall, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

/// What every tool family needs to build its use cases
pub struct DriveContext {
    gateway: Arc<dyn DriveGateway>,
    pub params: ToolParams,
}

impl DriveContext {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    pub fn gateway(&self) -> Arc<dyn DriveGateway> {
        Arc::clone(&self.gateway)
    }
}

/// Executor running Drive tools against one gateway.
///
/// The gateway carries the credentials, so an executor is bound to one
/// account. See [`DriveToolExecutorFactory`](super::DriveToolExecutorFactory)
/// for per-invocation credentials.
pub struct DriveToolExecutor {
    tool_spec: ToolSpec,
    context: DriveContext,
}

impl DriveToolExecutor {
    /// Executor exposing every Drive tool
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self::with_tools(super::drive_tool_spec(), gateway, params)
    }

    /// Executor with a custom tool spec
    pub fn with_tools(
        tool_spec: ToolSpec,
        gateway: Arc<dyn DriveGateway>,
        params: ToolParams,
    ) -> Self {
        Self {
            tool_spec,
            context: DriveContext::new(gateway, params),
        }
    }

    async fn dispatch(&self, call: &ToolCall) -> ToolOutcome {
        let ctx = &self.context;
        if let Some(outcome) = files::execute(ctx, call).await {
            return outcome;
        }
        if let Some(outcome) = permissions::execute(ctx, call).await {
            return outcome;
        }
        if let Some(outcome) = comments::execute(ctx, call).await {
            return outcome;
        }
        if let Some(outcome) = shared_drives::execute(ctx, call).await {
            return outcome;
        }
        if let Some(outcome) = quota::execute(ctx, call).await {
            return outcome;
        }
        if let Some(outcome) = batch::execute(ctx, call).await {
            return outcome;
        }
        Err(ToolError::unknown_tool(&call.tool_name))
    }
}

#[async_trait]
impl ToolExecutorPort for DriveToolExecutor {
    fn tool_spec(&self) -> &ToolSpec {
        &self.tool_spec
    }

    async fn execute(&self, call: &ToolCall) -> ToolResult {
        let start = Instant::now();

        let Some(definition) = self.tool_spec.get(&call.tool_name) else {
            warn!("Unknown tool requested: {}", call.tool_name);
            return ToolResult::failure(&call.tool_name, ToolError::unknown_tool(&call.tool_name));
        };

        if let Err(e) = DefaultToolValidator.validate(call, definition) {
            return ToolResult::failure(&call.tool_name, ToolError::invalid_argument(e));
        }

        info!("Executing tool {}", call.tool_name);
        let result = match self.dispatch(call).await {
            Ok(output) => {
                let result = ToolResult::success(&call.tool_name, output.text);
                match output.operation_count {
                    Some(count) => result.with_operation_count(count),
                    None => result,
                }
            }
            Err(e) => {
                warn!("Tool {} failed: {}", call.tool_name, e);
                ToolResult::failure(&call.tool_name, e)
            }
        };

        result.with_duration(start.elapsed().as_millis() as u64)
    }
}
