//! Storage quota tools

use super::common::{ToolOutcome, ToolOutput, tool_error};
use super::executor::DriveContext;
use gdrive_application::QuotaUseCase;
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind};

pub const GET_QUOTA: &str = "gdrive_get_quota";
pub const GET_USAGE_BREAKDOWN: &str = "gdrive_get_usage_breakdown";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            GET_QUOTA,
            "Get the storage quota and current usage of the account",
            ToolKind::Read,
        ),
        ToolDefinition::new(
            GET_USAGE_BREAKDOWN,
            "Total size of your files grouped by content type",
            ToolKind::Read,
        ),
    ]
}

/// Run a quota tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let quota = QuotaUseCase::new(ctx.gateway(), ctx.params.clone());
    let outcome = match call.tool_name.as_str() {
        GET_QUOTA => match quota.get_quota().await {
            Ok(report) => ToolOutput::json(&report),
            Err(e) => Err(tool_error(e)),
        },
        GET_USAGE_BREAKDOWN => match quota.usage_breakdown().await {
            Ok(usage) => ToolOutput::json(&usage),
            Err(e) => Err(tool_error(e)),
        },
        _ => return None,
    };
    Some(outcome)
}
