//! Batch tools.
//!
//! Each batch fans its operations out through the application's
//! `BatchExecutor` and returns `{ results, summary }`. Per-item failures
//! are reported in the results; only malformed input fails the whole call.

use super::common::{ToolOutcome, ToolOutput, bool_param, parse, string_array_param, tool_error};
use super::executor::DriveContext;
use gdrive_application::BatchUseCase;
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter};
use gdrive_domain::{BatchReport, CopyRequest, FileTarget, MoveRequest, PermissionUpdate, Role};
use serde::Deserialize;
use serde_json::json;

pub const BATCH_GET_METADATA: &str = "gdrive_batch_get_metadata";
pub const BATCH_UPDATE_PERMISSIONS: &str = "gdrive_batch_update_permissions";
pub const BATCH_DELETE: &str = "gdrive_batch_delete";
pub const BATCH_COPY: &str = "gdrive_batch_copy";
pub const BATCH_MOVE: &str = "gdrive_batch_move";

fn object_array_param(name: &str, description: &str, items: serde_json::Value) -> ToolParameter {
    ToolParameter::new(name, description, true)
        .with_type("array")
        .with_items(items)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            BATCH_GET_METADATA,
            "Get the metadata of several files at once",
            ToolKind::Read,
        )
        .with_parameter(string_array_param("fileIds", "IDs of the files")),
        ToolDefinition::new(
            BATCH_UPDATE_PERMISSIONS,
            "Change the role of several permissions at once",
            ToolKind::Write,
        )
        .with_parameter(object_array_param(
            "updates",
            "Permission changes",
            json!({
                "type": "object",
                "properties": {
                    "fileId": { "type": "string" },
                    "permissionId": { "type": "string" },
                    "role": { "type": "string", "enum": Role::names(&Role::ALL) }
                },
                "required": ["fileId", "permissionId", "role"]
            }),
        )),
        ToolDefinition::new(
            BATCH_DELETE,
            "Trash (or permanently delete) several files at once",
            ToolKind::Destructive,
        )
        .with_parameter(string_array_param("fileIds", "IDs of the files"))
        .with_parameter(bool_param(
            "permanent",
            "Delete permanently instead of trashing (default false)",
        )),
        ToolDefinition::new(BATCH_COPY, "Copy several files at once", ToolKind::Write)
            .with_parameter(object_array_param(
                "copies",
                "Files to copy",
                json!({
                    "type": "object",
                    "properties": {
                        "fileId": { "type": "string" },
                        "name": { "type": "string" },
                        "parentId": { "type": "string" }
                    },
                    "required": ["fileId"]
                }),
            )),
        ToolDefinition::new(
            BATCH_MOVE,
            "Move several files to new folders at once",
            ToolKind::Write,
        )
        .with_parameter(object_array_param(
            "moves",
            "Files to move",
            json!({
                "type": "object",
                "properties": {
                    "fileId": { "type": "string" },
                    "newParentId": { "type": "string" }
                },
                "required": ["fileId", "newParentId"]
            }),
        )),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileIdsArgs {
    file_ids: Vec<FileTarget>,
    #[serde(default)]
    permanent: bool,
}

#[derive(Deserialize)]
struct UpdatesArgs {
    updates: Vec<PermissionUpdate>,
}

#[derive(Deserialize)]
struct CopiesArgs {
    copies: Vec<CopyRequest>,
}

#[derive(Deserialize)]
struct MovesArgs {
    moves: Vec<MoveRequest>,
}

/// Run a batch tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let batch = BatchUseCase::new(ctx.gateway(), &ctx.params);
    let report = match call.tool_name.as_str() {
        BATCH_GET_METADATA => match parse::<FileIdsArgs>(call) {
            Ok(args) => batch.get_metadata(args.file_ids).await,
            Err(e) => return Some(Err(e)),
        },
        BATCH_UPDATE_PERMISSIONS => match parse::<UpdatesArgs>(call) {
            Ok(args) => batch.update_permissions(args.updates).await,
            Err(e) => return Some(Err(e)),
        },
        BATCH_DELETE => match parse::<FileIdsArgs>(call) {
            Ok(args) => batch.delete(args.file_ids, args.permanent).await,
            Err(e) => return Some(Err(e)),
        },
        BATCH_COPY => match parse::<CopiesArgs>(call) {
            Ok(args) => batch.copy(args.copies).await,
            Err(e) => return Some(Err(e)),
        },
        BATCH_MOVE => match parse::<MovesArgs>(call) {
            Ok(args) => batch.move_files(args.moves).await,
            Err(e) => return Some(Err(e)),
        },
        _ => return None,
    };
    Some(report.map_err(tool_error).and_then(render))
}

fn render(report: BatchReport) -> ToolOutcome {
    let total = report.summary.total_operations;
    Ok(ToolOutput::json(&report)?.with_operation_count(total))
}
