//! Shared drive administration tools

use super::common::{
    PageArgs, ToolOutcome, ToolOutput, page_size_param, page_token_param, parse, string_param,
    tool_error,
};
use super::executor::DriveContext;
use gdrive_application::{
    SearchFilesUseCase, SharedDriveUpdate, SharedDrivesUseCase, render_file_page,
};
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter};
use serde::Deserialize;

pub const LIST_SHARED_DRIVES: &str = "gdrive_list_shared_drives";
pub const GET_SHARED_DRIVE: &str = "gdrive_get_shared_drive";
pub const CREATE_SHARED_DRIVE: &str = "gdrive_create_shared_drive";
pub const UPDATE_SHARED_DRIVE: &str = "gdrive_update_shared_drive";
pub const DELETE_SHARED_DRIVE: &str = "gdrive_delete_shared_drive";
pub const LIST_SHARED_DRIVE_FILES: &str = "gdrive_list_shared_drive_files";

fn drive_id_param() -> ToolParameter {
    string_param("driveId", "ID of the shared drive", true)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_SHARED_DRIVES,
            "List the shared drives you are a member of",
            ToolKind::Read,
        )
        .with_parameter(page_size_param())
        .with_parameter(page_token_param()),
        ToolDefinition::new(GET_SHARED_DRIVE, "Get a shared drive", ToolKind::Read)
            .with_parameter(drive_id_param()),
        ToolDefinition::new(CREATE_SHARED_DRIVE, "Create a shared drive", ToolKind::Write)
            .with_parameter(string_param("name", "Name of the shared drive", true)),
        ToolDefinition::new(
            UPDATE_SHARED_DRIVE,
            "Rename a shared drive or change its color",
            ToolKind::Write,
        )
        .with_parameter(drive_id_param())
        .with_parameter(string_param("name", "New name", false))
        .with_parameter(string_param("colorRgb", "New color, e.g. #4285f4", false)),
        ToolDefinition::new(
            DELETE_SHARED_DRIVE,
            "Delete an empty shared drive",
            ToolKind::Destructive,
        )
        .with_parameter(drive_id_param()),
        ToolDefinition::new(
            LIST_SHARED_DRIVE_FILES,
            "List the files of a shared drive",
            ToolKind::Read,
        )
        .with_parameter(drive_id_param())
        .with_parameter(page_size_param())
        .with_parameter(page_token_param()),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveArgs {
    drive_id: String,
}

#[derive(Deserialize)]
struct CreateArgs {
    name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    drive_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    color_rgb: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveFilesArgs {
    drive_id: String,
    #[serde(flatten)]
    page: PageArgs,
}

/// Run a shared drive tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let drives = SharedDrivesUseCase::new(ctx.gateway(), ctx.params.clone());
    let outcome = match call.tool_name.as_str() {
        LIST_SHARED_DRIVES => list(&drives, call).await,
        GET_SHARED_DRIVE => get(&drives, call).await,
        CREATE_SHARED_DRIVE => create(&drives, call).await,
        UPDATE_SHARED_DRIVE => update(&drives, call).await,
        DELETE_SHARED_DRIVE => delete(&drives, call).await,
        LIST_SHARED_DRIVE_FILES => list_files(ctx, call).await,
        _ => return None,
    };
    Some(outcome)
}

async fn list(drives: &SharedDrivesUseCase, call: &ToolCall) -> ToolOutcome {
    let args: PageArgs = parse(call)?;
    let page = drives.list(args.into()).await.map_err(tool_error)?;
    ToolOutput::json(&page)
}

async fn get(drives: &SharedDrivesUseCase, call: &ToolCall) -> ToolOutcome {
    let args: DriveArgs = parse(call)?;
    let drive = drives.get(&args.drive_id).await.map_err(tool_error)?;
    ToolOutput::json(&drive)
}

async fn create(drives: &SharedDrivesUseCase, call: &ToolCall) -> ToolOutcome {
    let args: CreateArgs = parse(call)?;
    let drive = drives.create(&args.name).await.map_err(tool_error)?;
    ToolOutput::json(&drive)
}

async fn update(drives: &SharedDrivesUseCase, call: &ToolCall) -> ToolOutcome {
    let args: UpdateArgs = parse(call)?;
    let update = SharedDriveUpdate {
        name: args.name.filter(|n| !n.trim().is_empty()),
        color_rgb: args.color_rgb.filter(|c| !c.trim().is_empty()),
    };
    let drive = drives
        .update(&args.drive_id, update)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&drive)
}

async fn delete(drives: &SharedDrivesUseCase, call: &ToolCall) -> ToolOutcome {
    let args: DriveArgs = parse(call)?;
    drives.delete(&args.drive_id).await.map_err(tool_error)?;
    Ok(ToolOutput::text(format!(
        "Shared drive {} deleted",
        args.drive_id.trim()
    )))
}

async fn list_files(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: DriveFilesArgs = parse(call)?;
    let page = SearchFilesUseCase::new(ctx.gateway(), ctx.params.clone())
        .list_shared_drive_files(&args.drive_id, args.page.into())
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(render_file_page(&page)))
}
