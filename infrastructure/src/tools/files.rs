//! File tools: search, listing, reading, writing and trash management

use super::common::{
    PageArgs, ToolOutcome, ToolOutput, bool_param, file_id_param, page_size_param,
    page_token_param, parse, string_param, tool_error,
};
use super::executor::DriveContext;
use gdrive_application::{
    CreateFileInput, DeleteMode, ManageFilesUseCase, ReadFileUseCase, SearchFilesUseCase,
    UploadInput, WriteContentUseCase, render_file_page,
};
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind};
use serde::Deserialize;

pub const SEARCH: &str = "gdrive_search";
pub const LIST_FOLDER: &str = "gdrive_list_folder";
pub const LIST_CHANGES: &str = "gdrive_list_changes";
pub const GET_METADATA: &str = "gdrive_get_metadata";
pub const READ_FILE: &str = "gdrive_read_file";
pub const LIST_REVISIONS: &str = "gdrive_list_revisions";
pub const CREATE_FILE: &str = "gdrive_create_file";
pub const CREATE_FOLDER: &str = "gdrive_create_folder";
pub const UPLOAD_FILE: &str = "gdrive_upload_file";
pub const APPEND_TEXT: &str = "gdrive_append_text";
pub const RENAME_FILE: &str = "gdrive_rename_file";
pub const COPY_FILE: &str = "gdrive_copy_file";
pub const MOVE_FILE: &str = "gdrive_move_file";
pub const STAR_FILE: &str = "gdrive_star_file";
pub const RESTORE_FILE: &str = "gdrive_restore_file";
pub const LOCK_FILE: &str = "gdrive_lock_file";
pub const DELETE_FILE: &str = "gdrive_delete_file";
pub const EMPTY_TRASH: &str = "gdrive_empty_trash";

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            SEARCH,
            "Search for files by name. Mentioning \"sheet\" also matches spreadsheets.",
            ToolKind::Read,
        )
        .with_parameter(string_param("query", "Text to look for in file names", true))
        .with_parameter(page_size_param())
        .with_parameter(page_token_param()),
        ToolDefinition::new(
            LIST_FOLDER,
            "List the files in a folder (the root folder when none is given)",
            ToolKind::Read,
        )
        .with_parameter(string_param("folderId", "ID of the folder", false))
        .with_parameter(page_size_param())
        .with_parameter(page_token_param()),
        ToolDefinition::new(
            LIST_CHANGES,
            "List changes to files. Without a pageToken, starts from now and returns the token to poll with.",
            ToolKind::Read,
        )
        .with_parameter(page_token_param())
        .with_parameter(page_size_param()),
        ToolDefinition::new(GET_METADATA, "Get the metadata of a file", ToolKind::Read)
            .with_parameter(file_id_param()),
        ToolDefinition::new(
            READ_FILE,
            "Read the contents of a file. Google documents are exported (Docs as Markdown, Sheets as CSV).",
            ToolKind::Read,
        )
        .with_parameter(file_id_param()),
        ToolDefinition::new(LIST_REVISIONS, "List the revisions of a file", ToolKind::Read)
            .with_parameter(file_id_param())
            .with_parameter(page_size_param())
            .with_parameter(page_token_param()),
        ToolDefinition::new(
            CREATE_FILE,
            "Create a file with text content. A Google document MIME type converts the content.",
            ToolKind::Write,
        )
        .with_parameter(string_param("name", "Name of the new file", true))
        .with_parameter(string_param("content", "Text content", false))
        .with_parameter(string_param("mimeType", "MIME type (default text/plain)", false))
        .with_parameter(string_param("parentId", "ID of the parent folder", false))
        .with_parameter(string_param("description", "File description", false)),
        ToolDefinition::new(CREATE_FOLDER, "Create a folder", ToolKind::Write)
            .with_parameter(string_param("name", "Name of the new folder", true))
            .with_parameter(string_param("parentId", "ID of the parent folder", false)),
        ToolDefinition::new(UPLOAD_FILE, "Upload binary content", ToolKind::Write)
            .with_parameter(string_param("name", "Name of the new file", true))
            .with_parameter(string_param("content", "Base64-encoded file content", true))
            .with_parameter(string_param("mimeType", "MIME type of the content", false))
            .with_parameter(string_param("parentId", "ID of the parent folder", false)),
        ToolDefinition::new(
            APPEND_TEXT,
            "Append text to a text file or Google Doc. Fails with a conflict if the file changes meanwhile.",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(string_param("text", "Text to append", true)),
        ToolDefinition::new(RENAME_FILE, "Rename a file", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(string_param("newName", "New name", true)),
        ToolDefinition::new(COPY_FILE, "Copy a file", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(string_param("name", "Name of the copy", false))
            .with_parameter(string_param("parentId", "Folder to place the copy in", false)),
        ToolDefinition::new(MOVE_FILE, "Move a file to another folder", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(string_param("newParentId", "ID of the destination folder", true)),
        ToolDefinition::new(STAR_FILE, "Star or unstar a file", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(bool_param("starred", "Whether the file is starred (default true)")),
        ToolDefinition::new(RESTORE_FILE, "Restore a file from the trash", ToolKind::Write)
            .with_parameter(file_id_param()),
        ToolDefinition::new(
            LOCK_FILE,
            "Lock a file's content against edits, or unlock it",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(bool_param("locked", "Lock (true, default) or unlock (false)"))
        .with_parameter(string_param("reason", "Reason shown to editors", false)),
        ToolDefinition::new(
            DELETE_FILE,
            "Move a file to the trash, or delete it permanently",
            ToolKind::Destructive,
        )
        .with_parameter(file_id_param())
        .with_parameter(bool_param(
            "permanent",
            "Delete permanently instead of trashing (default false)",
        )),
        ToolDefinition::new(
            EMPTY_TRASH,
            "Permanently delete every file in the trash",
            ToolKind::Destructive,
        ),
    ]
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FolderArgs {
    #[serde(default)]
    folder_id: Option<String>,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileArgs {
    file_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilePageArgs {
    file_id: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFileArgs {
    name: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateFolderArgs {
    name: String,
    #[serde(default)]
    parent_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadArgs {
    name: String,
    content: String,
    #[serde(default)]
    mime_type: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppendArgs {
    file_id: String,
    text: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RenameArgs {
    file_id: String,
    new_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CopyArgs {
    file_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    parent_id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MoveArgs {
    file_id: String,
    new_parent_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StarArgs {
    file_id: String,
    #[serde(default)]
    starred: Option<bool>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LockArgs {
    file_id: String,
    #[serde(default)]
    locked: Option<bool>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteArgs {
    file_id: String,
    #[serde(default)]
    permanent: bool,
}

/// Run a file tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let outcome = match call.tool_name.as_str() {
        SEARCH => search(ctx, call).await,
        LIST_FOLDER => list_folder(ctx, call).await,
        LIST_CHANGES => list_changes(ctx, call).await,
        GET_METADATA => get_metadata(ctx, call).await,
        READ_FILE => read_file(ctx, call).await,
        LIST_REVISIONS => list_revisions(ctx, call).await,
        CREATE_FILE => create_file(ctx, call).await,
        CREATE_FOLDER => create_folder(ctx, call).await,
        UPLOAD_FILE => upload_file(ctx, call).await,
        APPEND_TEXT => append_text(ctx, call).await,
        RENAME_FILE | COPY_FILE | MOVE_FILE | STAR_FILE | RESTORE_FILE | LOCK_FILE => {
            manage(ctx, call).await
        }
        DELETE_FILE => delete_file(ctx, call).await,
        EMPTY_TRASH => empty_trash(ctx).await,
        _ => return None,
    };
    Some(outcome)
}

fn search_use_case(ctx: &DriveContext) -> SearchFilesUseCase {
    SearchFilesUseCase::new(ctx.gateway(), ctx.params.clone())
}

fn read_use_case(ctx: &DriveContext) -> ReadFileUseCase {
    ReadFileUseCase::new(ctx.gateway(), ctx.params.clone())
}

async fn search(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: SearchArgs = parse(call)?;
    let page = search_use_case(ctx)
        .search(&args.query, args.page.into())
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(render_file_page(&page)))
}

async fn list_folder(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: FolderArgs = parse(call)?;
    let page = search_use_case(ctx)
        .list_folder(args.folder_id.as_deref(), args.page.into())
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(render_file_page(&page)))
}

async fn list_changes(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: PageArgs = parse(call)?;
    let changes = search_use_case(ctx)
        .list_changes(args.into())
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&changes)
}

async fn get_metadata(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: FileArgs = parse(call)?;
    let file = read_use_case(ctx)
        .get_metadata(&args.file_id)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&file)
}

async fn read_file(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: FileArgs = parse(call)?;
    let output = read_use_case(ctx)
        .read(&args.file_id)
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(output.render()))
}

async fn list_revisions(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: FilePageArgs = parse(call)?;
    let revisions = read_use_case(ctx)
        .list_revisions(&args.file_id, args.page.into())
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&revisions)
}

async fn create_file(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: CreateFileArgs = parse(call)?;
    let input = CreateFileInput {
        name: args.name,
        content: args.content,
        mime_type: args.mime_type,
        parent_id: args.parent_id,
        description: args.description,
    };
    let file = WriteContentUseCase::new(ctx.gateway())
        .create_file(input)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&file)
}

async fn create_folder(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: CreateFolderArgs = parse(call)?;
    let folder = WriteContentUseCase::new(ctx.gateway())
        .create_folder(&args.name, args.parent_id.as_deref())
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&folder)
}

async fn upload_file(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: UploadArgs = parse(call)?;
    let input = UploadInput {
        name: args.name,
        content_base64: args.content,
        mime_type: args.mime_type,
        parent_id: args.parent_id,
    };
    let file = WriteContentUseCase::new(ctx.gateway())
        .upload(input)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&file)
}

async fn append_text(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: AppendArgs = parse(call)?;
    let file = WriteContentUseCase::new(ctx.gateway())
        .append_text(&args.file_id, &args.text)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&file)
}

async fn manage(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let files = ManageFilesUseCase::new(ctx.gateway());
    let file = match call.tool_name.as_str() {
        RENAME_FILE => {
            let args: RenameArgs = parse(call)?;
            files.rename(&args.file_id, &args.new_name).await
        }
        COPY_FILE => {
            let args: CopyArgs = parse(call)?;
            files.copy(&args.file_id, args.name, args.parent_id).await
        }
        MOVE_FILE => {
            let args: MoveArgs = parse(call)?;
            files.move_file(&args.file_id, &args.new_parent_id).await
        }
        STAR_FILE => {
            let args: StarArgs = parse(call)?;
            files.star(&args.file_id, args.starred.unwrap_or(true)).await
        }
        RESTORE_FILE => {
            let args: FileArgs = parse(call)?;
            files.restore(&args.file_id).await
        }
        _ => {
            let args: LockArgs = parse(call)?;
            files
                .lock(&args.file_id, args.locked.unwrap_or(true), args.reason)
                .await
        }
    }
    .map_err(tool_error)?;
    ToolOutput::json(&file)
}

async fn delete_file(ctx: &DriveContext, call: &ToolCall) -> ToolOutcome {
    let args: DeleteArgs = parse(call)?;
    let mode = ManageFilesUseCase::new(ctx.gateway())
        .delete(&args.file_id, args.permanent)
        .await
        .map_err(tool_error)?;
    let file_id = args.file_id.trim();
    Ok(ToolOutput::text(match mode {
        DeleteMode::Trash => format!("File {} moved to trash", file_id),
        DeleteMode::Delete => format!("File {} permanently deleted", file_id),
    }))
}

async fn empty_trash(ctx: &DriveContext) -> ToolOutcome {
    ManageFilesUseCase::new(ctx.gateway())
        .empty_trash()
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text("Trash emptied"))
}
