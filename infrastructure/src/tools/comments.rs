//! Comment and reply tools

use super::common::{
    PageArgs, ToolOutcome, ToolOutput, file_id_param, page_size_param, page_token_param, parse,
    string_param, tool_error,
};
use super::executor::DriveContext;
use gdrive_application::CommentsUseCase;
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter};
use serde::Deserialize;

pub const ADD_COMMENT: &str = "gdrive_add_comment";
pub const LIST_COMMENTS: &str = "gdrive_list_comments";
pub const DELETE_COMMENT: &str = "gdrive_delete_comment";
pub const REPLY_TO_COMMENT: &str = "gdrive_reply_to_comment";
pub const LIST_REPLIES: &str = "gdrive_list_replies";
pub const DELETE_REPLY: &str = "gdrive_delete_reply";

fn comment_id_param() -> ToolParameter {
    string_param("commentId", "ID of the comment", true)
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(ADD_COMMENT, "Add a comment to a file", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(string_param("content", "Comment text", true)),
        ToolDefinition::new(LIST_COMMENTS, "List the comments on a file", ToolKind::Read)
            .with_parameter(file_id_param())
            .with_parameter(page_size_param())
            .with_parameter(page_token_param()),
        ToolDefinition::new(DELETE_COMMENT, "Delete a comment", ToolKind::Destructive)
            .with_parameter(file_id_param())
            .with_parameter(comment_id_param()),
        ToolDefinition::new(REPLY_TO_COMMENT, "Reply to a comment", ToolKind::Write)
            .with_parameter(file_id_param())
            .with_parameter(comment_id_param())
            .with_parameter(string_param("content", "Reply text", true)),
        ToolDefinition::new(LIST_REPLIES, "List the replies to a comment", ToolKind::Read)
            .with_parameter(file_id_param())
            .with_parameter(comment_id_param())
            .with_parameter(page_size_param())
            .with_parameter(page_token_param()),
        ToolDefinition::new(DELETE_REPLY, "Delete a reply", ToolKind::Destructive)
            .with_parameter(file_id_param())
            .with_parameter(comment_id_param())
            .with_parameter(string_param("replyId", "ID of the reply", true)),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddArgs {
    file_id: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListArgs {
    file_id: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentArgs {
    file_id: String,
    comment_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyArgs {
    file_id: String,
    comment_id: String,
    content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRepliesArgs {
    file_id: String,
    comment_id: String,
    #[serde(flatten)]
    page: PageArgs,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteReplyArgs {
    file_id: String,
    comment_id: String,
    reply_id: String,
}

/// Run a comment tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let comments = CommentsUseCase::new(ctx.gateway(), ctx.params.clone());
    let outcome = match call.tool_name.as_str() {
        ADD_COMMENT => add(&comments, call).await,
        LIST_COMMENTS => list(&comments, call).await,
        DELETE_COMMENT => delete(&comments, call).await,
        REPLY_TO_COMMENT => reply(&comments, call).await,
        LIST_REPLIES => list_replies(&comments, call).await,
        DELETE_REPLY => delete_reply(&comments, call).await,
        _ => return None,
    };
    Some(outcome)
}

async fn add(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: AddArgs = parse(call)?;
    let comment = comments
        .add(&args.file_id, &args.content)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&comment)
}

async fn list(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: ListArgs = parse(call)?;
    let page = comments
        .list(&args.file_id, args.page.into())
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&page)
}

async fn delete(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: CommentArgs = parse(call)?;
    comments
        .delete(&args.file_id, &args.comment_id)
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(format!(
        "Comment {} deleted",
        args.comment_id.trim()
    )))
}

async fn reply(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: ReplyArgs = parse(call)?;
    let reply = comments
        .reply(&args.file_id, &args.comment_id, &args.content)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&reply)
}

async fn list_replies(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: ListRepliesArgs = parse(call)?;
    let page = comments
        .list_replies(&args.file_id, &args.comment_id, args.page.into())
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&page)
}

async fn delete_reply(comments: &CommentsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: DeleteReplyArgs = parse(call)?;
    comments
        .delete_reply(&args.file_id, &args.comment_id, &args.reply_id)
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(format!("Reply {} deleted", args.reply_id.trim())))
}
