//! Permission tools: share, list, update, revoke, domain and public access

use super::common::{
    ToolOutcome, ToolOutput, bool_param, file_id_param, parse, role_param, string_param,
    tool_error,
};
use super::executor::DriveContext;
use gdrive_application::{PermissionsUseCase, ShareInput};
use gdrive_domain::tool::entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter};
use gdrive_domain::{GranteeType, Role};
use serde::Deserialize;

pub const SHARE_FILE: &str = "gdrive_share_file";
pub const LIST_PERMISSIONS: &str = "gdrive_list_permissions";
pub const UPDATE_PERMISSION: &str = "gdrive_update_permission";
pub const DELETE_PERMISSION: &str = "gdrive_delete_permission";
pub const ADD_DOMAIN_ACCESS: &str = "gdrive_add_domain_access";
pub const ADD_PUBLIC_ACCESS: &str = "gdrive_add_public_access";

fn permission_id_param() -> ToolParameter {
    string_param("permissionId", "ID of the permission", true)
}

fn discovery_param() -> ToolParameter {
    bool_param(
        "allowDiscovery",
        "Whether the file can be found through search (default false)",
    )
}

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            SHARE_FILE,
            "Share a file with a user or group. The owner role transfers ownership.",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(string_param(
            "emailAddress",
            "Email address of the user or group",
            true,
        ))
        .with_parameter(role_param("Access level to grant", &Role::ALL))
        .with_parameter(
            string_param("type", "Grantee type (default user)", false)
                .with_enum(["user", "group"]),
        )
        .with_parameter(bool_param(
            "sendNotification",
            "Whether to email the grantee",
        ))
        .with_parameter(string_param(
            "emailMessage",
            "Message included in the notification email",
            false,
        )),
        ToolDefinition::new(
            LIST_PERMISSIONS,
            "List who has access to a file",
            ToolKind::Read,
        )
        .with_parameter(file_id_param()),
        ToolDefinition::new(
            UPDATE_PERMISSION,
            "Change the role of a permission",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(permission_id_param())
        .with_parameter(role_param("New access level", &Role::ALL)),
        ToolDefinition::new(
            DELETE_PERMISSION,
            "Revoke a permission",
            ToolKind::Destructive,
        )
        .with_parameter(file_id_param())
        .with_parameter(permission_id_param()),
        ToolDefinition::new(
            ADD_DOMAIN_ACCESS,
            "Give everyone in a domain access to a file",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(string_param("domain", "Domain name, e.g. example.com", true))
        .with_parameter(role_param("Access level to grant", &Role::BROAD))
        .with_parameter(discovery_param()),
        ToolDefinition::new(
            ADD_PUBLIC_ACCESS,
            "Give anyone with the link access to a file",
            ToolKind::Write,
        )
        .with_parameter(file_id_param())
        .with_parameter(role_param("Access level to grant", &Role::BROAD))
        .with_parameter(discovery_param()),
    ]
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ShareArgs {
    file_id: String,
    email_address: String,
    role: Role,
    #[serde(default, rename = "type")]
    grantee_type: Option<GranteeType>,
    #[serde(default)]
    send_notification: Option<bool>,
    #[serde(default)]
    email_message: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileArgs {
    file_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateArgs {
    file_id: String,
    permission_id: String,
    role: Role,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteArgs {
    file_id: String,
    permission_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainArgs {
    file_id: String,
    domain: String,
    role: Role,
    #[serde(default)]
    allow_discovery: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublicArgs {
    file_id: String,
    role: Role,
    #[serde(default)]
    allow_discovery: bool,
}

/// Run a permission tool; `None` when the call belongs to another family
pub async fn execute(ctx: &DriveContext, call: &ToolCall) -> Option<ToolOutcome> {
    let permissions = PermissionsUseCase::new(ctx.gateway());
    let outcome = match call.tool_name.as_str() {
        SHARE_FILE => share(&permissions, call).await,
        LIST_PERMISSIONS => list(&permissions, call).await,
        UPDATE_PERMISSION => update(&permissions, call).await,
        DELETE_PERMISSION => delete(&permissions, call).await,
        ADD_DOMAIN_ACCESS => add_domain_access(&permissions, call).await,
        ADD_PUBLIC_ACCESS => add_public_access(&permissions, call).await,
        _ => return None,
    };
    Some(outcome)
}

async fn share(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: ShareArgs = parse(call)?;
    let input = ShareInput {
        file_id: args.file_id,
        email_address: args.email_address,
        role: args.role,
        grantee_type: args.grantee_type.unwrap_or(GranteeType::User),
        send_notification: args.send_notification,
        email_message: args.email_message,
    };
    let permission = permissions.share(input).await.map_err(tool_error)?;
    ToolOutput::json(&permission)
}

async fn list(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: FileArgs = parse(call)?;
    let list = permissions.list(&args.file_id).await.map_err(tool_error)?;
    ToolOutput::json(&list)
}

async fn update(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: UpdateArgs = parse(call)?;
    let permission = permissions
        .update(&args.file_id, &args.permission_id, args.role)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&permission)
}

async fn delete(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: DeleteArgs = parse(call)?;
    permissions
        .delete(&args.file_id, &args.permission_id)
        .await
        .map_err(tool_error)?;
    Ok(ToolOutput::text(format!(
        "Permission {} removed from file {}",
        args.permission_id.trim(),
        args.file_id.trim()
    )))
}

async fn add_domain_access(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: DomainArgs = parse(call)?;
    let permission = permissions
        .add_domain_access(&args.file_id, &args.domain, args.role, args.allow_discovery)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&permission)
}

async fn add_public_access(permissions: &PermissionsUseCase, call: &ToolCall) -> ToolOutcome {
    let args: PublicArgs = parse(call)?;
    let permission = permissions
        .add_public_access(&args.file_id, args.role, args.allow_discovery)
        .await
        .map_err(tool_error)?;
    ToolOutput::json(&permission)
}
