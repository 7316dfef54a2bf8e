//! Drive Gateway port
//!
//! Defines the interface to the remote file-storage provider. Every call is
//! a single request/response exchange; no implementation retries.

use async_trait::async_trait;
use gdrive_domain::{
    About, ChangeList, Comment, DriveFile, NewPermission, Page, Permission, Reply, Revision, Role,
    SharedDrive,
};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during gateway operations
///
/// Provider-reported failures display the provider's own message verbatim.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl GatewayError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }
}

/// Parameters of a file listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileQuery {
    /// Query-language predicate (`q`)
    pub predicate: Option<String>,
    pub page_size: u32,
    pub page_token: Option<String>,
    pub order_by: Option<String>,
    /// Restrict the listing to one shared drive
    pub drive_id: Option<String>,
    /// Partial-response field selector for each file (`files(...)`)
    pub file_fields: Option<String>,
}

impl FileQuery {
    pub fn new(predicate: impl Into<String>, page_size: u32) -> Self {
        Self {
            predicate: Some(predicate.into()),
            page_size,
            ..Default::default()
        }
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }

    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn with_drive_id(mut self, drive_id: impl Into<String>) -> Self {
        self.drive_id = Some(drive_id.into());
        self
    }

    pub fn with_file_fields(mut self, fields: impl Into<String>) -> Self {
        self.file_fields = Some(fields.into());
        self
    }
}

/// Metadata of a file to create
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFile {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A content restriction (lock) on a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRestriction {
    pub read_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Partial update of a file's metadata; absent fields stay unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub starred: Option<bool>,
    pub trashed: Option<bool>,
    pub content_restriction: Option<ContentRestriction>,
    pub add_parents: Vec<String>,
    pub remove_parents: Vec<String>,
}

impl FileUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn starred(starred: bool) -> Self {
        Self {
            starred: Some(starred),
            ..Default::default()
        }
    }

    pub fn trashed(trashed: bool) -> Self {
        Self {
            trashed: Some(trashed),
            ..Default::default()
        }
    }

    pub fn restrict(restriction: ContentRestriction) -> Self {
        Self {
            content_restriction: Some(restriction),
            ..Default::default()
        }
    }

    pub fn move_to(add_parents: Vec<String>, remove_parents: Vec<String>) -> Self {
        Self {
            add_parents,
            remove_parents,
            ..Default::default()
        }
    }

    /// Metadata body of the PATCH (parents travel as query parameters)
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        if let Some(name) = &self.name {
            body.insert("name".into(), name.clone().into());
        }
        if let Some(description) = &self.description {
            body.insert("description".into(), description.clone().into());
        }
        if let Some(starred) = self.starred {
            body.insert("starred".into(), starred.into());
        }
        if let Some(trashed) = self.trashed {
            body.insert("trashed".into(), trashed.into());
        }
        if let Some(restriction) = &self.content_restriction {
            body.insert(
                "contentRestrictions".into(),
                serde_json::json!([restriction]),
            );
        }
        serde_json::Value::Object(body)
    }
}

/// Destination of a copy
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyTarget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
}

/// Options of a permission grant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareOptions {
    pub send_notification: Option<bool>,
    pub email_message: Option<String>,
}

/// Partial update of a shared drive
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedDriveUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_rgb: Option<String>,
}

/// Gateway to the Drive provider
///
/// This port defines how the application layer talks to Drive.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait DriveGateway: Send + Sync {
    // ==================== Files ====================

    async fn list_files(&self, query: &FileQuery) -> Result<Page<DriveFile>, GatewayError>;

    /// Full metadata of a file
    async fn get_file(&self, file_id: &str) -> Result<DriveFile, GatewayError>;

    async fn create_file(&self, file: &NewFile) -> Result<DriveFile, GatewayError>;

    /// Create a file together with its content
    async fn create_file_with_content(
        &self,
        file: &NewFile,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError>;

    async fn update_file(
        &self,
        file_id: &str,
        update: &FileUpdate,
    ) -> Result<DriveFile, GatewayError>;

    /// Replace a file's content; native documents are converted from `content_type`
    async fn update_content(
        &self,
        file_id: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError>;

    async fn copy_file(&self, file_id: &str, target: &CopyTarget)
    -> Result<DriveFile, GatewayError>;

    /// Permanently delete a file, bypassing the trash
    async fn delete_file(&self, file_id: &str) -> Result<(), GatewayError>;

    async fn empty_trash(&self) -> Result<(), GatewayError>;

    /// Export a native document to `mime_type`
    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, GatewayError>;

    /// Download the stored bytes of a non-native file
    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, GatewayError>;

    async fn list_revisions(
        &self,
        file_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Revision>, GatewayError>;

    // ==================== Changes ====================

    async fn get_start_page_token(&self) -> Result<String, GatewayError>;

    async fn list_changes(
        &self,
        page_token: &str,
        page_size: u32,
    ) -> Result<ChangeList, GatewayError>;

    // ==================== Permissions ====================

    async fn list_permissions(&self, file_id: &str) -> Result<Vec<Permission>, GatewayError>;

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &NewPermission,
        options: &ShareOptions,
    ) -> Result<Permission, GatewayError>;

    async fn update_permission(
        &self,
        file_id: &str,
        permission_id: &str,
        role: Role,
    ) -> Result<Permission, GatewayError>;

    async fn delete_permission(
        &self,
        file_id: &str,
        permission_id: &str,
    ) -> Result<(), GatewayError>;

    // ==================== Comments ====================

    async fn create_comment(&self, file_id: &str, content: &str)
    -> Result<Comment, GatewayError>;

    async fn list_comments(
        &self,
        file_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Comment>, GatewayError>;

    async fn delete_comment(&self, file_id: &str, comment_id: &str) -> Result<(), GatewayError>;

    async fn create_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Reply, GatewayError>;

    async fn list_replies(
        &self,
        file_id: &str,
        comment_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Reply>, GatewayError>;

    async fn delete_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<(), GatewayError>;

    // ==================== Shared drives ====================

    async fn list_drives(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SharedDrive>, GatewayError>;

    async fn get_drive(&self, drive_id: &str) -> Result<SharedDrive, GatewayError>;

    async fn create_drive(&self, name: &str) -> Result<SharedDrive, GatewayError>;

    async fn update_drive(
        &self,
        drive_id: &str,
        update: &SharedDriveUpdate,
    ) -> Result<SharedDrive, GatewayError>;

    async fn delete_drive(&self, drive_id: &str) -> Result<(), GatewayError>;

    // ==================== Account ====================

    async fn about(&self) -> Result<About, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gateway_error_display_is_provider_message() {
        let err = GatewayError::api(403, "The user does not have sufficient permissions.");
        assert_eq!(err.to_string(), "The user does not have sufficient permissions.");
        assert_eq!(
            GatewayError::NotFound("File not found: B.".to_string()).to_string(),
            "File not found: B."
        );
    }

    #[test]
    fn test_file_update_body() {
        assert_eq!(FileUpdate::rename("new").body(), json!({"name": "new"}));
        assert_eq!(FileUpdate::trashed(false).body(), json!({"trashed": false}));
        assert_eq!(
            FileUpdate::restrict(ContentRestriction {
                read_only: true,
                reason: Some("final".to_string())
            })
            .body(),
            json!({"contentRestrictions": [{"readOnly": true, "reason": "final"}]})
        );
        assert_eq!(
            FileUpdate::move_to(vec!["b".into()], vec!["a".into()]).body(),
            json!({})
        );
    }

    #[test]
    fn test_new_file_body() {
        let file = NewFile {
            name: "notes.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
            parents: vec![],
            description: None,
        };
        assert_eq!(
            serde_json::to_value(&file).unwrap(),
            json!({"name": "notes.txt", "mimeType": "text/plain"})
        );
    }
}
