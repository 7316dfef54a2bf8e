//! Drive v3 REST adapter
//!
//! Implements [`DriveGateway`] over `reqwest`. Every method is one HTTP
//! exchange (listing permissions may follow continuation pages). Provider
//! errors are reduced to the message of the Google error envelope.

use super::auth::TokenProvider;
use async_trait::async_trait;
use gdrive_application::{
    CopyTarget, Credentials, DriveGateway, FileQuery, FileUpdate, GatewayError, NewFile,
    ShareOptions, SharedDriveUpdate,
};
use gdrive_domain::{
    About, ChangeList, Comment, DriveFile, NewPermission, Page, Permission, Reply, Revision, Role,
    SharedDrive,
};
use reqwest::header::CONTENT_TYPE;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/drive/v3";
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://www.googleapis.com/upload/drive/v3";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Fields returned for a single file by writes and listings
const FILE_FIELDS: &str =
    "id, name, mimeType, parents, version, size, modifiedTime, createdTime, trashed, starred, webViewLink";

const CHANGE_FIELDS: &str = "nextPageToken, newStartPageToken, changes(fileId, removed, time, file(id, name, mimeType, modifiedTime, trashed))";

const PERMISSION_FIELDS: &str =
    "nextPageToken, permissions(id, role, type, emailAddress, domain, displayName)";

const MULTIPART_BOUNDARY: &str = "gdrive_mcp_part_boundary";

const ALL_DRIVES: (&str, &str) = ("supportsAllDrives", "true");

/// Where the Drive API lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveEndpoints {
    pub api_base_url: String,
    pub upload_base_url: String,
    pub token_url: String,
}

impl Default for DriveEndpoints {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }
}

impl DriveEndpoints {
    /// All endpoints under one base URL (test servers)
    pub fn local(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_base_url: format!("{}/drive/v3", base),
            upload_base_url: format!("{}/upload/drive/v3", base),
            token_url: format!("{}/token", base),
        }
    }
}

/// Build the HTTP client shared by every Drive client of the process
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client, GatewayError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("gdrive-mcp/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| GatewayError::Transport(e.to_string()))
}

/// A caller-supplied id, checked before it becomes one URL path segment.
///
/// Drive ids are URL-safe tokens; anything else (`/`, `?`, `#`, `..`) would
/// address a different endpoint.
fn segment(id: &str) -> Result<&str, GatewayError> {
    let valid = !id.is_empty()
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(id)
    } else {
        Err(GatewayError::InvalidRequest(format!("Invalid id: {:?}", id)))
    }
}

// ==================== Wire types ====================

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermissionList {
    #[serde(default)]
    permissions: Vec<Permission>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CommentList {
    #[serde(default)]
    comments: Vec<Comment>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReplyList {
    #[serde(default)]
    replies: Vec<Reply>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RevisionList {
    #[serde(default)]
    revisions: Vec<Revision>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriveList {
    #[serde(default)]
    drives: Vec<SharedDrive>,
    next_page_token: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StartPageToken {
    start_page_token: String,
}

/// Turn a failed response into a gateway error carrying the provider's message
fn error_from_response(status: StatusCode, body: &str) -> GatewayError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| format!("HTTP {}", status));
    match status {
        StatusCode::NOT_FOUND => GatewayError::NotFound(message),
        StatusCode::CONFLICT | StatusCode::PRECONDITION_FAILED => GatewayError::Conflict(message),
        StatusCode::UNAUTHORIZED => GatewayError::Auth(message),
        _ => GatewayError::api(status.as_u16(), message),
    }
}

/// `multipart/related` body: JSON metadata part followed by the content part
fn multipart_related(metadata: &serde_json::Value, content: &[u8], content_type: &str) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(
        format!(
            "--{b}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{meta}\r\n--{b}\r\nContent-Type: {ct}\r\n\r\n",
            b = MULTIPART_BOUNDARY,
            meta = metadata,
            ct = content_type,
        )
        .as_bytes(),
    );
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--", MULTIPART_BOUNDARY).as_bytes());
    body
}

/// Drive API client bound to one set of credentials
pub struct DriveApiClient {
    http: reqwest::Client,
    endpoints: DriveEndpoints,
    tokens: TokenProvider,
    request_counter: AtomicU64,
}

impl DriveApiClient {
    pub fn new(http: reqwest::Client, endpoints: DriveEndpoints, credentials: Credentials) -> Self {
        let tokens = TokenProvider::new(http.clone(), endpoints.token_url.clone(), credentials);
        Self {
            http,
            endpoints,
            tokens,
            request_counter: AtomicU64::new(0),
        }
    }

    /// Every path built from these has its caller-supplied ids checked by [`segment`]
    fn api(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.api_base_url, path)
    }

    fn upload(&self, path: &str) -> String {
        format!("{}{}", self.endpoints.upload_base_url, path)
    }

    /// Idempotency key for shared drive creation
    fn request_id(&self) -> String {
        let seq = self.request_counter.fetch_add(1, Ordering::Relaxed);
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default();
        format!("gdrive-mcp-{}-{}", nanos, seq)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let token = self.tokens.access_token().await?;
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            self.tokens.invalidate().await;
        }
        let body = response.text().await.unwrap_or_default();
        let err = error_from_response(status, &body);
        debug!("Drive request failed with {}: {}", status, err);
        Err(err)
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        self.send(request)
            .await?
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), GatewayError> {
        self.send(request).await.map(|_| ())
    }

    async fn send_bytes(&self, request: RequestBuilder) -> Result<Vec<u8>, GatewayError> {
        let bytes = self
            .send(request)
            .await?
            .bytes()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

fn paging(page_size: u32, page_token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut query = vec![("pageSize", page_size.to_string())];
    if let Some(token) = page_token {
        query.push(("pageToken", token.to_string()));
    }
    query
}

#[async_trait]
impl DriveGateway for DriveApiClient {
    // ==================== Files ====================

    async fn list_files(&self, query: &FileQuery) -> Result<Page<DriveFile>, GatewayError> {
        let fields = format!(
            "nextPageToken, files({})",
            query.file_fields.as_deref().unwrap_or(FILE_FIELDS)
        );
        let mut params = paging(query.page_size, query.page_token.as_deref());
        params.push(("fields", fields));
        params.push(("supportsAllDrives", "true".to_string()));
        params.push(("includeItemsFromAllDrives", "true".to_string()));
        if let Some(predicate) = &query.predicate {
            params.push(("q", predicate.clone()));
        }
        if let Some(order_by) = &query.order_by {
            params.push(("orderBy", order_by.clone()));
        }
        if let Some(drive_id) = &query.drive_id {
            params.push(("driveId", drive_id.clone()));
            params.push(("corpora", "drive".to_string()));
        }

        debug!("GET files q={:?}", query.predicate);
        let list: FileList = self
            .send_json(self.http.get(self.api("/files")).query(&params))
            .await?;
        Ok(Page::new(list.files, list.next_page_token))
    }

    async fn get_file(&self, file_id: &str) -> Result<DriveFile, GatewayError> {
        self.send_json(
            self.http
                .get(self.api(&format!("/files/{}", segment(file_id)?)))
                .query(&[ALL_DRIVES, ("fields", "*")]),
        )
        .await
    }

    async fn create_file(&self, file: &NewFile) -> Result<DriveFile, GatewayError> {
        self.send_json(
            self.http
                .post(self.api("/files"))
                .query(&[ALL_DRIVES, ("fields", FILE_FIELDS)])
                .json(file),
        )
        .await
    }

    async fn create_file_with_content(
        &self,
        file: &NewFile,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError> {
        let metadata =
            serde_json::to_value(file).map_err(|e| GatewayError::InvalidRequest(e.to_string()))?;
        let body = multipart_related(&metadata, &content, content_type);
        debug!("Uploading {} bytes as {}", content.len(), content_type);
        self.send_json(
            self.http
                .post(self.upload("/files"))
                .query(&[
                    ("uploadType", "multipart"),
                    ALL_DRIVES,
                    ("fields", FILE_FIELDS),
                ])
                .header(
                    CONTENT_TYPE,
                    format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
                )
                .body(body),
        )
        .await
    }

    async fn update_file(
        &self,
        file_id: &str,
        update: &FileUpdate,
    ) -> Result<DriveFile, GatewayError> {
        let mut params = vec![
            ("supportsAllDrives", "true".to_string()),
            ("fields", FILE_FIELDS.to_string()),
        ];
        if !update.add_parents.is_empty() {
            params.push(("addParents", update.add_parents.join(",")));
        }
        if !update.remove_parents.is_empty() {
            params.push(("removeParents", update.remove_parents.join(",")));
        }
        self.send_json(
            self.http
                .patch(self.api(&format!("/files/{}", segment(file_id)?)))
                .query(&params)
                .json(&update.body()),
        )
        .await
    }

    async fn update_content(
        &self,
        file_id: &str,
        content: Vec<u8>,
        content_type: &str,
    ) -> Result<DriveFile, GatewayError> {
        self.send_json(
            self.http
                .patch(self.upload(&format!("/files/{}", segment(file_id)?)))
                .query(&[("uploadType", "media"), ALL_DRIVES, ("fields", FILE_FIELDS)])
                .header(CONTENT_TYPE, content_type)
                .body(content),
        )
        .await
    }

    async fn copy_file(
        &self,
        file_id: &str,
        target: &CopyTarget,
    ) -> Result<DriveFile, GatewayError> {
        self.send_json(
            self.http
                .post(self.api(&format!("/files/{}/copy", segment(file_id)?)))
                .query(&[ALL_DRIVES, ("fields", FILE_FIELDS)])
                .json(target),
        )
        .await
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), GatewayError> {
        self.send_empty(
            self.http
                .delete(self.api(&format!("/files/{}", segment(file_id)?)))
                .query(&[ALL_DRIVES]),
        )
        .await
    }

    async fn empty_trash(&self) -> Result<(), GatewayError> {
        self.send_empty(self.http.delete(self.api("/files/trash")))
            .await
    }

    async fn export_file(&self, file_id: &str, mime_type: &str) -> Result<Vec<u8>, GatewayError> {
        // The export endpoint takes no shared-drive flag
        self.send_bytes(
            self.http
                .get(self.api(&format!("/files/{}/export", segment(file_id)?)))
                .query(&[("mimeType", mime_type)]),
        )
        .await
    }

    async fn download_file(&self, file_id: &str) -> Result<Vec<u8>, GatewayError> {
        self.send_bytes(
            self.http
                .get(self.api(&format!("/files/{}", segment(file_id)?)))
                .query(&[("alt", "media"), ALL_DRIVES]),
        )
        .await
    }

    async fn list_revisions(
        &self,
        file_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Revision>, GatewayError> {
        let mut params = paging(page_size, page_token);
        params.push(("fields", "*".to_string()));
        let list: RevisionList = self
            .send_json(
                self.http
                    .get(self.api(&format!("/files/{}/revisions", segment(file_id)?)))
                    .query(&params),
            )
            .await?;
        Ok(Page::new(list.revisions, list.next_page_token))
    }

    // ==================== Changes ====================

    async fn get_start_page_token(&self) -> Result<String, GatewayError> {
        let token: StartPageToken = self
            .send_json(
                self.http
                    .get(self.api("/changes/startPageToken"))
                    .query(&[ALL_DRIVES]),
            )
            .await?;
        Ok(token.start_page_token)
    }

    async fn list_changes(
        &self,
        page_token: &str,
        page_size: u32,
    ) -> Result<ChangeList, GatewayError> {
        let mut params = paging(page_size, Some(page_token));
        params.push(("fields", CHANGE_FIELDS.to_string()));
        params.push(("supportsAllDrives", "true".to_string()));
        params.push(("includeItemsFromAllDrives", "true".to_string()));
        self.send_json(self.http.get(self.api("/changes")).query(&params))
            .await
    }

    // ==================== Permissions ====================

    async fn list_permissions(&self, file_id: &str) -> Result<Vec<Permission>, GatewayError> {
        let mut permissions = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut params = paging(100, page_token.as_deref());
            params.push(("fields", PERMISSION_FIELDS.to_string()));
            params.push(("supportsAllDrives", "true".to_string()));
            let list: PermissionList = self
                .send_json(
                    self.http
                        .get(self.api(&format!("/files/{}/permissions", segment(file_id)?)))
                        .query(&params),
                )
                .await?;
            permissions.extend(list.permissions);
            match list.next_page_token {
                Some(token) => page_token = Some(token),
                None => return Ok(permissions),
            }
        }
    }

    async fn create_permission(
        &self,
        file_id: &str,
        permission: &NewPermission,
        options: &ShareOptions,
    ) -> Result<Permission, GatewayError> {
        let mut params = vec![("supportsAllDrives", "true".to_string())];
        if let Some(notify) = options.send_notification {
            params.push(("sendNotificationEmail", notify.to_string()));
        }
        if let Some(message) = &options.email_message {
            params.push(("emailMessage", message.clone()));
        }
        if permission.role == Role::Owner {
            params.push(("transferOwnership", "true".to_string()));
        }
        self.send_json(
            self.http
                .post(self.api(&format!("/files/{}/permissions", segment(file_id)?)))
                .query(&params)
                .json(permission),
        )
        .await
    }

    async fn update_permission(
        &self,
        file_id: &str,
        permission_id: &str,
        role: Role,
    ) -> Result<Permission, GatewayError> {
        let mut params = vec![ALL_DRIVES];
        if role == Role::Owner {
            params.push(("transferOwnership", "true"));
        }
        self.send_json(
            self.http
                .patch(self.api(&format!(
                    "/files/{}/permissions/{}",
                    segment(file_id)?, segment(permission_id)?
                )))
                .query(&params)
                .json(&json!({ "role": role })),
        )
        .await
    }

    async fn delete_permission(
        &self,
        file_id: &str,
        permission_id: &str,
    ) -> Result<(), GatewayError> {
        self.send_empty(
            self.http
                .delete(self.api(&format!(
                    "/files/{}/permissions/{}",
                    segment(file_id)?, segment(permission_id)?
                )))
                .query(&[ALL_DRIVES]),
        )
        .await
    }

    // ==================== Comments ====================

    async fn create_comment(
        &self,
        file_id: &str,
        content: &str,
    ) -> Result<Comment, GatewayError> {
        self.send_json(
            self.http
                .post(self.api(&format!("/files/{}/comments", segment(file_id)?)))
                .query(&[("fields", "*")])
                .json(&json!({ "content": content })),
        )
        .await
    }

    async fn list_comments(
        &self,
        file_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Comment>, GatewayError> {
        let mut params = paging(page_size, page_token);
        params.push(("fields", "*".to_string()));
        let list: CommentList = self
            .send_json(
                self.http
                    .get(self.api(&format!("/files/{}/comments", segment(file_id)?)))
                    .query(&params),
            )
            .await?;
        Ok(Page::new(list.comments, list.next_page_token))
    }

    async fn delete_comment(&self, file_id: &str, comment_id: &str) -> Result<(), GatewayError> {
        self.send_empty(self.http.delete(self.api(&format!(
            "/files/{}/comments/{}",
            segment(file_id)?,
            segment(comment_id)?
        ))))
        .await
    }

    async fn create_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        content: &str,
    ) -> Result<Reply, GatewayError> {
        self.send_json(
            self.http
                .post(self.api(&format!(
                    "/files/{}/comments/{}/replies",
                    segment(file_id)?, segment(comment_id)?
                )))
                .query(&[("fields", "*")])
                .json(&json!({ "content": content })),
        )
        .await
    }

    async fn list_replies(
        &self,
        file_id: &str,
        comment_id: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<Reply>, GatewayError> {
        let mut params = paging(page_size, page_token);
        params.push(("fields", "*".to_string()));
        let list: ReplyList = self
            .send_json(
                self.http
                    .get(self.api(&format!(
                        "/files/{}/comments/{}/replies",
                        segment(file_id)?, segment(comment_id)?
                    )))
                    .query(&params),
            )
            .await?;
        Ok(Page::new(list.replies, list.next_page_token))
    }

    async fn delete_reply(
        &self,
        file_id: &str,
        comment_id: &str,
        reply_id: &str,
    ) -> Result<(), GatewayError> {
        self.send_empty(self.http.delete(self.api(&format!(
            "/files/{}/comments/{}/replies/{}",
            segment(file_id)?, segment(comment_id)?, segment(reply_id)?
        ))))
        .await
    }

    // ==================== Shared drives ====================

    async fn list_drives(
        &self,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<Page<SharedDrive>, GatewayError> {
        let list: DriveList = self
            .send_json(
                self.http
                    .get(self.api("/drives"))
                    .query(&paging(page_size, page_token)),
            )
            .await?;
        Ok(Page::new(list.drives, list.next_page_token))
    }

    async fn get_drive(&self, drive_id: &str) -> Result<SharedDrive, GatewayError> {
        self.send_json(self.http.get(self.api(&format!("/drives/{}", segment(drive_id)?))))
            .await
    }

    async fn create_drive(&self, name: &str) -> Result<SharedDrive, GatewayError> {
        let request_id = self.request_id();
        self.send_json(
            self.http
                .post(self.api("/drives"))
                .query(&[("requestId", request_id.as_str())])
                .json(&json!({ "name": name })),
        )
        .await
    }

    async fn update_drive(
        &self,
        drive_id: &str,
        update: &SharedDriveUpdate,
    ) -> Result<SharedDrive, GatewayError> {
        self.send_json(
            self.http
                .patch(self.api(&format!("/drives/{}", segment(drive_id)?)))
                .json(update),
        )
        .await
    }

    async fn delete_drive(&self, drive_id: &str) -> Result<(), GatewayError> {
        self.send_empty(self.http.delete(self.api(&format!("/drives/{}", segment(drive_id)?))))
            .await
    }

    // ==================== Account ====================

    async fn about(&self) -> Result<About, GatewayError> {
        self.send_json(
            self.http
                .get(self.api("/about"))
                .query(&[("fields", "user, storageQuota")]),
        )
        .await
    }
}
