//! Content-writing use cases: create, upload and append.

use crate::ports::drive_gateway::{DriveGateway, NewFile};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::shared::require_id;
use gdrive_domain::content::{DEFAULT_MIME_TYPE, NATIVE_PREFIX, decode_base64};
use gdrive_domain::{
    ContentCategory, DomainError, DriveFile, FOLDER_MIME_TYPE, NativeKind, is_textual,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

const PLAIN_TEXT: &str = "text/plain";

/// Input for creating a file
#[derive(Debug, Clone, Default)]
pub struct CreateFileInput {
    pub name: String,
    /// Initial text content
    pub content: Option<String>,
    /// Target MIME type; a native type converts the content on upload
    pub mime_type: Option<String>,
    pub parent_id: Option<String>,
    pub description: Option<String>,
}

/// Input for uploading binary content
#[derive(Debug, Clone, Default)]
pub struct UploadInput {
    pub name: String,
    /// Base64-encoded bytes
    pub content_base64: String,
    pub mime_type: Option<String>,
    pub parent_id: Option<String>,
}

/// Use case for creating files and writing content
pub struct WriteContentUseCase {
    gateway: Arc<dyn DriveGateway>,
}

impl WriteContentUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>) -> Self {
        Self { gateway }
    }

    pub async fn create_file(&self, input: CreateFileInput) -> Result<DriveFile, UseCaseError> {
        let name = require_id("name", &input.name)?;
        let mime_type = input
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| PLAIN_TEXT.to_string());
        let file = NewFile {
            name,
            mime_type: Some(mime_type.clone()),
            parents: parent_list(input.parent_id.as_deref())?,
            description: input.description,
        };

        let created = match input.content {
            Some(content) => {
                // Native targets are converted from plain text
                let upload_type = if mime_type.starts_with(NATIVE_PREFIX) {
                    PLAIN_TEXT
                } else {
                    mime_type.as_str()
                };
                self.gateway
                    .create_file_with_content(&file, content.into_bytes(), upload_type)
                    .await?
            }
            None => self.gateway.create_file(&file).await?,
        };
        info!("Created file {} ({})", created.id, created.display_name());
        Ok(created)
    }

    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<DriveFile, UseCaseError> {
        let file = NewFile {
            name: require_id("name", name)?,
            mime_type: Some(FOLDER_MIME_TYPE.to_string()),
            parents: parent_list(parent_id)?,
            description: None,
        };
        Ok(self.gateway.create_file(&file).await?)
    }

    pub async fn upload(&self, input: UploadInput) -> Result<DriveFile, UseCaseError> {
        let name = require_id("name", &input.name)?;
        let bytes = decode_base64(&input.content_base64)
            .map_err(|e| UseCaseError::invalid(format!("content is not valid base64: {}", e)))?;
        let mime_type = input
            .mime_type
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let file = NewFile {
            name,
            mime_type: Some(mime_type.clone()),
            parents: parent_list(input.parent_id.as_deref())?,
            description: None,
        };
        debug!("Uploading {} bytes as {}", bytes.len(), mime_type);
        Ok(self
            .gateway
            .create_file_with_content(&file, bytes, &mime_type)
            .await?)
    }

    /// Append text to a text file or a native document.
    ///
    /// The file's version is captured when the content is read and checked
    /// again right before writing; if another writer got in between, the
    /// append fails with a conflict and nothing is written.
    pub async fn append_text(&self, file_id: &str, text: &str) -> Result<DriveFile, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let file = self.gateway.get_file(&file_id).await?;
        let mime_type = file
            .mime_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
        let read_version = file.version.clone();

        let (existing, upload_type) = match ContentCategory::of(&mime_type) {
            ContentCategory::Native(kind @ NativeKind::Document) => {
                let target = kind.editable_export_mime_type();
                let bytes = self.gateway.export_file(&file_id, target).await?;
                (bytes, target.to_string())
            }
            ContentCategory::Raw if is_textual(&mime_type) => {
                let bytes = self.gateway.download_file(&file_id).await?;
                (bytes, mime_type.clone())
            }
            _ => {
                return Err(DomainError::NotText {
                    name: file.display_name().to_string(),
                    mime_type,
                }
                .into());
            }
        };

        let mut content = String::from_utf8_lossy(&existing).into_owned();
        // Exports of native documents start with a byte-order mark
        if let Some(stripped) = content.strip_prefix('\u{feff}') {
            content = stripped.to_string();
        }
        content.push_str(text);

        let current = self.gateway.get_file(&file_id).await?;
        if current.version != read_version {
            let conflict = UseCaseError::Conflict {
                file_id: file_id.clone(),
                expected: read_version.unwrap_or_default(),
                actual: current.version.unwrap_or_default(),
            };
            warn!("{}", conflict);
            return Err(conflict);
        }

        let updated = self
            .gateway
            .update_content(&file_id, content.into_bytes(), &upload_type)
            .await?;
        info!("Appended {} bytes to {}", text.len(), file_id);
        Ok(updated)
    }
}

fn parent_list(parent_id: Option<&str>) -> Result<Vec<String>, UseCaseError> {
    match parent_id {
        Some(id) => Ok(vec![require_id("parentId", id)?]),
        None => Ok(Vec::new()),
    }
}
