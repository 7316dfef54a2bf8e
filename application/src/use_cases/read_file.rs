//! Read use cases: metadata, content and revisions.

use crate::config::ToolParams;
use crate::ports::drive_gateway::DriveGateway;
use crate::use_cases::error::UseCaseError;
use crate::use_cases::search_files::ListInput;
use crate::use_cases::shared::require_id;
use gdrive_domain::content::DEFAULT_MIME_TYPE;
use gdrive_domain::{ContentCategory, DriveFile, FileContent, Page, Revision};
use std::sync::Arc;
use tracing::debug;

/// Content of a file, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutput {
    pub file: DriveFile,
    /// MIME type of `content` (the export target for native documents)
    pub content_type: String,
    pub content: FileContent,
}

impl ReadOutput {
    /// `Contents of <name>:` followed by the content
    pub fn render(&self) -> String {
        format!(
            "Contents of {}:\n\n{}",
            self.file.display_name(),
            self.content.as_str()
        )
    }
}

/// Use case for reading files
pub struct ReadFileUseCase {
    gateway: Arc<dyn DriveGateway>,
    params: ToolParams,
}

impl ReadFileUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    pub async fn get_metadata(&self, file_id: &str) -> Result<DriveFile, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        Ok(self.gateway.get_file(&file_id).await?)
    }

    /// Read a file's content.
    ///
    /// Native documents are exported (spreadsheets as CSV, documents as
    /// Markdown, ...); other files are downloaded and returned as text or
    /// base64 depending on their MIME type.
    pub async fn read(&self, file_id: &str) -> Result<ReadOutput, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let file = self.gateway.get_file(&file_id).await?;
        let mime_type = file
            .mime_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());

        let (content_type, bytes) = match ContentCategory::of(&mime_type) {
            ContentCategory::Native(kind) => {
                let target = kind.export_mime_type();
                debug!("Exporting {} ({:?}) as {}", file_id, kind, target);
                (target.to_string(), self.gateway.export_file(&file_id, target).await?)
            }
            ContentCategory::Raw => {
                debug!("Downloading {} ({})", file_id, mime_type);
                let bytes = self.gateway.download_file(&file_id).await?;
                (mime_type, bytes)
            }
        };

        Ok(ReadOutput {
            content: FileContent::from_bytes(&content_type, &bytes),
            content_type,
            file,
        })
    }

    pub async fn list_revisions(
        &self,
        file_id: &str,
        input: ListInput,
    ) -> Result<Page<Revision>, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        Ok(self
            .gateway
            .list_revisions(
                &file_id,
                self.params.page_size(input.page_size),
                input.page_token.as_deref(),
            )
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::FakeDrive;

    fn use_case(fake: Arc<FakeDrive>) -> ReadFileUseCase {
        ReadFileUseCase::new(fake, ToolParams::default())
    }

    #[tokio::test]
    async fn test_read_text_file() {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "notes.txt", "text/plain", "hello"));
        let output = use_case(fake).read("f1").await.unwrap();

        assert_eq!(output.content, FileContent::Text("hello".to_string()));
        assert_eq!(output.render(), "Contents of notes.txt:\n\nhello");
    }

    #[tokio::test]
    async fn test_read_binary_file_as_base64() {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "pic.png", "image/png", "abc"));
        let output = use_case(fake).read("f1").await.unwrap();
        assert_eq!(output.content, FileContent::Base64("YWJj".to_string()));
    }

    #[tokio::test]
    async fn test_read_file_without_mime_type_is_base64() {
        let fake = Arc::new(FakeDrive::new());
        fake.insert(DriveFile::new("f1"), b"abc".to_vec());
        let output = use_case(fake).read("f1").await.unwrap();

        assert_eq!(output.content_type, DEFAULT_MIME_TYPE);
        assert!(!output.content.is_text());
        assert!(output.render().starts_with("Contents of f1:"));
    }

    #[tokio::test]
    async fn test_spreadsheet_exports_csv() {
        let fake = Arc::new(FakeDrive::new().with_file(
            "s1",
            "Budget",
            "application/vnd.google-apps.spreadsheet",
            "a,b\n1,2",
        ));
        let output = use_case(fake.clone()).read("s1").await.unwrap();

        assert_eq!(fake.last_export_mime().as_deref(), Some("text/csv"));
        assert_eq!(output.content_type, "text/csv");
        assert_eq!(output.content, FileContent::Text("a,b\n1,2".to_string()));
    }

    #[tokio::test]
    async fn test_drawing_exports_png_as_base64() {
        let fake = Arc::new(FakeDrive::new().with_file(
            "d1",
            "Diagram",
            "application/vnd.google-apps.drawing",
            "png",
        ));
        let output = use_case(fake.clone()).read("d1").await.unwrap();

        assert_eq!(fake.last_export_mime().as_deref(), Some("image/png"));
        assert!(!output.content.is_text());
    }

    #[tokio::test]
    async fn test_metadata_is_stable() {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "a.txt", "text/plain", "x"));
        let uc = use_case(fake);
        let first = serde_json::to_string(&uc.get_metadata("f1").await.unwrap()).unwrap();
        let second = serde_json::to_string(&uc.get_metadata("f1").await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_read_is_repeatable() {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "a.txt", "text/plain", "x"));
        let uc = use_case(fake);
        let first = uc.read("f1").await.unwrap();
        let second = uc.read("f1").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_missing_file_surfaces_provider_message() {
        let fake = Arc::new(FakeDrive::new());
        let err = use_case(fake).read("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "File not found: nope.");
    }
}
