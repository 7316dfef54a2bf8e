//! Search and listing use cases
//!
//! Free-text search, folder listing, shared-drive listing and the change log.

use crate::config::ToolParams;
use crate::ports::drive_gateway::{DriveGateway, FileQuery};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::shared::require_id;
use gdrive_domain::query::{children_predicate, not_trashed_predicate, search_predicate};
use gdrive_domain::{ChangeList, DriveFile, Page};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Fields returned for each file of a listing
const LISTING_FIELDS: &str = "id, name, mimeType, modifiedTime, size";

const ORDER_BY_MODIFIED: &str = "modifiedTime desc";

/// Input for a paginated listing
#[derive(Debug, Clone, Default)]
pub struct ListInput {
    pub page_size: Option<i64>,
    pub page_token: Option<String>,
}

impl ListInput {
    pub fn new(page_size: Option<i64>, page_token: Option<String>) -> Self {
        Self {
            page_size,
            // An empty token means "first page"
            page_token: page_token.filter(|t| !t.trim().is_empty()),
        }
    }
}

/// Render a page of files as text: a count header, one line per file, and
/// the continuation token when more results exist.
pub fn render_file_page(page: &Page<DriveFile>) -> String {
    let lines: Vec<String> = page.items.iter().map(DriveFile::summary_line).collect();
    let mut text = format!("Found {} files:\n{}", page.items.len(), lines.join("\n"));
    if let Some(token) = &page.next_page_token {
        text.push_str(&format!(
            "\n\nMore results available. Use pageToken: {}",
            token
        ));
    }
    text
}

/// Change log page plus the token it was read from
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangesOutput {
    /// Token the listing started from (fetched when the caller gave none)
    pub page_token: String,
    #[serde(flatten)]
    pub changes: ChangeList,
}

/// Use case for search and listings
pub struct SearchFilesUseCase {
    gateway: Arc<dyn DriveGateway>,
    params: ToolParams,
}

impl SearchFilesUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    /// Search non-trashed files by name, most recently modified first
    pub async fn search(
        &self,
        query: &str,
        input: ListInput,
    ) -> Result<Page<DriveFile>, UseCaseError> {
        let predicate = search_predicate(query);
        debug!("Searching with predicate: {}", predicate);

        let file_query = FileQuery::new(predicate, self.params.page_size(input.page_size))
            .with_page_token(input.page_token)
            .with_order_by(ORDER_BY_MODIFIED)
            .with_file_fields(LISTING_FIELDS);
        Ok(self.gateway.list_files(&file_query).await?)
    }

    /// Non-trashed children of a folder (`root` when none is given)
    pub async fn list_folder(
        &self,
        folder_id: Option<&str>,
        input: ListInput,
    ) -> Result<Page<DriveFile>, UseCaseError> {
        let folder_id = match folder_id {
            Some(id) => require_id("folderId", id)?,
            None => "root".to_string(),
        };
        let file_query = FileQuery::new(
            children_predicate(&folder_id),
            self.params.page_size(input.page_size),
        )
        .with_page_token(input.page_token)
        .with_order_by("folder, name")
        .with_file_fields(LISTING_FIELDS);
        Ok(self.gateway.list_files(&file_query).await?)
    }

    /// Non-trashed files of a shared drive
    pub async fn list_shared_drive_files(
        &self,
        drive_id: &str,
        input: ListInput,
    ) -> Result<Page<DriveFile>, UseCaseError> {
        let drive_id = require_id("driveId", drive_id)?;
        let file_query = FileQuery::new(
            not_trashed_predicate(),
            self.params.page_size(input.page_size),
        )
        .with_page_token(input.page_token)
        .with_order_by(ORDER_BY_MODIFIED)
        .with_drive_id(drive_id)
        .with_file_fields(LISTING_FIELDS);
        Ok(self.gateway.list_files(&file_query).await?)
    }

    /// Changes since `page_token`, or since now when no token is given
    pub async fn list_changes(&self, input: ListInput) -> Result<ChangesOutput, UseCaseError> {
        let page_token = match input.page_token {
            Some(token) => token,
            None => self.gateway.get_start_page_token().await?,
        };
        let changes = self
            .gateway
            .list_changes(&page_token, self.params.page_size(input.page_size))
            .await?;
        Ok(ChangesOutput {
            page_token,
            changes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::FakeDrive;

    fn use_case(fake: Arc<FakeDrive>) -> SearchFilesUseCase {
        SearchFilesUseCase::new(fake, ToolParams::default())
    }

    #[tokio::test]
    async fn test_empty_query_lists_all_non_trashed() {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "a.txt", "text/plain", "x"));
        let page = use_case(fake.clone())
            .search("  ", ListInput::default())
            .await
            .unwrap();

        assert_eq!(page.items.len(), 1);
        let query = fake.last_query().unwrap();
        assert_eq!(query.predicate.as_deref(), Some("trashed = false"));
        assert_eq!(query.order_by.as_deref(), Some("modifiedTime desc"));
        assert_eq!(query.page_size, 10);
    }

    #[tokio::test]
    async fn test_search_caps_page_size() {
        let fake = Arc::new(FakeDrive::new());
        use_case(fake.clone())
            .search("report", ListInput::new(Some(500), Some(String::new())))
            .await
            .unwrap();

        let query = fake.last_query().unwrap();
        assert_eq!(query.page_size, 100);
        assert!(query.page_token.is_none());
        assert_eq!(
            query.predicate.as_deref(),
            Some("(name contains 'report') and trashed = false")
        );
    }

    #[tokio::test]
    async fn test_list_folder_defaults_to_root() {
        let fake = Arc::new(FakeDrive::new());
        use_case(fake.clone())
            .list_folder(None, ListInput::default())
            .await
            .unwrap();
        assert_eq!(
            fake.last_query().unwrap().predicate.as_deref(),
            Some("'root' in parents and trashed = false")
        );

        let err = use_case(fake)
            .list_folder(Some(""), ListInput::default())
            .await
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_shared_drive_listing_scopes_to_drive() {
        let fake = Arc::new(FakeDrive::new());
        use_case(fake.clone())
            .list_shared_drive_files("drive1", ListInput::default())
            .await
            .unwrap();
        assert_eq!(fake.last_query().unwrap().drive_id.as_deref(), Some("drive1"));
    }

    #[tokio::test]
    async fn test_changes_fetch_start_token_when_missing() {
        let fake = Arc::new(FakeDrive::new());
        let output = use_case(fake)
            .list_changes(ListInput::default())
            .await
            .unwrap();
        assert_eq!(output.page_token, "100");
        assert_eq!(output.changes.new_start_page_token.as_deref(), Some("101"));
    }

    #[test]
    fn test_render_file_page() {
        let page = Page::new(
            vec![
                DriveFile::new("f1").with_name("a.txt").with_mime_type("text/plain"),
                DriveFile::new("f2")
                    .with_name("Budget")
                    .with_mime_type("application/vnd.google-apps.spreadsheet"),
            ],
            Some("tok".to_string()),
        );
        assert_eq!(
            render_file_page(&page),
            "Found 2 files:\nf1 a.txt (text/plain)\nf2 Budget (application/vnd.google-apps.spreadsheet)\n\nMore results available. Use pageToken: tok"
        );

        assert_eq!(render_file_page(&Page::default()), "Found 0 files:\n");
    }
}
