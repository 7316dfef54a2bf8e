//! File management use cases: metadata updates, copies, moves and deletion.

use crate::ports::drive_gateway::{ContentRestriction, CopyTarget, DriveGateway, FileUpdate};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::shared::require_id;
use gdrive_domain::DriveFile;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// What a delete did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteMode {
    /// Moved to the trash (recoverable)
    Trash,
    /// Removed permanently
    Delete,
}

impl DeleteMode {
    pub fn from_permanent(permanent: bool) -> Self {
        if permanent {
            DeleteMode::Delete
        } else {
            DeleteMode::Trash
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeleteMode::Trash => "trash",
            DeleteMode::Delete => "delete",
        }
    }
}

/// Use case for file management
pub struct ManageFilesUseCase {
    gateway: Arc<dyn DriveGateway>,
}

impl ManageFilesUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>) -> Self {
        Self { gateway }
    }

    async fn update(&self, file_id: &str, update: FileUpdate) -> Result<DriveFile, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        Ok(self.gateway.update_file(&file_id, &update).await?)
    }

    pub async fn rename(&self, file_id: &str, new_name: &str) -> Result<DriveFile, UseCaseError> {
        let new_name = require_id("newName", new_name)?;
        self.update(file_id, FileUpdate::rename(new_name)).await
    }

    pub async fn star(&self, file_id: &str, starred: bool) -> Result<DriveFile, UseCaseError> {
        self.update(file_id, FileUpdate::starred(starred)).await
    }

    /// Take a file out of the trash
    pub async fn restore(&self, file_id: &str) -> Result<DriveFile, UseCaseError> {
        self.update(file_id, FileUpdate::trashed(false)).await
    }

    /// Lock (make read-only) or unlock a file's content
    pub async fn lock(
        &self,
        file_id: &str,
        locked: bool,
        reason: Option<String>,
    ) -> Result<DriveFile, UseCaseError> {
        let restriction = ContentRestriction {
            read_only: locked,
            reason: reason.filter(|r| locked && !r.trim().is_empty()),
        };
        self.update(file_id, FileUpdate::restrict(restriction)).await
    }

    pub async fn copy(
        &self,
        file_id: &str,
        name: Option<String>,
        parent_id: Option<String>,
    ) -> Result<DriveFile, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let target = CopyTarget {
            name: name.filter(|n| !n.trim().is_empty()),
            parents: match parent_id {
                Some(id) => vec![require_id("parentId", &id)?],
                None => Vec::new(),
            },
        };
        Ok(self.gateway.copy_file(&file_id, &target).await?)
    }

    /// Move a file to a new folder, detaching it from all current parents
    pub async fn move_file(
        &self,
        file_id: &str,
        new_parent_id: &str,
    ) -> Result<DriveFile, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let new_parent_id = require_id("newParentId", new_parent_id)?;
        let current = self.gateway.get_file(&file_id).await?;
        let update = FileUpdate::move_to(vec![new_parent_id], current.parents);
        Ok(self.gateway.update_file(&file_id, &update).await?)
    }

    pub async fn delete(&self, file_id: &str, permanent: bool) -> Result<DeleteMode, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let mode = DeleteMode::from_permanent(permanent);
        match mode {
            DeleteMode::Delete => self.gateway.delete_file(&file_id).await?,
            DeleteMode::Trash => {
                self.gateway
                    .update_file(&file_id, &FileUpdate::trashed(true))
                    .await?;
            }
        }
        info!("File {}: {}", file_id, mode.as_str());
        Ok(mode)
    }

    pub async fn empty_trash(&self) -> Result<(), UseCaseError> {
        self.gateway.empty_trash().await?;
        info!("Trash emptied");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::FakeDrive;
    use serde_json::json;

    fn setup() -> (Arc<FakeDrive>, ManageFilesUseCase) {
        let fake = Arc::new(FakeDrive::new().with_file("f1", "a.txt", "text/plain", "x"));
        let uc = ManageFilesUseCase::new(fake.clone());
        (fake, uc)
    }

    #[tokio::test]
    async fn test_rename() {
        let (_, uc) = setup();
        let file = uc.rename("f1", "b.txt").await.unwrap();
        assert_eq!(file.name.as_deref(), Some("b.txt"));
        assert!(uc.rename("f1", "").await.unwrap_err().is_input_error());
    }

    #[tokio::test]
    async fn test_trash_restore_and_delete() {
        let (fake, uc) = setup();
        assert_eq!(uc.delete("f1", false).await.unwrap(), DeleteMode::Trash);
        assert!(fake.is_trashed("f1"));

        uc.restore("f1").await.unwrap();
        assert!(!fake.is_trashed("f1"));

        assert_eq!(uc.delete("f1", true).await.unwrap(), DeleteMode::Delete);
        assert!(!fake.exists("f1"));
    }

    #[tokio::test]
    async fn test_empty_trash() {
        let (fake, uc) = setup();
        uc.delete("f1", false).await.unwrap();
        uc.empty_trash().await.unwrap();
        assert!(!fake.exists("f1"));
    }

    #[tokio::test]
    async fn test_move_replaces_parents() {
        let (fake, uc) = setup();
        uc.move_file("f1", "folder9").await.unwrap();
        assert_eq!(fake.file("f1").unwrap().parents, vec!["folder9".to_string()]);
    }

    #[tokio::test]
    async fn test_lock_and_star() {
        let (_, uc) = setup();
        let file = uc.lock("f1", true, Some("final".to_string())).await.unwrap();
        assert_eq!(
            file.extra["contentRestrictions"],
            json!([{"readOnly": true, "reason": "final"}])
        );

        let file = uc.lock("f1", false, Some("ignored".to_string())).await.unwrap();
        assert_eq!(file.extra["contentRestrictions"], json!([{"readOnly": false}]));

        let file = uc.star("f1", true).await.unwrap();
        assert_eq!(file.extra["starred"], json!(true));
    }

    #[tokio::test]
    async fn test_copy() {
        let (_, uc) = setup();
        let copy = uc
            .copy("f1", Some("copy.txt".to_string()), None)
            .await
            .unwrap();
        assert_ne!(copy.id, "f1");
        assert_eq!(copy.name.as_deref(), Some("copy.txt"));
    }
}
