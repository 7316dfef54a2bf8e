//! Shared drive administration.

use crate::config::ToolParams;
use crate::ports::drive_gateway::{DriveGateway, SharedDriveUpdate};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::search_files::ListInput;
use crate::use_cases::shared::require_id;
use gdrive_domain::{Page, SharedDrive};
use std::sync::Arc;
use tracing::info;

/// Use case for shared drives
pub struct SharedDrivesUseCase {
    gateway: Arc<dyn DriveGateway>,
    params: ToolParams,
}

impl SharedDrivesUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    pub async fn list(&self, input: ListInput) -> Result<Page<SharedDrive>, UseCaseError> {
        Ok(self
            .gateway
            .list_drives(
                self.params.page_size(input.page_size),
                input.page_token.as_deref(),
            )
            .await?)
    }

    pub async fn get(&self, drive_id: &str) -> Result<SharedDrive, UseCaseError> {
        let drive_id = require_id("driveId", drive_id)?;
        Ok(self.gateway.get_drive(&drive_id).await?)
    }

    pub async fn create(&self, name: &str) -> Result<SharedDrive, UseCaseError> {
        let name = require_id("name", name)?;
        let drive = self.gateway.create_drive(&name).await?;
        info!("Created shared drive {}", drive.id);
        Ok(drive)
    }

    /// Rename a shared drive and/or change its color
    pub async fn update(
        &self,
        drive_id: &str,
        update: SharedDriveUpdate,
    ) -> Result<SharedDrive, UseCaseError> {
        let drive_id = require_id("driveId", drive_id)?;
        if update.name.is_none() && update.color_rgb.is_none() {
            return Err(UseCaseError::invalid(
                "Nothing to update: provide name or colorRgb",
            ));
        }
        Ok(self.gateway.update_drive(&drive_id, &update).await?)
    }

    /// Delete a shared drive; the provider refuses drives that still hold files
    pub async fn delete(&self, drive_id: &str) -> Result<(), UseCaseError> {
        let drive_id = require_id("driveId", drive_id)?;
        self.gateway.delete_drive(&drive_id).await?;
        info!("Deleted shared drive {}", drive_id);
        Ok(())
    }
}
