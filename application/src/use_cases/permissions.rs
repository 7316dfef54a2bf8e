//! Permission use cases: sharing and access management.

use crate::ports::drive_gateway::{DriveGateway, ShareOptions};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::shared::require_id;
use gdrive_domain::{GranteeType, NewPermission, Permission, Role};
use std::sync::Arc;
use tracing::info;

/// Input for sharing a file with a user or group
#[derive(Debug, Clone)]
pub struct ShareInput {
    pub file_id: String,
    pub email_address: String,
    pub role: Role,
    pub grantee_type: GranteeType,
    pub send_notification: Option<bool>,
    pub email_message: Option<String>,
}

/// Use case for permissions
pub struct PermissionsUseCase {
    gateway: Arc<dyn DriveGateway>,
}

impl PermissionsUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>) -> Self {
        Self { gateway }
    }

    pub async fn share(&self, input: ShareInput) -> Result<Permission, UseCaseError> {
        let file_id = require_id("fileId", &input.file_id)?;
        let permission =
            NewPermission::for_email(input.grantee_type, &input.email_address, input.role)?;
        let options = ShareOptions {
            send_notification: input.send_notification,
            email_message: input.email_message.filter(|m| !m.trim().is_empty()),
        };
        let created = self
            .gateway
            .create_permission(&file_id, &permission, &options)
            .await?;
        info!("Shared {} as {}", file_id, input.role);
        Ok(created)
    }

    pub async fn list(&self, file_id: &str) -> Result<Vec<Permission>, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        Ok(self.gateway.list_permissions(&file_id).await?)
    }

    pub async fn update(
        &self,
        file_id: &str,
        permission_id: &str,
        role: Role,
    ) -> Result<Permission, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let permission_id = require_id("permissionId", permission_id)?;
        Ok(self
            .gateway
            .update_permission(&file_id, &permission_id, role)
            .await?)
    }

    pub async fn delete(&self, file_id: &str, permission_id: &str) -> Result<(), UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let permission_id = require_id("permissionId", permission_id)?;
        self.gateway
            .delete_permission(&file_id, &permission_id)
            .await?;
        Ok(())
    }

    /// Grant everyone in `domain` access to a file
    pub async fn add_domain_access(
        &self,
        file_id: &str,
        domain: &str,
        role: Role,
        allow_discovery: bool,
    ) -> Result<Permission, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let permission = NewPermission::for_domain(domain, role, allow_discovery)?;
        Ok(self
            .gateway
            .create_permission(&file_id, &permission, &ShareOptions::default())
            .await?)
    }

    /// Grant anyone with the link access to a file
    pub async fn add_public_access(
        &self,
        file_id: &str,
        role: Role,
        allow_discovery: bool,
    ) -> Result<Permission, UseCaseError> {
        let file_id = require_id("fileId", file_id)?;
        let permission = NewPermission::for_anyone(role, allow_discovery)?;
        Ok(self
            .gateway
            .create_permission(&file_id, &permission, &ShareOptions::default())
            .await?)
    }
}
