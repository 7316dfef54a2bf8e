//! Batch operation records, deserialized from tool input

use super::Operation;
use crate::core::error::{DomainError, require_non_empty};
use crate::drive::permission::Role;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn key_of(pairs: &[(&str, &str)]) -> Map<String, Value> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
        .collect()
}

/// An operation addressing a single file by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileTarget {
    pub file_id: String,
}

impl FileTarget {
    pub fn new(file_id: impl Into<String>) -> Self {
        Self {
            file_id: file_id.into(),
        }
    }
}

impl Operation for FileTarget {
    fn key(&self) -> Map<String, Value> {
        key_of(&[("fileId", self.file_id.as_str())])
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("fileId", self.file_id.as_str()).map(|_| ())
    }
}

/// Change the role of an existing permission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionUpdate {
    pub file_id: String,
    pub permission_id: String,
    pub role: Role,
}

impl Operation for PermissionUpdate {
    fn key(&self) -> Map<String, Value> {
        key_of(&[
            ("fileId", self.file_id.as_str()),
            ("permissionId", self.permission_id.as_str()),
        ])
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("fileId", self.file_id.as_str())?;
        require_non_empty("permissionId", self.permission_id.as_str())?;
        Ok(())
    }
}

/// Copy a file, optionally renaming it or placing it in another folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyRequest {
    pub file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Operation for CopyRequest {
    fn key(&self) -> Map<String, Value> {
        key_of(&[("fileId", self.file_id.as_str())])
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("fileId", self.file_id.as_str())?;
        if let Some(name) = &self.name {
            require_non_empty("name", name)?;
        }
        Ok(())
    }
}

/// Move a file to a new parent folder, detaching it from its current parents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub file_id: String,
    pub new_parent_id: String,
}

impl Operation for MoveRequest {
    fn key(&self) -> Map<String, Value> {
        key_of(&[
            ("fileId", self.file_id.as_str()),
            ("newParentId", self.new_parent_id.as_str()),
        ])
    }

    fn validate(&self) -> Result<(), DomainError> {
        require_non_empty("fileId", self.file_id.as_str())?;
        require_non_empty("newParentId", self.new_parent_id.as_str())?;
        Ok(())
    }
}
