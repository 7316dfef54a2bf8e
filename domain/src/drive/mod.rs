//! Drive resources and value objects
//!
//! - [`entities`]: files, permissions, comments, shared drives, revisions, changes
//! - [`permission`]: roles, grantee types and permission bodies
//! - [`usage`]: usage aggregation by content type

pub mod entities;
pub mod permission;
pub mod usage;

pub use entities::{
    About, Change, ChangeList, Comment, DriveFile, DriveUser, FOLDER_MIME_TYPE, Page, Permission,
    Reply, Revision, SharedDrive, StorageQuota,
};
pub use permission::{GranteeType, NewPermission, Role};
pub use usage::{UsageBreakdown, UsageEntry};
