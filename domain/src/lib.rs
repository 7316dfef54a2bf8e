//! Domain layer for gdrive-mcp
//!
//! This crate contains the core types of the Drive tool server: tool
//! definitions, Drive resources, content categories, query predicates and
//! batch outcomes. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! Every Drive operation is a named tool with a typed parameter list,
//! registered once in an immutable [`ToolSpec`].
//!
//! ## Batches
//!
//! Batch tools fan out independent [`batch::Operation`]s and aggregate one
//! [`Outcome`] per operation into a [`BatchReport`]. A failing operation never
//! affects its siblings.

pub mod batch;
pub mod content;
pub mod core;
pub mod drive;
pub mod query;
pub mod tool;

// Re-export commonly used types
pub use batch::{
    BatchReport, BatchSummary, CopyRequest, FileTarget, MoveRequest, Operation, Outcome,
    PermissionUpdate,
};
pub use content::{ContentCategory, FileContent, NativeKind, is_textual};
pub use core::error::DomainError;
pub use drive::{
    About, Change, ChangeList, Comment, DriveFile, DriveUser, FOLDER_MIME_TYPE, GranteeType,
    NewPermission, Page, Permission, Reply, Revision, Role, SharedDrive, StorageQuota,
    UsageBreakdown, UsageEntry,
};
pub use tool::{
    entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolSpec},
    traits::{DefaultToolValidator, ToolValidator},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
