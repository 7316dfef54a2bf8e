//! Tool domain module
//!
//! Every Drive operation is exposed as a tool: a [`ToolDefinition`] (name,
//! parameters, [`ToolKind`](entities::ToolKind)) registered once in an
//! immutable [`ToolSpec`], invoked through a [`ToolCall`], and answered with a
//! [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolSpec     │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (registry)   │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────────────┘    └──────────────┘
//! ```
//!
//! The [`ToolKind`](entities::ToolKind) of a tool is published to the caller
//! as the `readOnlyHint` / `destructiveHint` annotations.
//!
//! - **Domain** (this module): pure definitions and validation, no I/O
//! - **Application** (`ToolExecutorPort`): port trait for tool execution
//! - **Infrastructure** (`DriveToolExecutor`): dispatch to the Drive use cases

pub mod entities;
pub mod traits;
pub mod value_objects;

pub use entities::{ToolCall, ToolDefinition, ToolKind, ToolParameter, ToolSpec};
pub use traits::{DefaultToolValidator, ToolValidator};
pub use value_objects::{ToolError, ToolResult, ToolResultMetadata};
