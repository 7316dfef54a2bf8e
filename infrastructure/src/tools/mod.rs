//! Drive tool implementations
//!
//! Tools are grouped into families, each owning its definitions and the
//! handlers that turn a validated call into a use case invocation:
//! - `files`: search, listing, reading, writing and trash management
//! - `permissions`: sharing and access control
//! - `comments`: comments and replies
//! - `shared_drives`: shared drive administration
//! - `quota`: storage quota and usage
//! - `batch`: multi-file variants running through the batch executor

pub mod batch;
pub mod comments;
pub mod files;
pub mod permissions;
pub mod quota;
pub mod shared_drives;

mod common;
mod executor;
mod factory;
mod schema;

pub use executor::{DriveContext, DriveToolExecutor};
pub use factory::DriveToolExecutorFactory;
pub use schema::JsonSchemaToolConverter;

use gdrive_domain::tool::entities::ToolSpec;

/// Create the tool specification with every Drive tool
pub fn drive_tool_spec() -> ToolSpec {
    files::definitions()
        .into_iter()
        .chain(permissions::definitions())
        .chain(comments::definitions())
        .chain(shared_drives::definitions())
        .chain(quota::definitions())
        .chain(batch::definitions())
        .fold(ToolSpec::new(), ToolSpec::register)
}
