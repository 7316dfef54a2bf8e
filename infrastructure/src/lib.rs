//! Infrastructure layer for gdrive-mcp
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the Drive API client, the tool executor
//! and configuration file loading.

pub mod config;
pub mod drive;
pub mod tools;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileBatchConfig, FileConfig, FileDriveConfig,
    FileSearchConfig, FileServerConfig, FileUsageConfig,
};
pub use drive::{DriveApiClient, DriveEndpoints, TokenProvider, build_http_client};
pub use tools::{
    DriveToolExecutor, DriveToolExecutorFactory, JsonSchemaToolConverter, drive_tool_spec,
};
