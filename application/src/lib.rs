//! Application layer for gdrive-mcp
//!
//! This crate contains the Drive use cases, the port definitions their
//! adapters implement, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{Credentials, ToolParams};
pub use ports::{
    drive_gateway::{
        ContentRestriction, CopyTarget, DriveGateway, FileQuery, FileUpdate, GatewayError,
        NewFile, ShareOptions, SharedDriveUpdate,
    },
    tool_executor::{ToolExecutorFactory, ToolExecutorPort},
    tool_schema::ToolSchemaPort,
};
pub use use_cases::batch::{BatchExecutor, BatchUseCase};
pub use use_cases::comments::CommentsUseCase;
pub use use_cases::error::UseCaseError;
pub use use_cases::manage_files::{DeleteMode, ManageFilesUseCase};
pub use use_cases::permissions::{PermissionsUseCase, ShareInput};
pub use use_cases::quota::{QuotaReport, QuotaUseCase};
pub use use_cases::read_file::{ReadFileUseCase, ReadOutput};
pub use use_cases::search_files::{ChangesOutput, ListInput, SearchFilesUseCase, render_file_page};
pub use use_cases::shared_drives::SharedDrivesUseCase;
pub use use_cases::write_content::{CreateFileInput, UploadInput, WriteContentUseCase};
