//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use application types where appropriate.

mod drive;
mod limits;
mod server;

pub use drive::FileDriveConfig;
pub use limits::{FileBatchConfig, FileSearchConfig, FileUsageConfig};
pub use server::FileServerConfig;

use gdrive_application::{Credentials, ToolParams};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("drive.request_timeout_secs cannot be 0")]
    InvalidTimeout,

    #[error("batch.max_concurrency cannot be 0")]
    InvalidConcurrency,

    #[error("search page sizes must be at least 1 (default {default}, max {max})")]
    InvalidPageSize { default: u32, max: u32 },

    #[error("search.default_page_size ({default}) exceeds search.max_page_size ({max})")]
    DefaultPageSizeTooLarge { default: u32, max: u32 },

    #[error("usage.max_files_scanned cannot be 0")]
    InvalidScanLimit,

    #[error("drive.{0} cannot be empty")]
    EmptyUrl(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Listening address
    pub server: FileServerConfig,
    /// Process-level OAuth credentials (optional)
    pub credentials: Credentials,
    /// Drive endpoints and HTTP timeout
    pub drive: FileDriveConfig,
    pub batch: FileBatchConfig,
    pub search: FileSearchConfig,
    pub usage: FileUsageConfig,
}

impl FileConfig {
    /// Validate the configuration.
    ///
    /// Missing credentials are not an error: invocations may carry their own.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.drive.request_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.batch.max_concurrency == 0 {
            return Err(ConfigValidationError::InvalidConcurrency);
        }

        let (default, max) = (self.search.default_page_size, self.search.max_page_size);
        if default == 0 || max == 0 {
            return Err(ConfigValidationError::InvalidPageSize { default, max });
        }
        if default > max {
            return Err(ConfigValidationError::DefaultPageSizeTooLarge { default, max });
        }

        if self.usage.max_files_scanned == 0 {
            return Err(ConfigValidationError::InvalidScanLimit);
        }

        for (name, url) in [
            ("api_base_url", &self.drive.api_base_url),
            ("upload_base_url", &self.drive.upload_base_url),
            ("token_url", &self.drive.token_url),
        ] {
            if url.trim().is_empty() {
                return Err(ConfigValidationError::EmptyUrl(name));
            }
        }

        Ok(())
    }

    /// Limits handed to the use cases
    pub fn tool_params(&self) -> ToolParams {
        ToolParams::default()
            .with_max_concurrency(self.batch.max_concurrency)
            .with_page_sizes(self.search.default_page_size, self.search.max_page_size)
            .with_max_files_scanned(self.usage.max_files_scanned)
    }
}
