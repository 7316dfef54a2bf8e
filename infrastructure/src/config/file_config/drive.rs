//! Drive API configuration from TOML (`[drive]` section)

use crate::drive::{
    DEFAULT_API_BASE_URL, DEFAULT_TOKEN_URL, DEFAULT_UPLOAD_BASE_URL, DriveEndpoints,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Endpoints and HTTP settings of the Drive client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDriveConfig {
    pub api_base_url: String,
    pub upload_base_url: String,
    /// OAuth token endpoint used for the refresh-token grant
    pub token_url: String,
    /// Per-request timeout in seconds (default: 30)
    pub request_timeout_secs: u64,
}

impl Default for FileDriveConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl FileDriveConfig {
    pub fn endpoints(&self) -> DriveEndpoints {
        DriveEndpoints {
            api_base_url: self.api_base_url.trim_end_matches('/').to_string(),
            upload_base_url: self.upload_base_url.trim_end_matches('/').to_string(),
            token_url: self.token_url.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
