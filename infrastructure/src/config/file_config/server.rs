//! Server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Listening address of the MCP endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    /// Interface to bind (default: "0.0.0.0")
    pub host: String,
    /// TCP port (default: 8081)
    pub port: u16,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
        }
    }
}

impl FileServerConfig {
    /// `host:port`, ready for a socket bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
