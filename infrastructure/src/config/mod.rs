//! Configuration file loading for gdrive-mcp
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `GDRIVE_MCP_<SECTION>__<KEY>` environment variables
//! 2. `CLIENT_ID`, `CLIENT_SECRET`, `REFRESH_TOKEN`, `PORT`, `HOST`
//! 3. `--config <path>` specified file
//! 4. Project root: `./gdrive-mcp.toml` or `./.gdrive-mcp.toml`
//! 5. XDG config: `$XDG_CONFIG_HOME/gdrive-mcp/config.toml`
//! 6. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileBatchConfig, FileConfig, FileDriveConfig, FileSearchConfig,
    FileServerConfig, FileUsageConfig,
};
pub use loader::ConfigLoader;
