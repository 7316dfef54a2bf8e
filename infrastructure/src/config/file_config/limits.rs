//! Tool limits from TOML (`[batch]`, `[search]` and `[usage]` sections)

use serde::{Deserialize, Serialize};

/// Batch fan-out settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBatchConfig {
    /// Sub-operations of one batch in flight at once (default: 10)
    pub max_concurrency: usize,
}

impl Default for FileBatchConfig {
    fn default() -> Self {
        Self { max_concurrency: 10 }
    }
}

/// Listing page sizes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSearchConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
}

impl Default for FileSearchConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

/// Usage breakdown settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUsageConfig {
    /// Files inspected before the breakdown is reported as truncated
    pub max_files_scanned: usize,
}

impl Default for FileUsageConfig {
    fn default() -> Self {
        Self {
            max_files_scanned: 10_000,
        }
    }
}
