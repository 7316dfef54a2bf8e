//! Tool parameters: limits that shape how use cases call the provider.
//!
//! [`ToolParams`] groups the static parameters read by the Drive use cases.
//! These are application-layer concerns, loaded from the `[batch]`,
//! `[search]` and `[usage]` configuration sections.

use serde::{Deserialize, Serialize};

/// Limits applied by the Drive use cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolParams {
    /// Maximum number of sub-operations of one batch in flight at once.
    pub max_concurrency: usize,
    /// Page size used when a listing call gives none.
    pub default_page_size: u32,
    /// Upper bound applied to caller-supplied page sizes.
    pub max_page_size: u32,
    /// Maximum number of files inspected by the usage breakdown.
    pub max_files_scanned: usize,
}

impl Default for ToolParams {
    fn default() -> Self {
        Self {
            max_concurrency: 10,
            default_page_size: 10,
            max_page_size: 100,
            max_files_scanned: 10_000,
        }
    }
}

impl ToolParams {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrency(mut self, max: usize) -> Self {
        self.max_concurrency = max;
        self
    }

    pub fn with_page_sizes(mut self, default: u32, max: u32) -> Self {
        self.default_page_size = default;
        self.max_page_size = max;
        self
    }

    pub fn with_max_files_scanned(mut self, max: usize) -> Self {
        self.max_files_scanned = max;
        self
    }

    /// Resolve a caller-supplied page size: default when absent, clamped to
    /// `1..=max_page_size` otherwise.
    pub fn page_size(&self, requested: Option<i64>) -> u32 {
        match requested {
            None => self.default_page_size,
            Some(n) if n < 1 => 1,
            Some(n) => u32::try_from(n)
                .unwrap_or(u32::MAX)
                .min(self.max_page_size),
        }
    }

    /// Concurrency cap, never below one
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}
