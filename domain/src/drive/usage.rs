//! Storage usage aggregation by content type

use super::entities::DriveFile;
use serde::Serialize;
use std::collections::BTreeMap;

/// Count and byte total for one content type
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEntry {
    pub count: u64,
    pub bytes: u64,
}

/// Usage of the files visible to the user, grouped by MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageBreakdown {
    pub total_files: u64,
    pub total_bytes: u64,
    pub by_mime_type: BTreeMap<String, UsageEntry>,
    /// True when the scan stopped at its file limit before the listing ended
    pub truncated: bool,
}

impl UsageBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, file: &DriveFile) {
        let bytes = file.size_bytes();
        let mime = file
            .mime_type
            .clone()
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let entry = self.by_mime_type.entry(mime).or_default();
        entry.count += 1;
        entry.bytes += bytes;
        self.total_files += 1;
        self.total_bytes += bytes;
    }

    pub fn extend<'a>(&mut self, files: impl IntoIterator<Item = &'a DriveFile>) {
        for file in files {
            self.add(file);
        }
    }

    /// Entries sorted by bytes, largest first
    pub fn largest_first(&self) -> Vec<(&str, UsageEntry)> {
        let mut entries: Vec<(&str, UsageEntry)> = self
            .by_mime_type
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.bytes.cmp(&a.1.bytes).then(a.0.cmp(b.0)));
        entries
    }
}
