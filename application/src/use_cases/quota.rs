//! Storage quota and usage reporting.

use crate::config::ToolParams;
use crate::ports::drive_gateway::{DriveGateway, FileQuery};
use crate::use_cases::error::UseCaseError;
use gdrive_domain::query::not_trashed_predicate;
use gdrive_domain::{DriveUser, StorageQuota, UsageBreakdown};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Largest page the provider serves for file listings
const SCAN_PAGE_SIZE: u32 = 1000;

const SCAN_FIELDS: &str = "id, mimeType, size";

/// Storage quota in bytes; `limit` is absent for unlimited accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<DriveUser>,
    pub limit: Option<u64>,
    pub usage: u64,
    pub usage_in_drive: u64,
    pub usage_in_drive_trash: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_used: Option<f64>,
}

impl QuotaReport {
    fn from_quota(user: Option<DriveUser>, quota: &StorageQuota) -> Self {
        let parse = |v: &Option<String>| v.as_deref().and_then(|s| s.parse::<u64>().ok());
        let limit = parse(&quota.limit);
        let usage = parse(&quota.usage).unwrap_or(0);
        let percent_used = limit
            .filter(|l| *l > 0)
            .map(|l| (usage as f64 / l as f64 * 10_000.0).round() / 100.0);
        Self {
            user,
            limit,
            usage,
            usage_in_drive: parse(&quota.usage_in_drive).unwrap_or(0),
            usage_in_drive_trash: parse(&quota.usage_in_drive_trash).unwrap_or(0),
            percent_used,
        }
    }
}

/// Use case for quota and usage
pub struct QuotaUseCase {
    gateway: Arc<dyn DriveGateway>,
    params: ToolParams,
}

impl QuotaUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: ToolParams) -> Self {
        Self { gateway, params }
    }

    pub async fn get_quota(&self) -> Result<QuotaReport, UseCaseError> {
        let about = self.gateway.about().await?;
        let quota = about.storage_quota.unwrap_or_default();
        Ok(QuotaReport::from_quota(about.user, &quota))
    }

    /// Aggregate the sizes of all non-trashed files by MIME type.
    ///
    /// Scanning stops after `max_files_scanned` files; the result is then
    /// marked as truncated.
    pub async fn usage_breakdown(&self) -> Result<UsageBreakdown, UseCaseError> {
        let limit = self.params.max_files_scanned;
        let mut usage = UsageBreakdown::new();
        let mut scanned = 0usize;
        let mut page_token: Option<String> = None;

        loop {
            let query = FileQuery::new(not_trashed_predicate(), SCAN_PAGE_SIZE)
                .with_page_token(page_token.take())
                .with_file_fields(SCAN_FIELDS);
            let page = self.gateway.list_files(&query).await?;
            debug!("Usage scan: {} files on this page", page.items.len());

            for file in &page.items {
                if scanned >= limit {
                    usage.truncated = true;
                    return Ok(usage);
                }
                usage.add(file);
                scanned += 1;
            }

            match page.next_page_token {
                Some(token) if scanned < limit => page_token = Some(token),
                Some(_) => {
                    usage.truncated = true;
                    return Ok(usage);
                }
                None => return Ok(usage),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::testing::FakeDrive;

    fn fake() -> Arc<FakeDrive> {
        Arc::new(
            FakeDrive::new()
                .with_file("a", "a.txt", "text/plain", "12345")
                .with_file("b", "b.txt", "text/plain", "123")
                .with_file("c", "c.png", "image/png", "1234567890"),
        )
    }

    #[tokio::test]
    async fn test_quota_report() {
        let report = QuotaUseCase::new(fake(), ToolParams::default())
            .get_quota()
            .await
            .unwrap();
        assert_eq!(report.limit, Some(1000));
        assert_eq!(report.usage, 250);
        assert_eq!(report.usage_in_drive_trash, 50);
        assert_eq!(report.percent_used, Some(25.0));
    }

    #[tokio::test]
    async fn test_usage_breakdown() {
        let fake = fake();
        let usage = QuotaUseCase::new(fake.clone(), ToolParams::default())
            .usage_breakdown()
            .await
            .unwrap();

        assert_eq!(usage.total_files, 3);
        assert_eq!(usage.total_bytes, 18);
        assert_eq!(usage.by_mime_type["text/plain"].count, 2);
        assert!(!usage.truncated);
        assert_eq!(
            fake.last_query().unwrap().predicate.as_deref(),
            Some("trashed = false")
        );
    }

    #[tokio::test]
    async fn test_usage_breakdown_truncates() {
        let usage = QuotaUseCase::new(fake(), ToolParams::default().with_max_files_scanned(2))
            .usage_breakdown()
            .await
            .unwrap();
        assert_eq!(usage.total_files, 2);
        assert!(usage.truncated);
    }
}
