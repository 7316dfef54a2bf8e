//! Batch operations and their aggregated outcomes
//!
//! A batch is an ordered list of independent [`Operation`]s. Each one yields
//! exactly one [`Outcome`], tagged with the operation's identifying fields so
//! callers can key results by id rather than by position. A [`BatchReport`]
//! pairs the outcomes with a [`BatchSummary`] derived from them.

pub mod operations;

pub use operations::{CopyRequest, FileTarget, MoveRequest, PermissionUpdate};

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One requested unit of work within a batch
pub trait Operation: Send + Sync {
    /// Identifying fields echoed into the outcome (e.g. `{"fileId": "..."}`)
    fn key(&self) -> Map<String, Value>;

    /// Check the operation's shape before any remote call
    fn validate(&self) -> Result<(), DomainError>;
}

/// Result of attempting one operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    #[serde(flatten)]
    pub key: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    /// Provider payload (successful outcomes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Provider error message (failed outcomes only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Outcome {
    pub fn success(key: Map<String, Value>, data: Option<Value>) -> Self {
        Self {
            success: true,
            key,
            operation: None,
            data,
            error: None,
        }
    }

    pub fn failure(key: Map<String, Value>, error: impl Into<String>) -> Self {
        Self {
            success: false,
            key,
            operation: None,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Label the kind of sub-operation performed (e.g. "trash" or "delete")
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Echoed value of an identifying field
    pub fn key_str(&self, field: &str) -> Option<&str> {
        self.key.get(field).and_then(Value::as_str)
    }
}

/// Counts derived from a list of outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_operations: usize,
    pub successful: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        let successful = outcomes.iter().filter(|o| o.success).count();
        Self {
            total_operations: outcomes.len(),
            successful,
            failed: outcomes.len() - successful,
        }
    }
}

/// Full result of a batch tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub results: Vec<Outcome>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn from_outcomes(results: Vec<Outcome>) -> Self {
        let summary = BatchSummary::from_outcomes(&results);
        Self { results, summary }
    }

    /// Outcome echoing the given value for `field`
    pub fn find(&self, field: &str, value: &str) -> Option<&Outcome> {
        self.results.iter().find(|o| o.key_str(field) == Some(value))
    }
}

/// Validate every operation of a batch, reporting the first bad position
pub fn validate_all<O: Operation>(operations: &[O]) -> Result<(), DomainError> {
    for (index, op) in operations.iter().enumerate() {
        op.validate().map_err(|e| {
            DomainError::InvalidBatch(format!("operation {}: {}", index, e))
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(id: &str) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("fileId".to_string(), json!(id));
        map
    }

    #[test]
    fn test_empty_summary() {
        let report = BatchReport::from_outcomes(Vec::new());
        assert_eq!(report.summary, BatchSummary::default());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            json!({"results": [], "summary": {"totalOperations": 0, "successful": 0, "failed": 0}})
        );
    }

    #[test]
    fn test_summary_partitions_outcomes() {
        let report = BatchReport::from_outcomes(vec![
            Outcome::success(key("A"), Some(json!({"id": "A"}))),
            Outcome::failure(key("B"), "File not found: B."),
            Outcome::success(key("C"), None),
        ]);
        assert_eq!(report.summary.total_operations, 3);
        assert_eq!(report.summary.successful, 2);
        assert_eq!(report.summary.failed, 1);
        assert_eq!(report.find("fileId", "B").map(|o| o.success), Some(false));
    }

    #[test]
    fn test_outcome_shape() {
        let ok = Outcome::success(key("A"), None).with_operation("trash");
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({"success": true, "fileId": "A", "operation": "trash"})
        );

        let failed = Outcome::failure(key("B"), "File not found: B.").with_operation("trash");
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"success": false, "fileId": "B", "operation": "trash", "error": "File not found: B."})
        );
    }

    #[test]
    fn test_validate_all_reports_position() {
        let ops = vec![FileTarget::new("A"), FileTarget::new("")];
        let err = validate_all(&ops).unwrap_err();
        assert!(err.to_string().contains("operation 1"));
        assert!(validate_all::<FileTarget>(&[]).is_ok());
    }
}
