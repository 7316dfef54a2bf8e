//! Batch use cases
//!
//! [`BatchExecutor`] fans independent operations out over a bounded number of
//! tasks and folds each result into an [`Outcome`]. No failure, not even a
//! panicking task, escapes: every operation yields exactly one outcome.
//!
//! [`BatchUseCase`] builds the five batch tools on top of it.

use crate::config::ToolParams;
use crate::ports::drive_gateway::{CopyTarget, DriveGateway, FileUpdate, GatewayError};
use crate::use_cases::error::UseCaseError;
use crate::use_cases::shared::to_payload;
use gdrive_domain::batch::validate_all;
use gdrive_domain::{
    BatchReport, CopyRequest, FileTarget, MoveRequest, Operation, Outcome, PermissionUpdate,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Runs the operations of one batch with a concurrency cap
#[derive(Debug, Clone)]
pub struct BatchExecutor {
    max_concurrency: usize,
}

impl BatchExecutor {
    pub fn new(max_concurrency: usize) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    /// Perform every operation and collect one outcome per operation.
    ///
    /// `label`, when given, is echoed as the `operation` field of every
    /// outcome. Outcomes come back in completion order.
    pub async fn execute<O, F, Fut>(
        &self,
        operations: Vec<O>,
        label: Option<&str>,
        perform: F,
    ) -> BatchReport
    where
        O: Operation + 'static,
        F: Fn(O) -> Fut,
        Fut: Future<Output = Result<Option<Value>, UseCaseError>> + Send + 'static,
    {
        let total = operations.len();
        debug!(
            "Dispatching batch of {} operations (max {} in flight)",
            total, self.max_concurrency
        );

        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let mut join_set = JoinSet::new();
        let mut keys: HashMap<tokio::task::Id, Map<String, Value>> = HashMap::with_capacity(total);

        for op in operations {
            let key = op.key();
            let task = perform(op);
            let semaphore = Arc::clone(&semaphore);
            let handle = join_set.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| GatewayError::Transport(e.to_string()))?;
                task.await
            });
            keys.insert(handle.id(), key);
        }

        let mut outcomes = Vec::with_capacity(total);
        while let Some(joined) = join_set.join_next_with_id().await {
            let outcome = match joined {
                Ok((id, Ok(data))) => Outcome::success(keys.remove(&id).unwrap_or_default(), data),
                Ok((id, Err(e))) => {
                    let key = keys.remove(&id).unwrap_or_default();
                    warn!("Batch operation {:?} failed: {}", key, e);
                    Outcome::failure(key, e.to_string())
                }
                Err(e) => {
                    let key = keys.remove(&e.id()).unwrap_or_default();
                    warn!("Batch operation {:?} aborted: {}", key, e);
                    Outcome::failure(key, format!("Operation aborted: {}", e))
                }
            };
            outcomes.push(match label {
                Some(label) => outcome.with_operation(label),
                None => outcome,
            });
        }

        let report = BatchReport::from_outcomes(outcomes);
        info!(
            "Batch finished: {} total, {} successful, {} failed",
            report.summary.total_operations, report.summary.successful, report.summary.failed
        );
        report
    }
}

/// Use case for the batch tools
pub struct BatchUseCase {
    gateway: Arc<dyn DriveGateway>,
    executor: BatchExecutor,
}

impl BatchUseCase {
    pub fn new(gateway: Arc<dyn DriveGateway>, params: &ToolParams) -> Self {
        Self {
            gateway,
            executor: BatchExecutor::new(params.concurrency()),
        }
    }

    /// Metadata of every file
    pub async fn get_metadata(&self, files: Vec<FileTarget>) -> Result<BatchReport, UseCaseError> {
        validate_all(&files)?;
        let gateway = Arc::clone(&self.gateway);
        Ok(self
            .executor
            .execute(files, None, move |op| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let file = gateway.get_file(op.file_id.trim()).await?;
                    Ok(Some(to_payload(&file)?))
                }
            })
            .await)
    }

    /// Change the role of several permissions
    pub async fn update_permissions(
        &self,
        updates: Vec<PermissionUpdate>,
    ) -> Result<BatchReport, UseCaseError> {
        validate_all(&updates)?;
        let gateway = Arc::clone(&self.gateway);
        Ok(self
            .executor
            .execute(updates, None, move |op| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let permission = gateway
                        .update_permission(op.file_id.trim(), op.permission_id.trim(), op.role)
                        .await?;
                    Ok(Some(to_payload(&permission)?))
                }
            })
            .await)
    }

    /// Trash (or permanently delete) every file
    pub async fn delete(
        &self,
        files: Vec<FileTarget>,
        permanent: bool,
    ) -> Result<BatchReport, UseCaseError> {
        validate_all(&files)?;
        let label = if permanent { "delete" } else { "trash" };
        let gateway = Arc::clone(&self.gateway);
        Ok(self
            .executor
            .execute(files, Some(label), move |op| {
                let gateway = Arc::clone(&gateway);
                async move {
                    if permanent {
                        gateway.delete_file(op.file_id.trim()).await?;
                    } else {
                        gateway
                            .update_file(op.file_id.trim(), &FileUpdate::trashed(true))
                            .await?;
                    }
                    Ok(None)
                }
            })
            .await)
    }

    /// Copy every file, each optionally renamed or placed in another folder
    pub async fn copy(&self, copies: Vec<CopyRequest>) -> Result<BatchReport, UseCaseError> {
        validate_all(&copies)?;
        let gateway = Arc::clone(&self.gateway);
        Ok(self
            .executor
            .execute(copies, None, move |op| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let target = CopyTarget {
                        name: op.name.as_deref().map(|n| n.trim().to_string()),
                        parents: op.parent_id.into_iter().collect(),
                    };
                    let copy = gateway.copy_file(op.file_id.trim(), &target).await?;
                    Ok(Some(to_payload(&copy)?))
                }
            })
            .await)
    }

    /// Move every file to its new parent.
    ///
    /// Each move reads the file's current parents first, then replaces them.
    /// A failed read only fails that move.
    pub async fn move_files(&self, moves: Vec<MoveRequest>) -> Result<BatchReport, UseCaseError> {
        validate_all(&moves)?;
        let gateway = Arc::clone(&self.gateway);
        Ok(self
            .executor
            .execute(moves, None, move |op| {
                let gateway = Arc::clone(&gateway);
                async move {
                    let file_id = op.file_id.trim();
                    let current = gateway.get_file(file_id).await?;
                    let update = FileUpdate::move_to(
                        vec![op.new_parent_id.trim().to_string()],
                        current.parents,
                    );
                    let moved = gateway.update_file(file_id, &update).await?;
                    Ok(Some(to_payload(&moved)?))
                }
            })
            .await)
    }
}
