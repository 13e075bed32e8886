//! # Reconciliation Executor
//!
//! Applies a [`ReconcilePlan`] against the definition store. Upserts are
//! issued before deletes: an upsert that is semantically a rename must not
//! race with the delete of an unrelated record sharing store-level side
//! effects. Within each phase operations are independent by key and run
//! concurrently.
//!
//! Every operation is attempted even when a sibling fails. The outcome is
//! an aggregate [`ReconcileReport`]; partial success is a result to be
//! shown to the user, never collapsed into total success or total failure.

use crate::ReconcilePlan;
use ballast_definitions::DefinitionKind;
use ballast_store::{DefinitionStore, StoreError};
use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Upsert,
    Delete,
}

/// A completed operation, keyed the way it was issued: upserts by record
/// `id`, deletes by `db_id`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpReceipt {
    pub op: OpKind,
    pub key: String,
}

/// A failed operation with the error that sank it.
#[derive(Debug)]
pub struct OpFailure {
    pub op: OpKind,
    pub key: String,
    pub error: StoreError,
}

/// Aggregate outcome of one reconciliation batch.
#[derive(Debug)]
pub struct ReconcileReport {
    pub succeeded: Vec<OpReceipt>,
    pub failed: Vec<OpFailure>,
    pub completed_at: DateTime<Utc>,
}

impl ReconcileReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    /// Some operations landed and some did not.
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty() && !self.succeeded.is_empty()
    }

    pub fn len(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Applies reconcile plans for one definition kind against one store.
pub struct Executor {
    store: Arc<dyn DefinitionStore>,
    kind: DefinitionKind,
    request_timeout: Duration,
}

impl Executor {
    pub fn new(
        store: Arc<dyn DefinitionStore>,
        kind: DefinitionKind,
        request_timeout: Duration,
    ) -> Self {
        Self {
            store,
            kind,
            request_timeout,
        }
    }

    /// Apply the plan and report every operation's outcome.
    ///
    /// The upsert phase completes, successes and failures both, before the
    /// first delete is issued.
    pub async fn apply(&self, plan: ReconcilePlan) -> ReconcileReport {
        info!(
            kind = %self.kind,
            upserts = plan.upserts.len(),
            deletes = plan.deletes.len(),
            "applying reconcile plan"
        );

        let mut succeeded = Vec::new();
        let mut failed = Vec::new();

        let upserts = plan.upserts.into_iter().map(|record| {
            let key = record.id().to_string();
            async move {
                let result = self.with_timeout(self.store.upsert(self.kind, record)).await;
                (key, result.map(|_| ()))
            }
        });
        for (key, result) in join_all(upserts).await {
            record_outcome(OpKind::Upsert, key, result, &mut succeeded, &mut failed);
        }

        let deletes = plan.deletes.into_iter().map(|db_id| async move {
            let result = self.with_timeout(self.store.delete(self.kind, &db_id)).await;
            (db_id, result)
        });
        for (key, result) in join_all(deletes).await {
            record_outcome(OpKind::Delete, key, result, &mut succeeded, &mut failed);
        }

        if !failed.is_empty() {
            warn!(
                kind = %self.kind,
                failed = failed.len(),
                succeeded = succeeded.len(),
                "reconcile batch completed with failures"
            );
        }

        ReconcileReport {
            succeeded,
            failed,
            completed_at: Utc::now(),
        }
    }

    async fn with_timeout<T>(
        &self,
        call: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout),
        }
    }
}

fn record_outcome(
    op: OpKind,
    key: String,
    result: Result<(), StoreError>,
    succeeded: &mut Vec<OpReceipt>,
    failed: &mut Vec<OpFailure>,
) {
    match result {
        Ok(()) => succeeded.push(OpReceipt { op, key }),
        Err(error) => failed.push(OpFailure { op, key, error }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ballast_definitions::{DefinitionRecord, Metadata, ScalingComponentDefinition};
    use ballast_store::InMemoryDefinitionStore;
    use std::collections::HashSet;

    fn component(id: &str) -> DefinitionRecord {
        DefinitionRecord::ScalingComponent(ScalingComponentDefinition {
            id: id.to_string(),
            db_id: None,
            component_kind: "aws-ec2-autoscaling".to_string(),
            metadata: Metadata::new(),
            enabled: true,
        })
    }

    /// Store wrapper that fails upserts for a chosen set of ids.
    struct FlakyStore {
        inner: InMemoryDefinitionStore,
        fail_ids: HashSet<String>,
    }

    #[async_trait]
    impl DefinitionStore for FlakyStore {
        async fn list(&self, kind: DefinitionKind) -> Result<Vec<DefinitionRecord>, StoreError> {
            self.inner.list(kind).await
        }

        async fn upsert(
            &self,
            kind: DefinitionKind,
            record: DefinitionRecord,
        ) -> Result<DefinitionRecord, StoreError> {
            if self.fail_ids.contains(record.id()) {
                return Err(StoreError::Network("connection reset".to_string()));
            }
            self.inner.upsert(kind, record).await
        }

        async fn delete(&self, kind: DefinitionKind, db_id: &str) -> Result<(), StoreError> {
            self.inner.delete(kind, db_id).await
        }
    }

    /// Store whose calls never complete.
    struct HangingStore;

    #[async_trait]
    impl DefinitionStore for HangingStore {
        async fn list(&self, _kind: DefinitionKind) -> Result<Vec<DefinitionRecord>, StoreError> {
            futures::future::pending().await
        }

        async fn upsert(
            &self,
            _kind: DefinitionKind,
            _record: DefinitionRecord,
        ) -> Result<DefinitionRecord, StoreError> {
            futures::future::pending().await
        }

        async fn delete(&self, _kind: DefinitionKind, _db_id: &str) -> Result<(), StoreError> {
            futures::future::pending().await
        }
    }

    #[tokio::test]
    async fn test_partial_failure_is_reported_per_operation() {
        let store = Arc::new(FlakyStore {
            inner: InMemoryDefinitionStore::new(),
            fail_ids: HashSet::from(["workers".to_string()]),
        });
        let executor = Executor::new(
            store.clone(),
            DefinitionKind::ScalingComponent,
            Duration::from_secs(5),
        );

        let plan = ReconcilePlan {
            upserts: vec![component("web-servers"), component("workers"), component("cache")],
            deletes: vec![],
        };
        let report = executor.apply(plan).await;

        assert_eq!(report.succeeded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].key, "workers");
        assert_eq!(report.failed[0].op, OpKind::Upsert);
        assert!(report.is_partial());
        assert!(!report.all_succeeded());
    }

    #[tokio::test]
    async fn test_upserts_and_deletes_both_applied() {
        let store = Arc::new(InMemoryDefinitionStore::new());
        let kind = DefinitionKind::ScalingComponent;
        store.seed(kind, vec![component("old")]);
        let db_id = store.records(kind)[0].db_id().unwrap().to_string();

        let executor = Executor::new(store.clone(), kind, Duration::from_secs(5));
        let report = executor
            .apply(ReconcilePlan {
                upserts: vec![component("new")],
                deletes: vec![db_id],
            })
            .await;

        assert!(report.all_succeeded());
        assert_eq!(report.len(), 2);

        let remaining = store.records(kind);
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), "new");
    }

    #[tokio::test(start_paused = true)]
    async fn test_hanging_call_reports_timeout() {
        let executor = Executor::new(
            Arc::new(HangingStore),
            DefinitionKind::ScalingComponent,
            Duration::from_secs(2),
        );

        let report = executor
            .apply(ReconcilePlan {
                upserts: vec![component("web-servers")],
                deletes: vec![],
            })
            .await;

        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].error, StoreError::Timeout));
    }

    #[tokio::test]
    async fn test_empty_plan_reports_empty_success() {
        let executor = Executor::new(
            Arc::new(InMemoryDefinitionStore::new()),
            DefinitionKind::ScalingPlan,
            Duration::from_secs(5),
        );

        let report = executor.apply(ReconcilePlan::default()).await;
        assert!(report.is_empty());
        assert!(report.all_succeeded());
        assert!(!report.is_partial());
    }
}
