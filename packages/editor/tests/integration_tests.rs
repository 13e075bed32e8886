//! Integration tests for the synchronization engine: load → edit → preview
//! → save against an in-memory store.

use async_trait::async_trait;
use ballast_definitions::{
    DefinitionKind, DefinitionRecord, Metadata, PlanItem, PlanItemUi, ScalingPlanDefinition,
};
use ballast_editor::{EditSession, SessionOptions, SessionState};
use ballast_store::{DefinitionStore, InMemoryDefinitionStore, StoreError};
use std::sync::Arc;

fn plan(id: &str, expression: &str) -> DefinitionRecord {
    DefinitionRecord::ScalingPlan(ScalingPlanDefinition {
        id: id.to_string(),
        db_id: None,
        metadata: Metadata::new(),
        plans: vec![PlanItem {
            id: format!("{}-step-1", id),
            description: None,
            expression: Some(expression.to_string()),
            cron_expression: None,
            priority: 1,
            scaling_components: vec![],
            ui: Some(PlanItemUi {
                x: 100.0,
                y: 50.0,
                selected: false,
            }),
        }],
        enabled: true,
    })
}

#[tokio::test]
async fn test_full_edit_and_save_cycle() {
    let store = Arc::new(InMemoryDefinitionStore::new());
    let kind = DefinitionKind::ScalingPlan;
    store.seed(kind, vec![plan("scale-out", "cpu_average > 70")]);

    let session = EditSession::new(store.clone(), kind, SessionOptions::default());
    session.load().await.unwrap();

    // The loaded buffer is the encoded baseline, with view state stripped.
    let buffer = session.buffer();
    assert!(buffer.contains("id: scale-out"));
    assert!(!buffer.contains("ui:"));

    // Author a second plan and rename nothing.
    let edited = format!(
        "{}---\nkind: ScalingPlan\nid: scale-in\nplans:\n  - id: scale-in-step-1\n    expression: \"cpu_average < 20\"\n    priority: 2\n",
        buffer
    );
    session.edit(edited);

    let report = session.save().await.unwrap();
    assert!(report.all_succeeded());
    // Two upserts, no deletes.
    assert_eq!(report.len(), 2);

    let records = store.records(kind);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|record| record.db_id().is_some()));
    assert_eq!(session.state(), SessionState::Clean);
}

#[tokio::test]
async fn test_removing_a_document_deletes_the_record() {
    let store = Arc::new(InMemoryDefinitionStore::new());
    let kind = DefinitionKind::ScalingPlan;
    store.seed(
        kind,
        vec![
            plan("scale-out", "cpu_average > 70"),
            plan("scale-in", "cpu_average < 20"),
        ],
    );

    let session = EditSession::new(store.clone(), kind, SessionOptions::default());
    session.load().await.unwrap();

    // Keep only the scale-out plan.
    let kept = ballast_codec::encode_definitions(&session.baseline()[..1]).unwrap();
    session.edit(kept);
    let report = session.save().await.unwrap();

    assert!(report.all_succeeded());
    let records = store.records(kind);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id(), "scale-out");
}

#[tokio::test]
async fn test_round_trip_through_store_preserves_payload() {
    let store = Arc::new(InMemoryDefinitionStore::new());
    let kind = DefinitionKind::ScalingPlan;

    let session = EditSession::new(store.clone(), kind, SessionOptions::default());
    session.load().await.unwrap();

    session.edit(
        "kind: ScalingPlan\nid: nightly\nmetadata:\n  owner: platform-team\nplans:\n  - id: nightly-step-1\n    cron_expression: \"0 2 * * *\"\n    priority: 5\nenabled: true\n",
    );
    session.save().await.unwrap();

    let stored = store.list(kind).await.unwrap();
    let DefinitionRecord::ScalingPlan(stored_plan) = &stored[0] else {
        panic!("expected a scaling plan");
    };
    assert_eq!(stored_plan.plans[0].cron_expression.as_deref(), Some("0 2 * * *"));
    assert_eq!(stored_plan.plans[0].priority, 5);
    assert_eq!(
        stored_plan.metadata["owner"],
        serde_yaml::Value::from("platform-team")
    );

    // Saving the reloaded buffer unchanged is a no-op diff-wise: same ids,
    // idempotent upserts, nothing deleted.
    session.edit(session.buffer());
    let report = session.save().await.unwrap();
    assert!(report.all_succeeded());
    assert_eq!(store.records(kind).len(), 1);
}

/// Store wrapper that refuses upserts for one id.
struct FlakyStore {
    inner: InMemoryDefinitionStore,
    fail_id: String,
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
        if record.id() == self.fail_id {
            return Err(StoreError::Network("connection reset".to_string()));
        }
        self.inner.upsert(kind, record).await
    }

    async fn delete(&self, kind: DefinitionKind, db_id: &str) -> Result<(), StoreError> {
        self.inner.delete(kind, db_id).await
    }
}

#[tokio::test]
async fn test_partial_save_is_reported_and_still_rebaselines() {
    let kind = DefinitionKind::ScalingPlan;
    let store = Arc::new(FlakyStore {
        inner: InMemoryDefinitionStore::new(),
        fail_id: "scale-in".to_string(),
    });

    let session = EditSession::new(store.clone(), kind, SessionOptions::default());
    session.load().await.unwrap();

    session.edit(
        "kind: ScalingPlan\nid: scale-out\n---\nkind: ScalingPlan\nid: scale-in\n---\nkind: ScalingPlan\nid: nightly\n",
    );
    let report = session.save().await.unwrap();

    // Two landed, one named failure; partial success is surfaced, not masked.
    assert!(report.is_partial());
    assert_eq!(report.succeeded.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].key, "scale-in");

    // The baseline was still re-fetched: it reflects true remote state
    // (the two records that landed), not the user's intent.
    assert_eq!(session.state(), SessionState::Clean);
    let baseline_ids: Vec<String> = session
        .baseline()
        .iter()
        .map(|record| record.id().to_string())
        .collect();
    assert_eq!(baseline_ids, vec!["scale-out", "nightly"]);
}
