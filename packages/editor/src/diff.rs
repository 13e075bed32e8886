//! # Identity Diff
//!
//! Computes the operations needed to make the remote store match a locally
//! edited collection. Two records are the same entity iff their `id` values
//! are equal: users author and edit by `id`, while the store tracks records
//! by `db_id`, so matching happens on `id` and deletion is keyed by `db_id`.

use ballast_definitions::DefinitionRecord;
use std::collections::HashSet;

/// One reconciliation operation. Never mutated after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum ReconcileOp {
    /// Idempotent create-or-replace of one record.
    Upsert(DefinitionRecord),

    /// Removal of one persisted record, keyed by `db_id`.
    Delete(String),
}

/// Operation set produced by [`diff_definitions`].
///
/// Upserts and deletes are independent sets; ordering guarantees for
/// execution belong to the executor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReconcilePlan {
    pub upserts: Vec<DefinitionRecord>,
    pub deletes: Vec<String>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.upserts.is_empty() && self.deletes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.upserts.len() + self.deletes.len()
    }

    /// Flatten into operations, upserts first.
    pub fn into_ops(self) -> Vec<ReconcileOp> {
        let mut ops: Vec<ReconcileOp> = self
            .upserts
            .into_iter()
            .map(ReconcileOp::Upsert)
            .collect();
        ops.extend(self.deletes.into_iter().map(ReconcileOp::Delete));
        ops
    }
}

/// Compare a desired collection against the last known remote state.
///
/// Every desired record becomes an upsert: the store's upsert is an
/// idempotent create-or-replace, so no unchanged-record detection is
/// attempted. Every current record whose `id` does not appear in the
/// desired collection becomes a delete keyed by its `db_id`. Records that
/// were never persisted have no `db_id` and can never be deleted.
///
/// Duplicate `id`s in `desired` each produce an upsert; for delete-side
/// presence checking the id counts once.
pub fn diff_definitions(
    desired: &[DefinitionRecord],
    current: &[DefinitionRecord],
) -> ReconcilePlan {
    let desired_ids: HashSet<&str> = desired.iter().map(|record| record.id()).collect();

    let upserts = desired.to_vec();
    let deletes = current
        .iter()
        .filter(|record| !desired_ids.contains(record.id()))
        .filter_map(|record| record.db_id().map(str::to_string))
        .collect();

    ReconcilePlan { upserts, deletes }
}
