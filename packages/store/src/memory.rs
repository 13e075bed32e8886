use crate::{DefinitionStore, StoreError};
use async_trait::async_trait;
use ballast_definitions::{DefinitionKind, DefinitionRecord};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// In-process store with the same contract as the HTTP client.
///
/// Upsert matches by `id` within a kind: an existing record is replaced in
/// place and keeps its store-assigned `db_id`; a new record is appended and
/// assigned a fresh one.
#[derive(Default)]
pub struct InMemoryDefinitionStore {
    records: Mutex<HashMap<DefinitionKind, Vec<DefinitionRecord>>>,
    next_db_id: AtomicU64,
}

impl InMemoryDefinitionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a batch synchronously. Test setup helper.
    pub fn seed(&self, kind: DefinitionKind, records: Vec<DefinitionRecord>) {
        for record in records {
            self.upsert_record(kind, record);
        }
    }

    /// Snapshot of the stored records for a kind.
    pub fn records(&self, kind: DefinitionKind) -> Vec<DefinitionRecord> {
        self.records
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    fn upsert_record(&self, kind: DefinitionKind, mut record: DefinitionRecord) -> DefinitionRecord {
        let mut records = self.records.lock().unwrap();
        let collection = records.entry(kind).or_default();

        if let Some(existing) = collection.iter_mut().find(|r| r.id() == record.id()) {
            // The store's key wins over whatever the caller sent.
            record.set_db_id(existing.db_id().map(str::to_string));
            *existing = record.clone();
            return record;
        }

        let db_id = format!("def-{}", self.next_db_id.fetch_add(1, Ordering::Relaxed) + 1);
        record.set_db_id(Some(db_id));
        collection.push(record.clone());
        record
    }
}

#[async_trait]
impl DefinitionStore for InMemoryDefinitionStore {
    async fn list(&self, kind: DefinitionKind) -> Result<Vec<DefinitionRecord>, StoreError> {
        Ok(self.records(kind))
    }

    async fn upsert(
        &self,
        kind: DefinitionKind,
        record: DefinitionRecord,
    ) -> Result<DefinitionRecord, StoreError> {
        Ok(self.upsert_record(kind, record))
    }

    async fn delete(&self, kind: DefinitionKind, db_id: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().unwrap();
        if let Some(collection) = records.get_mut(&kind) {
            collection.retain(|record| record.db_id() != Some(db_id));
        }
        Ok(())
    }
}
