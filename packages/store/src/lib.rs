//! # Definition Store
//!
//! Access to the remote definition store, abstracted behind the
//! [`DefinitionStore`] trait so sessions and tools receive an explicit
//! collaborator handle instead of reaching for process-wide state.
//!
//! Two implementations:
//! - [`HttpDefinitionStore`]: the real REST client
//! - [`InMemoryDefinitionStore`]: in-process store for tests and dry runs
//!
//! All operations are idempotent at the store boundary: `upsert` is
//! create-or-replace, and `delete` of a missing key succeeds.

mod error;
mod http;
mod memory;

pub use error::StoreError;
pub use http::HttpDefinitionStore;
pub use memory::InMemoryDefinitionStore;

use async_trait::async_trait;
use ballast_definitions::{DefinitionKind, DefinitionRecord};

/// Remote collaborator holding persisted definition records.
#[async_trait]
pub trait DefinitionStore: Send + Sync {
    /// Fetch all current records of a kind.
    async fn list(&self, kind: DefinitionKind) -> Result<Vec<DefinitionRecord>, StoreError>;

    /// Idempotent create-or-replace. Returns the stored record, including
    /// the store-assigned `db_id`.
    async fn upsert(
        &self,
        kind: DefinitionKind,
        record: DefinitionRecord,
    ) -> Result<DefinitionRecord, StoreError>;

    /// Delete by store-assigned key. Deleting a missing key is not an error.
    async fn delete(&self, kind: DefinitionKind, db_id: &str) -> Result<(), StoreError>;
}
