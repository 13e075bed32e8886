//! # Ballast Editor
//!
//! The definition synchronization engine: keeps the remote store, the
//! decoded preview, and the raw text buffer of an editing session
//! consistent.
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ codec: YAML text ⇄ Vec<DefinitionRecord>       │
//! └────────────────────────────────────────────────┘
//!                      ↓
//! ┌────────────────────────────────────────────────┐
//! │ editor: session + diff + executor              │
//! │  - EditSession: debounced decode-on-edit       │
//! │  - diff_definitions: desired vs. baseline      │
//! │  - Executor: upserts then deletes, aggregated  │
//! └────────────────────────────────────────────────┘
//!                      ↓
//! ┌────────────────────────────────────────────────┐
//! │ store: REST collaborator (list/upsert/delete)  │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Text is authored by `id`**: the diff matches records by their
//!    user-chosen `id`; the store-assigned `db_id` is only a delete key
//! 2. **Upserts are cheap**: the store's upsert is idempotent, so every
//!    desired record is upserted, with no partial-equality comparison logic
//! 3. **Last edit wins**: each edit cancels any scheduled decode; the
//!    preview never reflects an intermediate keystroke state
//! 4. **Partial failure is a result**: the executor attempts every
//!    operation and reports the full outcome, never masking a partial save

mod diff;
mod executor;
mod session;

pub use diff::{diff_definitions, ReconcileOp, ReconcilePlan};
pub use executor::{Executor, OpFailure, OpKind, OpReceipt, ReconcileReport};
pub use session::{EditSession, SessionError, SessionOptions, SessionState};
