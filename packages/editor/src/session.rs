//! # Edit Session Controller
//!
//! Tracks one editing session over a kind's definition collection and keeps
//! its three representations consistent:
//!
//! - **baseline**: the collection last fetched from the store
//! - **buffer**: the raw multi-document YAML text the user edits
//! - **preview**: the collection decoded from the most recent valid buffer
//!
//! ## State machine
//!
//! ```text
//!            load()
//!              ▼
//!           Clean ──edit()──▶ Editing ──quiet period──▶ decode
//!              ▲                 │                        │
//!              │               edit()                ok ──┴── err
//!           load()          (reschedules)             ▼        ▼
//!              │                                 Previewing  Errored
//!              └──────────────── save() ─────────────┘
//! ```
//!
//! Each `edit` cancels any decode scheduled by a previous `edit`, so at
//! most one decode wins per editing burst and the preview never reflects
//! an intermediate keystroke state. A failed decode keeps the previous
//! preview and the (bad) buffer so the user can keep typing.

use crate::{diff_definitions, Executor, ReconcileReport};
use ballast_codec::{decode_definitions, encode_definitions, CodecError};
use ballast_definitions::{DefinitionKind, DefinitionRecord};
use ballast_store::{DefinitionStore, StoreError};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Buffer matches the last fetched or saved collection.
    Clean,

    /// Buffer modified since the last decode; a decode is scheduled.
    Editing,

    /// Last decode succeeded; preview reflects the candidate collection.
    Previewing,

    /// Last decode failed; preview still shows the previous valid
    /// candidate and the buffer keeps the bad text.
    Errored,
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Minimum pause in editing before a scheduled decode runs.
    pub quiet_period: Duration,

    /// Per-operation timeout for store calls issued during save.
    pub request_timeout: Duration,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            quiet_period: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("decode failed: {0}")]
    Codec(#[from] CodecError),

    #[error("store call failed: {0}")]
    Store(#[from] StoreError),

    /// `save` is only valid once a decode has produced a preview.
    #[error("nothing to save: session is {0:?}")]
    NotPreviewing(SessionState),
}

struct SessionShared {
    state: SessionState,
    baseline: Vec<DefinitionRecord>,
    buffer: String,
    preview: Vec<DefinitionRecord>,
    last_failure: Option<CodecError>,
    /// Bumped on every edit/cancel; a scheduled decode only fires if its
    /// generation is still current.
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl SessionShared {
    /// Decode the current buffer. Preview and buffer survive a failure.
    fn decode_buffer(&mut self) {
        match decode_definitions(&self.buffer) {
            Ok(records) => {
                debug!(records = records.len(), "decoded edit buffer");
                self.preview = records;
                self.last_failure = None;
                self.state = SessionState::Previewing;
            }
            Err(error) => {
                warn!(%error, "edit buffer failed to decode");
                self.last_failure = Some(error);
                self.state = SessionState::Errored;
            }
        }
    }

    fn cancel_pending(&mut self) {
        self.generation += 1;
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }

    /// Run a scheduled-but-not-yet-fired decode immediately.
    fn flush_pending(&mut self) {
        if self.state == SessionState::Editing {
            self.cancel_pending();
            self.decode_buffer();
        }
    }
}

/// One editing session over the definitions of one kind.
///
/// The session takes an explicit store handle; independent sessions (and
/// tests) can use independent stores.
pub struct EditSession {
    shared: Arc<Mutex<SessionShared>>,
    store: Arc<dyn DefinitionStore>,
    kind: DefinitionKind,
    executor: Executor,
    options: SessionOptions,
}

impl EditSession {
    pub fn new(
        store: Arc<dyn DefinitionStore>,
        kind: DefinitionKind,
        options: SessionOptions,
    ) -> Self {
        let executor = Executor::new(store.clone(), kind, options.request_timeout);
        Self {
            shared: Arc::new(Mutex::new(SessionShared {
                state: SessionState::Clean,
                baseline: Vec::new(),
                buffer: String::new(),
                preview: Vec::new(),
                last_failure: None,
                generation: 0,
                pending: None,
            })),
            store,
            kind,
            executor,
            options,
        }
    }

    /// Fetch the current collection from the store and make it the new
    /// baseline: buffer is re-encoded from it, preview mirrors it, state
    /// becomes `Clean`. Cancels any pending decode.
    pub async fn load(&self) -> Result<(), SessionError> {
        let baseline = self.store.list(self.kind).await?;
        let buffer = encode_definitions(&baseline)?;
        info!(kind = %self.kind, records = baseline.len(), "loaded baseline");

        let mut shared = self.shared.lock().unwrap();
        shared.cancel_pending();
        shared.preview = baseline.clone();
        shared.baseline = baseline;
        shared.buffer = buffer;
        shared.last_failure = None;
        shared.state = SessionState::Clean;
        Ok(())
    }

    /// Replace the buffer and schedule a decode after the quiet period.
    ///
    /// A decode scheduled by a previous `edit` that has not fired yet is
    /// cancelled and superseded. Must be called within a tokio runtime.
    pub fn edit(&self, text: impl Into<String>) {
        let mut shared = self.shared.lock().unwrap();
        shared.buffer = text.into();
        shared.state = SessionState::Editing;
        shared.cancel_pending();
        let generation = shared.generation;

        let handle = Arc::clone(&self.shared);
        let quiet_period = self.options.quiet_period;
        shared.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;

            let mut shared = handle.lock().unwrap();
            if shared.generation != generation {
                // Superseded by a later edit or a reset.
                return;
            }
            shared.pending = None;
            shared.decode_buffer();
        }));
    }

    /// Discard the buffer and reload from the store.
    pub async fn reset(&self) -> Result<(), SessionError> {
        self.shared.lock().unwrap().cancel_pending();
        self.load().await
    }

    /// Reconcile the store with the previewed collection.
    ///
    /// If the buffer changed since the last successful decode, it is
    /// decoded synchronously first, so a save issued right after an edit
    /// never operates on stale preview data. After the batch completes the
    /// baseline is re-fetched, also when some operations failed, so the
    /// session reflects true remote state. The returned report lists every
    /// operation's outcome.
    pub async fn save(&self) -> Result<ReconcileReport, SessionError> {
        let (desired, current) = {
            let mut shared = self.shared.lock().unwrap();
            shared.flush_pending();
            match shared.state {
                SessionState::Previewing => {}
                SessionState::Errored => {
                    if let Some(failure) = shared.last_failure.clone() {
                        return Err(SessionError::Codec(failure));
                    }
                    return Err(SessionError::NotPreviewing(SessionState::Errored));
                }
                state => return Err(SessionError::NotPreviewing(state)),
            }
            (shared.preview.clone(), shared.baseline.clone())
        };

        let plan = diff_definitions(&desired, &current);
        info!(
            kind = %self.kind,
            upserts = plan.upserts.len(),
            deletes = plan.deletes.len(),
            "saving session"
        );
        let report = self.executor.apply(plan).await;

        self.load().await?;
        Ok(report)
    }

    pub fn state(&self) -> SessionState {
        self.shared.lock().unwrap().state
    }

    pub fn buffer(&self) -> String {
        self.shared.lock().unwrap().buffer.clone()
    }

    pub fn preview(&self) -> Vec<DefinitionRecord> {
        self.shared.lock().unwrap().preview.clone()
    }

    pub fn baseline(&self) -> Vec<DefinitionRecord> {
        self.shared.lock().unwrap().baseline.clone()
    }

    /// The failure recorded by the last decode, if the session is
    /// `Errored`. Carries the failing document index for display.
    pub fn last_failure(&self) -> Option<CodecError> {
        self.shared.lock().unwrap().last_failure.clone()
    }
}
