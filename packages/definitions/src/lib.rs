//! # Ballast Definitions
//!
//! Data model for declarative scaling resources.
//!
//! A [`DefinitionRecord`] is one user-authored unit of configuration: a
//! scaling component (what to scale) or a scaling plan (when and how to
//! scale it). Records carry two identifiers:
//!
//! - `id`: human-chosen, the authoring-time identity users edit by
//! - `db_id`: store-assigned, present only once a record has been persisted
//!
//! Plan payloads may carry diagram-only view state ([`PlanItemUi`]) that the
//! visual editor attaches to steps. That state is additive and ephemeral:
//! [`DefinitionRecord::strip_view_state`] removes it, and the codec does so
//! before every encode.

mod component;
mod kind;
mod plan;
mod record;

pub use component::ScalingComponentDefinition;
pub use kind::DefinitionKind;
pub use plan::{PlanItem, PlanItemUi, ScalingPlanDefinition};
pub use record::{DefinitionRecord, Metadata};
