use crate::{DefinitionKind, ScalingComponentDefinition, ScalingPlanDefinition};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::collections::HashMap;

/// Open string-keyed map of loosely typed values attached to a definition
/// for descriptive purposes. Unknown keys are preserved as-is.
pub type Metadata = HashMap<String, Value>;

/// One user-authored unit of configuration, discriminated by its `kind`
/// field in the serialized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DefinitionRecord {
    ScalingComponent(ScalingComponentDefinition),
    ScalingPlan(ScalingPlanDefinition),
}

impl DefinitionRecord {
    pub fn kind(&self) -> DefinitionKind {
        match self {
            DefinitionRecord::ScalingComponent(_) => DefinitionKind::ScalingComponent,
            DefinitionRecord::ScalingPlan(_) => DefinitionKind::ScalingPlan,
        }
    }

    /// Authoring-time identity. This is the key records are diffed by.
    pub fn id(&self) -> &str {
        match self {
            DefinitionRecord::ScalingComponent(component) => &component.id,
            DefinitionRecord::ScalingPlan(plan) => &plan.id,
        }
    }

    /// Store-assigned key; `None` until the record has been persisted.
    pub fn db_id(&self) -> Option<&str> {
        match self {
            DefinitionRecord::ScalingComponent(component) => component.db_id.as_deref(),
            DefinitionRecord::ScalingPlan(plan) => plan.db_id.as_deref(),
        }
    }

    pub fn set_db_id(&mut self, db_id: Option<String>) {
        match self {
            DefinitionRecord::ScalingComponent(component) => component.db_id = db_id,
            DefinitionRecord::ScalingPlan(plan) => plan.db_id = db_id,
        }
    }

    pub fn metadata(&self) -> &Metadata {
        match self {
            DefinitionRecord::ScalingComponent(component) => &component.metadata,
            DefinitionRecord::ScalingPlan(plan) => &plan.metadata,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            DefinitionRecord::ScalingComponent(component) => component.enabled,
            DefinitionRecord::ScalingPlan(plan) => plan.enabled,
        }
    }

    /// Remove ephemeral view state the visual editor attaches to plan steps.
    ///
    /// Scaling components carry no view state; for plans this clears the
    /// `ui` extension on every step. Serialized output must never contain
    /// view state, so the codec calls this before every encode.
    pub fn strip_view_state(&mut self) {
        if let DefinitionRecord::ScalingPlan(plan) = self {
            for item in &mut plan.plans {
                item.ui = None;
            }
        }
    }

    /// Copy of this record with view state removed.
    pub fn without_view_state(&self) -> Self {
        let mut record = self.clone();
        record.strip_view_state();
        record
    }
}
