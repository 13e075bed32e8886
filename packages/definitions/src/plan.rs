use crate::record::Metadata;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// A scaling plan: an ordered set of steps, each pairing a trigger (metric
/// expression or cron schedule) with the component commands to fire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingPlanDefinition {
    /// User-chosen identifier, unique within the kind.
    pub id: String,

    /// Store-assigned identifier; present once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<String>,

    /// Open descriptive key/value data. Display only, never a diff key.
    #[serde(default)]
    pub metadata: Metadata,

    /// Plan steps, in priority order.
    #[serde(default)]
    pub plans: Vec<PlanItem>,

    #[serde(default)]
    pub enabled: bool,
}

/// One step of a scaling plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Boolean expression over collected metrics that triggers this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Cron schedule that triggers this step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_expression: Option<String>,

    /// Higher priority wins when several steps trigger in the same tick.
    #[serde(default)]
    pub priority: u32,

    /// Component commands fired when this step triggers.
    #[serde(default)]
    pub scaling_components: Vec<Value>,

    /// Diagram-only view state. Never persisted; stripped before encode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ui: Option<PlanItemUi>,
}

/// Ephemeral editor state for one plan node in the diagram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanItemUi {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub selected: bool,
}
