use crate::record::Metadata;
use serde::{Deserialize, Serialize};

/// A scaling component: one scalable target (an autoscaling group, a
/// deployment, a serverless function) and the adapter that drives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScalingComponentDefinition {
    /// User-chosen identifier, unique within the kind.
    pub id: String,

    /// Store-assigned identifier; present once persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_id: Option<String>,

    /// Adapter family this component drives (e.g. "aws-ec2-autoscaling").
    pub component_kind: String,

    /// Open descriptive key/value data. Display only, never a diff key.
    #[serde(default)]
    pub metadata: Metadata,

    #[serde(default)]
    pub enabled: bool,
}
