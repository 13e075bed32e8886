use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discriminator for a definition's schema family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefinitionKind {
    ScalingComponent,
    ScalingPlan,
}

impl DefinitionKind {
    /// Resource path segment used by the remote store's REST API.
    pub fn resource(&self) -> &'static str {
        match self {
            DefinitionKind::ScalingComponent => "scaling-components",
            DefinitionKind::ScalingPlan => "plans",
        }
    }
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionKind::ScalingComponent => write!(f, "ScalingComponent"),
            DefinitionKind::ScalingPlan => write!(f, "ScalingPlan"),
        }
    }
}

impl FromStr for DefinitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "scalingcomponent" | "scaling-component" | "scaling-components" | "component"
            | "components" => Ok(DefinitionKind::ScalingComponent),
            "scalingplan" | "scaling-plan" | "scaling-plans" | "plan" | "plans" => {
                Ok(DefinitionKind::ScalingPlan)
            }
            other => Err(format!(
                "unknown definition kind: {} (expected \"plans\" or \"scaling-components\")",
                other
            )),
        }
    }
}
