use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Ordered negotiation phases with per-phase pressure points, owners, and
/// task/issue/suggestion lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationMap {
    pub phases: Vec<NegotiationPhase>,
}

/// One phase of the negotiation, in transcript order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct NegotiationPhase {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owners: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}
