use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::ImpactLevel;

/// Grouped view of repeated bias occurrences across the transcript.
///
/// Like `PersonaFocus`, an empty cluster list is represented as an absent
/// record, never as an empty report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiasClusterReport {
    pub clusters: Vec<BiasCluster>,
}

/// One group of repeated occurrences of a single bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BiasCluster {
    pub bias: String,
    /// At least 1 — a cluster with no occurrences is not a cluster.
    pub occurrences: u32,
    /// Representative quotes, max 3, each truncated.
    pub quotes: Vec<String>,
    pub impact: ImpactLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countermeasures: Option<Vec<String>>,
}
