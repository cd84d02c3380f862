use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Aggregate narrative for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub manipulation_count: u32,
    pub bias_count: u32,
    pub fallacy_count: u32,
    /// Most frequent patterns, max 10 entries.
    pub top_patterns: Vec<String>,
    pub strategic_assessment: String,
    pub power_dynamics: String,
    pub emotional_undertone: String,
    pub recommended_approach: String,
    /// Category name → occurrence count, max 12 entries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heat_map: Option<BTreeMap<String, u32>>,
}
