use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Scalar risk assessment for one analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Barometer {
    /// Overall risk score, 0–100.
    pub score: u8,
    pub label: String,
    pub rationale: String,
    /// Named contributing factors, max 12 entries, finite values only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub factors: Option<BTreeMap<String, f64>>,
    pub recommended_modus_operandi: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adequacy: Option<Adequacy>,
}

/// Nested adequacy sub-assessment of a [`Barometer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Adequacy {
    /// Adequacy score, 0–100.
    pub score: u8,
    pub label: String,
    pub comment: String,
}
