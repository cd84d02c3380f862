use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{Confidence, HighlightCategory};

/// One detected pattern anchored to a span of the transcript.
///
/// A `Highlight` is either fully well-formed per the field bounds below or
/// was never constructed — there is no partially-valid state. `labels`
/// always contains `label`; `char_end >= char_start` holds by
/// construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub category: HighlightCategory,
    pub paragraph_index: u32,
    pub char_start: u32,
    pub char_end: u32,
    /// Severity on the 1–5 scale.
    pub severity: u8,
    /// Display label, at most 160 characters, never empty.
    pub label: String,
    /// Deduplicated labels (first occurrence order, max 6), includes `label`.
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counter_strategy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
}
