//! Summary normalization.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::coerce::{coerce_i64, coerce_index, coerce_str_or, truncate_chars, unique_strings};
use crate::records::Summary;

/// Maximum entries in `top_patterns`.
const MAX_TOP_PATTERNS: usize = 10;

/// Maximum characters per top-pattern entry.
const MAX_PATTERN_LEN: usize = 120;

/// Maximum characters in each free-text field.
const MAX_TEXT_LEN: usize = 600;

/// Maximum entries in the heat map.
const MAX_HEAT_ENTRIES: usize = 12;

/// Maximum characters per heat-map key.
const MAX_HEAT_KEY_LEN: usize = 40;

/// Normalize one raw summary, or `None` if the value is not an object.
#[must_use]
pub fn normalize_summary(raw: &Value) -> Option<Summary> {
    let obj = raw.as_object()?;

    Some(Summary {
        manipulation_count: coerce_index(obj.get("manipulationCount"), 0),
        bias_count: coerce_index(obj.get("biasCount"), 0),
        fallacy_count: coerce_index(obj.get("fallacyCount"), 0),
        top_patterns: unique_strings(obj.get("topPatterns"), MAX_TOP_PATTERNS, MAX_PATTERN_LEN),
        strategic_assessment: coerce_str_or(obj.get("strategicAssessment"), MAX_TEXT_LEN, ""),
        power_dynamics: coerce_str_or(obj.get("powerDynamics"), MAX_TEXT_LEN, ""),
        emotional_undertone: coerce_str_or(obj.get("emotionalUndertone"), MAX_TEXT_LEN, ""),
        recommended_approach: coerce_str_or(obj.get("recommendedApproach"), MAX_TEXT_LEN, ""),
        heat_map: normalize_heat_map(obj.get("heatMap")),
    })
}

/// Open category → count map, bounded in entry count, key length, and
/// value range. Non-numeric values drop their entry.
fn normalize_heat_map(raw: Option<&Value>) -> Option<BTreeMap<String, u32>> {
    let map = raw?.as_object()?;
    let mut out = BTreeMap::new();
    for (key, value) in map {
        let key = truncate_chars(key.trim(), MAX_HEAT_KEY_LEN);
        if key.is_empty() {
            continue;
        }
        if let Some(count) = coerce_i64(Some(value)) {
            out.insert(key, count.clamp(0, i64::from(u32::MAX)) as u32);
        }
    }
    if out.len() > MAX_HEAT_ENTRIES {
        out = out.into_iter().take(MAX_HEAT_ENTRIES).collect();
    }
    if out.is_empty() { None } else { Some(out) }
}
