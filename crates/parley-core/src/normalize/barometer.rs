//! Barometer normalization.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::coerce::{clamp_i64, coerce_f64, coerce_i64, coerce_str_or, truncate_chars};
use crate::records::{Adequacy, Barometer};

/// Maximum characters in the barometer label.
const MAX_LABEL_LEN: usize = 80;

/// Maximum characters in the rationale.
const MAX_RATIONALE_LEN: usize = 600;

/// Maximum named factors.
const MAX_FACTORS: usize = 12;

/// Maximum characters per factor name.
const MAX_FACTOR_KEY_LEN: usize = 60;

/// Maximum characters in the recommended modus operandi.
const MAX_MODUS_LEN: usize = 300;

/// Maximum characters in the adequacy comment.
const MAX_COMMENT_LEN: usize = 400;

/// Normalize one raw barometer, or `None` if the value is not an object.
#[must_use]
pub fn normalize_barometer(raw: &Value) -> Option<Barometer> {
    let obj = raw.as_object()?;

    Some(Barometer {
        score: score_0_100(obj.get("score")),
        label: coerce_str_or(obj.get("label"), MAX_LABEL_LEN, ""),
        rationale: coerce_str_or(obj.get("rationale"), MAX_RATIONALE_LEN, ""),
        factors: normalize_factors(obj.get("factors")),
        recommended_modus_operandi: coerce_str_or(
            obj.get("recommendedModusOperandi"),
            MAX_MODUS_LEN,
            "",
        ),
        adequacy: obj.get("adequacy").and_then(normalize_adequacy),
    })
}

/// Nested adequacy sub-record; applies the same object-or-nothing rule.
fn normalize_adequacy(raw: &Value) -> Option<Adequacy> {
    let obj = raw.as_object()?;
    Some(Adequacy {
        score: score_0_100(obj.get("score")),
        label: coerce_str_or(obj.get("label"), MAX_LABEL_LEN, ""),
        comment: coerce_str_or(obj.get("comment"), MAX_COMMENT_LEN, ""),
    })
}

fn score_0_100(raw: Option<&Value>) -> u8 {
    clamp_i64(coerce_i64(raw).unwrap_or(0), 0, 100) as u8
}

/// Open factor map: finite numeric values only, bounded key length and
/// entry count.
fn normalize_factors(raw: Option<&Value>) -> Option<BTreeMap<String, f64>> {
    let map = raw?.as_object()?;
    let mut out = BTreeMap::new();
    for (key, value) in map {
        let key = truncate_chars(key.trim(), MAX_FACTOR_KEY_LEN);
        if key.is_empty() {
            continue;
        }
        if let Some(v) = coerce_f64(Some(value)) {
            out.insert(key, v);
        }
    }
    if out.len() > MAX_FACTORS {
        out = out.into_iter().take(MAX_FACTORS).collect();
    }
    if out.is_empty() { None } else { Some(out) }
}
