//! Highlight normalization.

use serde_json::Value;

use crate::coerce::{clamp_i64, coerce_i64, coerce_index, coerce_str, non_empty, unique_strings};
use crate::enums::{Confidence, HighlightCategory};
use crate::records::Highlight;

/// Neutral display label used when the model supplied none.
pub const DEFAULT_LABEL: &str = "Маніпуляція";

/// Maximum characters in the display label.
pub const MAX_LABEL_LEN: usize = 160;

/// Maximum entries in the `labels` list.
pub const MAX_LABELS: usize = 6;

/// Maximum entries in each of `actors`, `bias_tags`, and `tactics`.
pub const MAX_TAGS: usize = 6;

/// Maximum characters per tag entry.
const MAX_TAG_LEN: usize = 80;

/// Maximum characters in `counter_strategy`.
const MAX_COUNTER_STRATEGY_LEN: usize = 240;

/// Maximum highlights accepted from a single response.
pub const MAX_HIGHLIGHTS: usize = 100;

/// Normalize one raw highlight, or `None` if the value is not an object.
#[must_use]
pub fn normalize_highlight(raw: &Value) -> Option<Highlight> {
    let obj = raw.as_object()?;

    let category = HighlightCategory::parse_or_default(
        coerce_str(obj.get("category"), MAX_TAG_LEN).as_deref(),
    );

    let paragraph_index = coerce_index(obj.get("paragraphIndex"), 0);
    let char_start = coerce_index(obj.get("charStart"), 0);
    // char_end >= char_start enforced by clamping, not rejection.
    let char_end = coerce_index(obj.get("charEnd"), 0).max(char_start);

    let severity = clamp_i64(coerce_i64(obj.get("severity")).unwrap_or(1), 1, 5) as u8;

    let mut labels = unique_strings(obj.get("labels"), MAX_LABELS, MAX_LABEL_LEN);
    let label = coerce_str(obj.get("label"), MAX_LABEL_LEN)
        .or_else(|| labels.first().cloned())
        .unwrap_or_else(|| DEFAULT_LABEL.to_string());
    if !labels.contains(&label) {
        labels.insert(0, label.clone());
        labels.truncate(MAX_LABELS);
    }

    Some(Highlight {
        category,
        paragraph_index,
        char_start,
        char_end,
        severity,
        label,
        labels,
        actors: non_empty(unique_strings(obj.get("actors"), MAX_TAGS, MAX_TAG_LEN)),
        bias_tags: non_empty(unique_strings(obj.get("biasTags"), MAX_TAGS, MAX_TAG_LEN)),
        tactics: non_empty(unique_strings(obj.get("tactics"), MAX_TAGS, MAX_TAG_LEN)),
        counter_strategy: coerce_str(obj.get("counterStrategy"), MAX_COUNTER_STRATEGY_LEN),
        confidence: Confidence::parse(coerce_str(obj.get("confidence"), MAX_TAG_LEN).as_deref()),
    })
}

/// Normalize a raw highlight list.
///
/// Non-arrays yield an empty list; entries that are not minimally usable
/// are dropped; the result is capped at [`MAX_HIGHLIGHTS`].
#[must_use]
pub fn normalize_highlights(raw: &Value) -> Vec<Highlight> {
    let Value::Array(items) = raw else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(normalize_highlight)
        .take(MAX_HIGHLIGHTS)
        .collect()
}
