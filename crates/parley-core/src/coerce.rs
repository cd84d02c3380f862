//! Total coercion primitives over untyped JSON values.
//!
//! Every function in this module is defined for all inputs and never
//! panics. The normalizers are only safe because these primitives are
//! total: a wrong-typed field degrades to an absent field, never to an
//! error.
//!
//! Type policy: strings pass through, numbers and booleans are
//! stringified, and anything else (null, object, array) is treated as
//! absent rather than stringified.

use serde_json::Value;

/// Truncate a string to at most `max` characters (not bytes).
///
/// Character-based so multi-byte text (the UI is Ukrainian-first) is never
/// split mid-codepoint.
#[must_use]
pub fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Clamp an integer into `[min, max]`.
#[must_use]
pub const fn clamp_i64(value: i64, min: i64, max: i64) -> i64 {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// Clamp a float into `[min, max]`. NaN collapses to `min`.
#[must_use]
pub fn clamp_f64(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() { min } else { value.clamp(min, max) }
}

/// Read a string out of an optional JSON value.
///
/// Strings are trimmed and truncated to `max_len` characters. Numbers and
/// booleans are stringified. Null, objects, and arrays yield `None`, as
/// does a string that is empty after trimming.
#[must_use]
pub fn coerce_str(value: Option<&Value>, max_len: usize) -> Option<String> {
    let raw = match value? {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Object(_) | Value::Array(_) => return None,
    };
    if raw.is_empty() {
        return None;
    }
    Some(truncate_chars(&raw, max_len))
}

/// Like [`coerce_str`], but substitutes `fallback` when the value is
/// absent or unusable.
#[must_use]
pub fn coerce_str_or(value: Option<&Value>, max_len: usize, fallback: &str) -> String {
    coerce_str(value, max_len).unwrap_or_else(|| truncate_chars(fallback, max_len))
}

/// Read an integer out of an optional JSON value.
///
/// Accepts JSON numbers (floats are truncated toward zero) and numeric
/// strings (`"3"`). Everything else yields `None`.
#[must_use]
pub fn coerce_i64(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| if f.is_nan() { 0 } else { f as i64 })),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f as i64)
            })
        }
        _ => None,
    }
}

/// Read a finite float out of an optional JSON value.
///
/// Accepts JSON numbers and numeric strings; non-finite results are
/// treated as absent.
#[must_use]
pub fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let f = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    f.is_finite().then_some(f)
}

/// Read a non-negative integer, clamped into `u32` range, with a default.
#[must_use]
pub fn coerce_index(value: Option<&Value>, default: u32) -> u32 {
    coerce_i64(value).map_or(default, |n| clamp_i64(n, 0, i64::from(u32::MAX)) as u32)
}

/// Read a capped, deduplicated list of strings.
///
/// Non-arrays yield `[]`. Each element goes through [`coerce_str`] with
/// `max_item_len`; empties and wrong-typed elements are dropped,
/// duplicates are removed preserving first occurrence, and the result is
/// capped at `limit` entries.
#[must_use]
pub fn unique_strings(value: Option<&Value>, limit: usize, max_item_len: usize) -> Vec<String> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if out.len() >= limit {
            break;
        }
        if let Some(s) = coerce_str(Some(item), max_item_len)
            && !out.contains(&s)
        {
            out.push(s);
        }
    }
    out
}

/// Wrap a list in `Some` only when it has content.
///
/// Normalized records omit empty collections entirely so that a present
/// key always means "the model asserted this".
#[must_use]
pub fn non_empty(list: Vec<String>) -> Option<Vec<String>> {
    if list.is_empty() { None } else { Some(list) }
}
