//! PersonaFocus normalization.

use serde_json::Value;

use crate::coerce::{clamp_i64, coerce_i64, coerce_str, non_empty, unique_strings};
use crate::records::{Persona, PersonaFocus};

/// Maximum people in one focus record.
const MAX_PEOPLE: usize = 8;

/// Maximum characters in a persona name.
const MAX_NAME_LEN: usize = 80;

/// Maximum entries in each of `biases`, `tactics`, and `triggers`.
const MAX_PERSONA_TAGS: usize = 6;

/// Maximum characters per tag entry.
const MAX_TAG_LEN: usize = 80;

/// Normalize a raw persona focus.
///
/// A focus with zero valid people is absent (`None`), not an
/// empty-but-valid object — `{"people": []}` normalizes to `None`.
#[must_use]
pub fn normalize_persona_focus(raw: &Value) -> Option<PersonaFocus> {
    let obj = raw.as_object()?;
    let people: Vec<Persona> = obj
        .get("people")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(normalize_persona)
                .take(MAX_PEOPLE)
                .collect()
        })
        .unwrap_or_default();

    if people.is_empty() {
        None
    } else {
        Some(PersonaFocus { people })
    }
}

/// One persona entry. A usable name is required; everything else degrades.
fn normalize_persona(raw: &Value) -> Option<Persona> {
    let obj = raw.as_object()?;
    let name = coerce_str(obj.get("name"), MAX_NAME_LEN)?;

    Some(Persona {
        name,
        risk_score: clamp_i64(coerce_i64(obj.get("riskScore")).unwrap_or(0), 0, 100) as u8,
        biases: non_empty(unique_strings(
            obj.get("biases"),
            MAX_PERSONA_TAGS,
            MAX_TAG_LEN,
        )),
        tactics: non_empty(unique_strings(
            obj.get("tactics"),
            MAX_PERSONA_TAGS,
            MAX_TAG_LEN,
        )),
        triggers: non_empty(unique_strings(
            obj.get("triggers"),
            MAX_PERSONA_TAGS,
            MAX_TAG_LEN,
        )),
    })
}
