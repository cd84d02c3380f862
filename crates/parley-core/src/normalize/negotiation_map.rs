//! NegotiationMap normalization.

use serde_json::Value;

use crate::coerce::{coerce_str, non_empty, unique_strings};
use crate::records::{NegotiationMap, NegotiationPhase};

/// Maximum phases in one map.
const MAX_PHASES: usize = 8;

/// Maximum characters in a phase name.
const MAX_NAME_LEN: usize = 80;

/// Maximum entries per per-phase list.
const MAX_PHASE_ITEMS: usize = 6;

/// Maximum characters per list entry.
const MAX_ITEM_LEN: usize = 160;

/// Normalize a raw negotiation map.
///
/// Phase order from the input is preserved; zero valid phases means the
/// record is absent.
#[must_use]
pub fn normalize_negotiation_map(raw: &Value) -> Option<NegotiationMap> {
    let obj = raw.as_object()?;
    let phases: Vec<NegotiationPhase> = obj
        .get("phases")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(normalize_phase)
                .take(MAX_PHASES)
                .collect()
        })
        .unwrap_or_default();

    if phases.is_empty() {
        None
    } else {
        Some(NegotiationMap { phases })
    }
}

/// One phase entry. A usable name is required; the six per-phase lists are
/// each capped and omitted when empty.
fn normalize_phase(raw: &Value) -> Option<NegotiationPhase> {
    let obj = raw.as_object()?;
    let name = coerce_str(obj.get("name"), MAX_NAME_LEN)?;

    let list = |key: &str| non_empty(unique_strings(obj.get(key), MAX_PHASE_ITEMS, MAX_ITEM_LEN));

    Some(NegotiationPhase {
        name,
        pressure_points: list("pressurePoints"),
        opportunities: list("opportunities"),
        owners: list("owners"),
        tasks: list("tasks"),
        issues: list("issues"),
        suggestions: list("suggestions"),
    })
}
