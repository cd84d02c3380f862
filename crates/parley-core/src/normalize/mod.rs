//! Schema normalizers: one total entry function per record shape.
//!
//! Uniform contract, applied to every shape:
//! 1. A raw value that is not a JSON object yields `None` — fail closed.
//! 2. Required scalars are coerced and bounded with the primitives in
//!    [`crate::coerce`]; optional collections are omitted when empty.
//! 3. Nested sub-records are normalized recursively; a sub-record with no
//!    meaningful content leaves the parent field absent.
//! 4. A malformed sub-field degrades to its default or to absence — it
//!    never discards an otherwise-usable record, and nothing here panics.
//!
//! Normalization is a fixed point: running a normalizer over the JSON
//! serialization of its own output reproduces the record exactly.

mod barometer;
mod bias_cluster;
mod highlight;
mod negotiation_map;
mod persona;
mod summary;

pub use barometer::normalize_barometer;
pub use bias_cluster::normalize_bias_clusters;
pub use highlight::{DEFAULT_LABEL, MAX_HIGHLIGHTS, MAX_LABELS, normalize_highlight, normalize_highlights};
pub use negotiation_map::normalize_negotiation_map;
pub use persona::normalize_persona_focus;
pub use summary::normalize_summary;
