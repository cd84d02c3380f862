//! # parley-core
//!
//! Core normalization and scoring logic for Parley.
//!
//! This crate is the trust boundary between raw LLM output and the rest of
//! the system. It provides:
//! - Total coercion primitives over `serde_json::Value`
//! - Closed enums with allowlist parsing
//! - Bounded, storage-safe record types for all analysis shapes
//! - One normalizer per record shape (`&Value -> Option<Record>`)
//! - Deterministic risk metrics derived from normalized highlights
//!
//! Everything here is pure and synchronous: no I/O, no clocks, no shared
//! state. Normalizers never panic; unusable input yields `None`.

pub mod coerce;
pub mod enums;
pub mod metrics;
pub mod normalize;
pub mod records;
