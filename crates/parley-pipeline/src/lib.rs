//! # parley-pipeline
//!
//! Orchestration layer between raw LLM output and normalized analysis
//! results.
//!
//! Data flows one way: raw response text → JSON extraction → schema
//! normalizers → risk metrics → [`AnalysisReport`]. The pipeline is total:
//! malformed, truncated, or adversarial input degrades to the safe
//! fallback report instead of propagating an error.
//!
//! Token budget enforcement is deliberately not wired in here — route
//! handlers call `parley_db::ParleyDb::add_tokens_and_check` on both sides
//! of the LLM call, using [`tokens::estimate_tokens`] for the prompt side.

pub mod pipeline;
pub mod response;
pub mod tokens;

pub use pipeline::{AnalysisReport, analyze_response, analyze_value};
pub use response::{extract_json, message_content};
pub use tokens::estimate_tokens;
