//! Deterministic risk metrics over normalized highlights.
//!
//! Everything here is pure and total: empty or degenerate input produces a
//! valid zero-valued result, and a fixed input always produces the same
//! output. Every scoring weight is a named constant so the formula can be
//! audited and unit-tested term by term.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{HighlightCategory, RiskLevel};
use crate::records::Highlight;

// ---------------------------------------------------------------------------
// Risk classification thresholds
// ---------------------------------------------------------------------------

/// Highlight count strictly above this escalates to `high`.
pub const HIGH_COUNT_THRESHOLD: usize = 10;

/// Severity average strictly above this escalates to `high`.
pub const HIGH_SEVERITY_THRESHOLD: f64 = 2.5;

/// Highlight count strictly above this escalates to `medium`.
pub const MEDIUM_COUNT_THRESHOLD: usize = 5;

/// Severity average strictly above this escalates to `medium`.
pub const MEDIUM_SEVERITY_THRESHOLD: f64 = 1.5;

// ---------------------------------------------------------------------------
// Adequacy weights
// ---------------------------------------------------------------------------

/// Neutral starting point of the adequacy score.
pub const ADEQUACY_BASELINE: i64 = 50;

/// Added per observed collaboration signal.
pub const COLLABORATION_WEIGHT: i64 = 7;

/// Added per observed trust indicator.
pub const TRUST_INDICATOR_WEIGHT: i64 = 5;

/// Added per observed mutual-gains signal.
pub const MUTUAL_GAINS_WEIGHT: i64 = 6;

/// Subtracted per detected manipulation.
pub const MANIPULATION_PENALTY: i64 = 8;

/// Subtracted per trust violation.
pub const TRUST_VIOLATION_PENALTY: i64 = 12;

/// Subtracted per ultimatum.
pub const ULTIMATUM_PENALTY: i64 = 10;

// ---------------------------------------------------------------------------
// HighlightMetrics
// ---------------------------------------------------------------------------

/// Aggregate metrics for one analysis, attached alongside the highlights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighlightMetrics {
    pub manipulation_count: u32,
    pub bias_count: u32,
    pub fallacy_count: u32,
    /// Mean severity rounded to 2 decimal places; `0.0` for no highlights.
    pub severity_average: f64,
    pub risk_level: RiskLevel,
}

impl HighlightMetrics {
    /// Zero-valued metrics for an empty or unusable analysis.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            manipulation_count: 0,
            bias_count: 0,
            fallacy_count: 0,
            severity_average: 0.0,
            risk_level: RiskLevel::Low,
        }
    }
}

/// Compute category counts, severity average, and risk level.
#[must_use]
pub fn calculate_metrics(highlights: &[Highlight]) -> HighlightMetrics {
    let mut manipulation_count: u32 = 0;
    let mut bias_count: u32 = 0;
    let mut fallacy_count: u32 = 0;
    let mut severity_sum: u64 = 0;

    for highlight in highlights {
        match highlight.category {
            HighlightCategory::Manipulation => manipulation_count += 1,
            HighlightCategory::CognitiveBias => bias_count += 1,
            HighlightCategory::RhetologicalFallacy => fallacy_count += 1,
        }
        severity_sum += u64::from(highlight.severity);
    }

    let severity_average = if highlights.is_empty() {
        0.0
    } else {
        round2(severity_sum as f64 / highlights.len() as f64)
    };

    HighlightMetrics {
        manipulation_count,
        bias_count,
        fallacy_count,
        severity_average,
        risk_level: classify_risk(highlights.len(), severity_average),
    }
}

/// OR-combined two-signal classification: either the count or the severity
/// average alone can escalate the level, and nothing de-escalates it.
///
/// The two thresholds are deliberately not on comparable scales — a single
/// severity-5 highlight cannot reach `high` on its own. This matches the
/// shipped dashboard behavior and must not be "fixed" unilaterally.
#[must_use]
pub fn classify_risk(count: usize, severity_average: f64) -> RiskLevel {
    if count > HIGH_COUNT_THRESHOLD || severity_average > HIGH_SEVERITY_THRESHOLD {
        RiskLevel::High
    } else if count > MEDIUM_COUNT_THRESHOLD || severity_average > MEDIUM_SEVERITY_THRESHOLD {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

// ---------------------------------------------------------------------------
// Adequacy / success probability
// ---------------------------------------------------------------------------

/// Signal counts feeding the adequacy score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdequacySignals {
    pub collaboration: u32,
    pub trust_indicators: u32,
    pub mutual_gains: u32,
    pub manipulations: u32,
    pub trust_violations: u32,
    pub ultimatums: u32,
}

/// Weighted additive adequacy score on the 0–100 scale.
///
/// Starts from [`ADEQUACY_BASELINE`], applies each named weight per
/// counted signal, and clamps to the valid range.
#[must_use]
pub fn adequacy_score(signals: &AdequacySignals) -> u8 {
    let score = ADEQUACY_BASELINE
        + i64::from(signals.collaboration) * COLLABORATION_WEIGHT
        + i64::from(signals.trust_indicators) * TRUST_INDICATOR_WEIGHT
        + i64::from(signals.mutual_gains) * MUTUAL_GAINS_WEIGHT
        - i64::from(signals.manipulations) * MANIPULATION_PENALTY
        - i64::from(signals.trust_violations) * TRUST_VIOLATION_PENALTY
        - i64::from(signals.ultimatums) * ULTIMATUM_PENALTY;
    score.clamp(0, 100) as u8
}

// ---------------------------------------------------------------------------
// Emotional volatility
// ---------------------------------------------------------------------------

/// Coefficient of variation over per-category emotion counts.
///
/// Population standard deviation divided by the mean, with the denominator
/// floored at 1 to guard the all-zero case. Empty input yields `0.0`.
#[must_use]
pub fn emotional_volatility(counts: &[u32]) -> f64 {
    if counts.is_empty() {
        return 0.0;
    }
    let n = counts.len() as f64;
    let mean = counts.iter().map(|&c| f64::from(c)).sum::<f64>() / n;
    let variance = counts
        .iter()
        .map(|&c| {
            let d = f64::from(c) - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt() / mean.max(1.0)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
