//! Analysis orchestration with safe fallback.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use parley_core::metrics::{HighlightMetrics, calculate_metrics};
use parley_core::normalize::{
    normalize_barometer, normalize_bias_clusters, normalize_highlights, normalize_negotiation_map,
    normalize_persona_focus, normalize_summary,
};
use parley_core::records::{
    Barometer, BiasClusterReport, Highlight, NegotiationMap, PersonaFocus, Summary,
};

use crate::response::extract_json;

/// Normalized result of one analysis run.
///
/// Optional sections are present only when the model asserted usable
/// content for them; `metrics` is always computed from the (possibly
/// empty) highlight list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub highlights: Vec<Highlight>,
    pub metrics: HighlightMetrics,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barometer: Option<Barometer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persona_focus: Option<PersonaFocus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias_clusters: Option<BiasClusterReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negotiation_map: Option<NegotiationMap>,
    /// True when the response was unusable and this is the fallback result.
    pub degraded: bool,
}

impl AnalysisReport {
    /// Safe fallback: no findings, zeroed metrics, all sections absent.
    #[must_use]
    pub const fn fallback() -> Self {
        Self {
            highlights: Vec::new(),
            metrics: HighlightMetrics::empty(),
            summary: None,
            barometer: None,
            persona_focus: None,
            bias_clusters: None,
            negotiation_map: None,
            degraded: true,
        }
    }
}

/// Run the full pipeline over raw LLM response text.
///
/// Total: unparseable content yields [`AnalysisReport::fallback`], never an
/// error.
#[must_use]
pub fn analyze_response(content: &str) -> AnalysisReport {
    extract_json(content).map_or_else(
        || {
            warn!(
                content_len = content.len(),
                "no JSON object in LLM response, substituting fallback report"
            );
            AnalysisReport::fallback()
        },
        |value| analyze_value(&value),
    )
}

/// Run normalization and scoring over an already-parsed response value.
#[must_use]
pub fn analyze_value(raw: &Value) -> AnalysisReport {
    let Some(obj) = raw.as_object() else {
        warn!("LLM response is not a JSON object, substituting fallback report");
        return AnalysisReport::fallback();
    };

    let highlights = obj
        .get("highlights")
        .map(normalize_highlights)
        .unwrap_or_default();
    let metrics = calculate_metrics(&highlights);

    AnalysisReport {
        metrics,
        highlights,
        summary: obj.get("summary").and_then(normalize_summary),
        barometer: obj.get("barometer").and_then(normalize_barometer),
        persona_focus: obj.get("personaFocus").and_then(normalize_persona_focus),
        bias_clusters: obj.get("biasClusters").and_then(normalize_bias_clusters),
        negotiation_map: obj
            .get("negotiationMap")
            .and_then(normalize_negotiation_map),
        degraded: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_core::enums::RiskLevel;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn full_payload() -> Value {
        json!({
            "highlights": [
                {"category": "manipulation", "severity": 4, "label": "Ультиматум",
                 "paragraphIndex": 2, "charStart": 120, "charEnd": 180},
                {"category": "cognitive_bias", "severity": "3", "label": "Якоріння"},
                {"category": "bogus", "severity": 9},
            ],
            "summary": {
                "manipulationCount": 2, "biasCount": 1, "fallacyCount": 0,
                "topPatterns": ["тиск"],
                "strategicAssessment": "Жорсткий стиль із завищеним якорем.",
            },
            "barometer": {
                "score": 68, "label": "підвищений",
                "rationale": "Ультиматум у фіналі розмови.",
                "adequacy": {"score": 45, "label": "нижче середнього", "comment": ""},
            },
            "personaFocus": {"people": [{"name": "Іван", "riskScore": 70}]},
            "biasClusters": {"clusters": [{"bias": "якоріння", "occurrences": 2}]},
            "negotiationMap": {"phases": [{"name": "Торг", "pressurePoints": ["ціна"]}]},
        })
    }

    #[test]
    fn full_payload_produces_all_sections() {
        let report = analyze_value(&full_payload());
        assert!(!report.degraded);
        assert_eq!(report.highlights.len(), 3);
        assert_eq!(report.metrics.manipulation_count, 2); // "bogus" falls back
        assert_eq!(report.metrics.bias_count, 1);
        assert!(report.summary.is_some());
        assert_eq!(report.barometer.as_ref().unwrap().score, 68);
        assert_eq!(report.persona_focus.as_ref().unwrap().people.len(), 1);
        assert_eq!(report.bias_clusters.as_ref().unwrap().clusters.len(), 1);
        assert_eq!(report.negotiation_map.as_ref().unwrap().phases.len(), 1);
    }

    #[test]
    fn metrics_follow_normalized_highlights() {
        let report = analyze_value(&full_payload());
        // Severities normalize to 4, 3, 5 -> average 4.0 -> high.
        assert_eq!(report.metrics.severity_average, 4.0);
        assert_eq!(report.metrics.risk_level, RiskLevel::High);
    }

    #[test]
    fn fenced_response_text_is_analyzed() {
        let content = format!("Ось результат:\n```json\n{}\n```", full_payload());
        let report = analyze_response(&content);
        assert!(!report.degraded);
        assert_eq!(report.highlights.len(), 3);
    }

    #[test]
    fn garbage_text_degrades_to_fallback() {
        let report = analyze_response("Вибачте, я не можу проаналізувати це.");
        assert_eq!(report, AnalysisReport::fallback());
        assert!(report.degraded);
        assert_eq!(report.metrics.risk_level, RiskLevel::Low);
    }

    #[test]
    fn non_object_value_degrades_to_fallback() {
        assert_eq!(analyze_value(&json!([1, 2, 3])), AnalysisReport::fallback());
        assert_eq!(analyze_value(&json!(null)), AnalysisReport::fallback());
        assert_eq!(analyze_value(&json!("text")), AnalysisReport::fallback());
    }

    #[test]
    fn missing_sections_stay_absent() {
        let report = analyze_value(&json!({"highlights": []}));
        assert!(!report.degraded);
        assert!(report.highlights.is_empty());
        assert_eq!(report.metrics, HighlightMetrics::empty());
        assert!(report.summary.is_none());
        assert!(report.barometer.is_none());
        assert!(report.persona_focus.is_none());
    }

    #[test]
    fn empty_persona_people_is_absent_not_empty() {
        let report = analyze_value(&json!({"personaFocus": {"people": []}}));
        assert!(report.persona_focus.is_none());
    }

    #[test]
    fn malformed_sections_do_not_poison_the_rest() {
        let report = analyze_value(&json!({
            "highlights": [{"severity": 2, "label": "Тиск"}],
            "summary": "not an object",
            "barometer": [1, 2, 3],
            "personaFocus": 17,
        }));
        assert!(!report.degraded);
        assert_eq!(report.highlights.len(), 1);
        assert!(report.summary.is_none());
        assert!(report.barometer.is_none());
        assert!(report.persona_focus.is_none());
    }

    #[test]
    fn analysis_is_deterministic() {
        let payload = full_payload();
        assert_eq!(analyze_value(&payload), analyze_value(&payload));
    }

    #[test]
    fn report_serialization_omits_absent_sections() {
        let report = analyze_value(&json!({"highlights": []}));
        let serialized = serde_json::to_value(&report).unwrap();
        let obj = serialized.as_object().unwrap();
        assert!(obj.contains_key("highlights"));
        assert!(obj.contains_key("metrics"));
        assert!(!obj.contains_key("summary"));
        assert!(!obj.contains_key("personaFocus"));
    }
}
