use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Per-person risk breakdown within a multi-party transcript.
///
/// The normalizer returns `None` instead of a `PersonaFocus` with an empty
/// people list, so this struct always carries at least one persona.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonaFocus {
    pub people: Vec<Persona>,
}

/// One named participant and their detected patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Persona {
    pub name: String,
    /// Personal risk score, 0–100.
    pub risk_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub biases: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tactics: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub triggers: Option<Vec<String>>,
}
