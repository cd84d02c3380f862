//! LLM provider configuration.
//!
//! The transport itself lives outside this workspace; these settings give
//! it a configuration home and let call sites size their token estimates.

use serde::{Deserialize, Serialize};

/// Default completion size cap, in tokens.
const fn default_max_output_tokens() -> u32 {
    4096
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Model identifier (e.g., `anthropic/claude-sonnet-4`).
    #[serde(default)]
    pub model: String,

    /// Maximum completion tokens requested per call.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: String::new(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl LlmConfig {
    /// Check whether a model has been selected.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.model.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = LlmConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.max_output_tokens, 4096);
    }

    #[test]
    fn configured_when_model_set() {
        let config = LlmConfig {
            model: "anthropic/claude-sonnet-4".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
