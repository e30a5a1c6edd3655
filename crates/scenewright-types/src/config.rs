//! Global configuration shape.
//!
//! Deserialized from `config.toml` in the data directory. Every field has
//! a serde default so a partial (or missing) file still yields a working
//! configuration.

use serde::{Deserialize, Serialize};

use crate::generation::GenerationMode;
use crate::scene::Speaker;

/// LLM provider connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of an OpenAI-compatible chat-completions API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_api_key_env() -> String {
    "SCENEWRIGHT_API_KEY".to_string()
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Generation tuning knobs.
///
/// These resolve the behaviors the product leaves configurable: the
/// dialogue-history window fed to prompts, the response-length budget
/// mapping, the exchange-count target for scene batches, the fallback
/// speaker for unmatched free-text labels, and the default parse mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationTuning {
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// How many trailing dialogue lines feed the prompt as context.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Token floor of the single-line length budget.
    #[serde(default = "default_min_response_tokens")]
    pub min_response_tokens: u32,
    /// Tokens granted per response-length point above the floor.
    #[serde(default = "default_tokens_per_length_point")]
    pub tokens_per_length_point: u32,
    /// Token ceiling for scene-batch calls.
    #[serde(default = "default_scene_max_tokens")]
    pub scene_max_tokens: u32,
    #[serde(default = "default_min_exchanges")]
    pub min_exchanges: u32,
    #[serde(default = "default_max_exchanges")]
    pub max_exchanges: u32,
    /// Slot assigned to free-text lines whose label matches neither
    /// character.
    #[serde(default = "default_speaker")]
    pub default_speaker: Speaker,
    #[serde(default = "default_parse_mode")]
    pub parse_mode: GenerationMode,
}

fn default_temperature() -> f64 {
    0.7
}

fn default_history_window() -> usize {
    3
}

fn default_min_response_tokens() -> u32 {
    60
}

fn default_tokens_per_length_point() -> u32 {
    3
}

fn default_scene_max_tokens() -> u32 {
    500
}

fn default_min_exchanges() -> u32 {
    3
}

fn default_max_exchanges() -> u32 {
    8
}

fn default_speaker() -> Speaker {
    Speaker::Character2
}

fn default_parse_mode() -> GenerationMode {
    GenerationMode::FreeText
}

impl Default for GenerationTuning {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            history_window: default_history_window(),
            min_response_tokens: default_min_response_tokens(),
            tokens_per_length_point: default_tokens_per_length_point(),
            scene_max_tokens: default_scene_max_tokens(),
            min_exchanges: default_min_exchanges(),
            max_exchanges: default_max_exchanges(),
            default_speaker: default_speaker(),
            parse_mode: default_parse_mode(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub tuning: GenerationTuning,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: GlobalConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.provider.model, "gpt-4");
        assert_eq!(config.tuning.history_window, 3);
        assert_eq!(config.tuning.min_response_tokens, 60);
        assert_eq!(config.tuning.default_speaker, Speaker::Character2);
        assert_eq!(config.tuning.parse_mode, GenerationMode::FreeText);
    }

    #[test]
    fn test_partial_tuning_overrides() {
        let json = r#"{"tuning": {"history_window": 10, "max_exchanges": 6}}"#;
        let config: GlobalConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.tuning.history_window, 10);
        assert_eq!(config.tuning.max_exchanges, 6);
        // Untouched fields keep their defaults.
        assert_eq!(config.tuning.min_exchanges, 3);
        assert!((config.tuning.temperature - 0.7).abs() < f64::EPSILON);
    }
}
