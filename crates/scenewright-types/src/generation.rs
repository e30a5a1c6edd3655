//! Generation request/response shapes.
//!
//! These are the wire bodies of the two generation endpoints and the
//! structured-output shape for scene-batch responses. Field names are
//! camelCase to match the persisted session JSON.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::scene::{DialogueLine, Speaker};
use crate::session::CharacterPair;

/// How a scene-batch response body is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// `"character1: <text>"` transcript lines, parsed leniently.
    FreeText,
    /// JSON-schema-constrained `SceneTurn`, validated strictly.
    Structured,
}

impl fmt::Display for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationMode::FreeText => write!(f, "free_text"),
            GenerationMode::Structured => write!(f, "structured"),
        }
    }
}

impl FromStr for GenerationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "free_text" => Ok(GenerationMode::FreeText),
            "structured" => Ok(GenerationMode::Structured),
            other => Err(format!("invalid generation mode: '{other}'")),
        }
    }
}

/// Body of `POST /generate-dialogue`: one line for one speaking character.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueGenerationRequest {
    pub speaking_character: Character,
    pub other_character: Character,
    /// Which slot the speaking character occupies. Needed to attribute
    /// `dialogue_history` lines by name; defaults to `character1` when
    /// the caller omits it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speaking_slot: Option<Speaker>,
    pub scene_description: String,
    pub plot_line: String,
    /// Overrides the speaking character's own response length when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_length: Option<u8>,
    /// Recent transcript window, oldest first. The caller slices; the
    /// prompt builder serializes whatever it is given.
    #[serde(default)]
    pub dialogue_history: Vec<DialogueLine>,
}

/// Body of `POST /generate-scene`: a batch of alternating exchanges
/// advancing a plot point.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneGenerationRequest {
    pub characters: CharacterPair,
    pub scene_description: String,
    pub plot_point: String,
    #[serde(default)]
    pub previous_dialogue: Vec<DialogueLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_plot_point: Option<String>,
    /// Overrides the configured parse mode for this call when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse_mode: Option<GenerationMode>,
}

/// Structured-output shape for a scene-batch response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SceneTurn {
    pub dialogue: Vec<DialogueLine>,
}

/// Recursively set `additionalProperties: false` on every object schema.
///
/// Strict structured output requires closed object schemas; schemars
/// leaves objects open by default.
pub fn add_additional_properties_false(schema: &mut serde_json::Value) {
    if let serde_json::Value::Object(map) = schema {
        let is_object_schema = map
            .get("type")
            .and_then(|t| t.as_str())
            .is_some_and(|t| t == "object")
            || map.contains_key("properties");
        if is_object_schema {
            map.insert(
                "additionalProperties".to_string(),
                serde_json::Value::Bool(false),
            );
        }
        for value in map.values_mut() {
            add_additional_properties_false(value);
        }
    } else if let serde_json::Value::Array(items) = schema {
        for value in items {
            add_additional_properties_false(value);
        }
    }
}
