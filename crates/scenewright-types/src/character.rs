//! Character and attribute-slider types.
//!
//! A character is a name, a free-text description, and an open set of
//! bipolar attribute sliders. Attribute names are user-extendable; the
//! seeded set is `EmotionalState`, `DialogueStyle`, `Relationships`.

use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A bipolar character trait: a 0-100 value interpolating between two
/// user-labeled poles. Value `v` weighs `v%` toward `right_label` and
/// `(100 - v)%` toward `left_label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSlider {
    pub value: u8,
    pub left_label: String,
    pub right_label: String,
}

impl AttributeSlider {
    /// Create a slider clamped into [0, 100].
    pub fn new(value: u8, left_label: impl Into<String>, right_label: impl Into<String>) -> Self {
        Self {
            value: value.min(100),
            left_label: left_label.into(),
            right_label: right_label.into(),
        }
    }

    /// Whether the value sits inside the valid [0, 100] range.
    pub fn is_valid(&self) -> bool {
        self.value <= 100
    }
}

/// One of the two characters in a scene.
///
/// `attributes` is keyed by attribute name in a `BTreeMap` so prompt
/// construction iterates in a deterministic order. `response_length`
/// (0-100) drives the generation length budget for this character's
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeSlider>,
    #[serde(default = "default_response_length")]
    pub response_length: u8,
}

fn default_response_length() -> u8 {
    50
}

impl Character {
    /// Create a character with no attributes and the default response length.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            attributes: BTreeMap::new(),
            response_length: default_response_length(),
        }
    }

    /// All attribute values and the response length are within [0, 100].
    pub fn is_valid(&self) -> bool {
        self.response_length <= 100 && self.attributes.values().all(AttributeSlider::is_valid)
    }
}

/// Humanize a CamelCase attribute name for display and prompt text
/// (`"EmotionalState"` becomes `"Emotional State"`).
pub fn humanize_attribute_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for (i, ch) in name.chars().enumerate() {
        if ch.is_uppercase() && i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slider_new_clamps() {
        let slider = AttributeSlider::new(250, "Troubled", "Confident");
        assert_eq!(slider.value, 100);
        assert!(slider.is_valid());
    }

    #[test]
    fn test_character_defaults() {
        let json = r#"{"name":"Harry Potter","description":"A young wizard"}"#;
        let character: Character = serde_json::from_str(json).unwrap();
        assert_eq!(character.response_length, 50);
        assert!(character.attributes.is_empty());
    }

    #[test]
    fn test_character_camel_case_fields() {
        let mut character = Character::new("Harry Potter", "A young wizard");
        character.attributes.insert(
            "EmotionalState".to_string(),
            AttributeSlider::new(70, "Troubled", "Confident"),
        );
        let json = serde_json::to_string(&character).unwrap();
        assert!(json.contains("\"responseLength\":50"));
        assert!(json.contains("\"leftLabel\":\"Troubled\""));
        assert!(json.contains("\"rightLabel\":\"Confident\""));
    }

    #[test]
    fn test_attributes_iterate_in_name_order() {
        let mut character = Character::new("X", "Y");
        character.attributes.insert(
            "Relationships".to_string(),
            AttributeSlider::new(50, "Distant", "Connected"),
        );
        character.attributes.insert(
            "DialogueStyle".to_string(),
            AttributeSlider::new(50, "Hesitant", "Assertive"),
        );
        character.attributes.insert(
            "EmotionalState".to_string(),
            AttributeSlider::new(50, "Troubled", "Confident"),
        );
        let names: Vec<&str> = character.attributes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["DialogueStyle", "EmotionalState", "Relationships"]);
    }

    #[test]
    fn test_humanize_attribute_name() {
        assert_eq!(humanize_attribute_name("EmotionalState"), "Emotional State");
        assert_eq!(humanize_attribute_name("DialogueStyle"), "Dialogue Style");
        assert_eq!(humanize_attribute_name("Relationships"), "Relationships");
        assert_eq!(humanize_attribute_name(""), "");
    }
}
