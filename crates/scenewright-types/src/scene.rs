//! Scene, dialogue line, and speaker types.
//!
//! A scene is the shared script state: description, current plot line,
//! the ordered dialogue sequence, the history of committed plot points,
//! and the edit/generation counters surfaced in the export statistics.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Which of the two character slots a dialogue line belongs to.
///
/// The cast is fixed at exactly two characters with stable identifiers;
/// this is not an arbitrary-cardinality cast list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum Speaker {
    #[serde(rename = "character1")]
    Character1,
    #[serde(rename = "character2")]
    Character2,
}

impl Speaker {
    /// The opposite slot.
    pub fn other(self) -> Self {
        match self {
            Speaker::Character1 => Speaker::Character2,
            Speaker::Character2 => Speaker::Character1,
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::Character1 => write!(f, "character1"),
            Speaker::Character2 => write!(f, "character2"),
        }
    }
}

impl FromStr for Speaker {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "character1" => Ok(Speaker::Character1),
            "character2" => Ok(Speaker::Character2),
            other => Err(format!("invalid speaker: '{other}'")),
        }
    }
}

/// A single line of dialogue.
///
/// `timestamp` is a localized `HH:MM` string assigned at receipt time,
/// never taken from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub character: Speaker,
    pub text: String,
    pub timestamp: String,
}

/// The shared script state mutated by edits and generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    pub description: String,
    pub plot_line: String,
    #[serde(default)]
    pub dialogue_lines: Vec<DialogueLine>,
    #[serde(default)]
    pub plot_points: Vec<String>,
    #[serde(default)]
    pub edit_count: u32,
    #[serde(default)]
    pub generate_count: u32,
}

impl Scene {
    pub fn new(description: impl Into<String>, plot_line: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            plot_line: plot_line.into(),
            dialogue_lines: Vec::new(),
            plot_points: Vec::new(),
            edit_count: 0,
            generate_count: 0,
        }
    }

    /// Append a generated line and count the generation.
    pub fn append_generated(&mut self, line: DialogueLine) {
        self.dialogue_lines.push(line);
        self.generate_count += 1;
    }

    /// Append a batch of generated lines, counting one generation, and
    /// commit the plot line that drove it to the plot-point history.
    pub fn append_generated_batch(&mut self, lines: Vec<DialogueLine>) {
        self.dialogue_lines.extend(lines);
        self.generate_count += 1;
        self.plot_points.push(self.plot_line.clone());
    }

    /// Replace the text of the line at `index`, counting the edit.
    pub fn edit_line(&mut self, index: usize, text: impl Into<String>) -> Result<(), SceneError> {
        let line = self
            .dialogue_lines
            .get_mut(index)
            .ok_or(SceneError::LineIndex(index))?;
        line.text = text.into();
        self.edit_count += 1;
        Ok(())
    }

    /// Remove the line at `index`, preserving the relative order of the rest.
    pub fn delete_line(&mut self, index: usize) -> Result<DialogueLine, SceneError> {
        if index >= self.dialogue_lines.len() {
            return Err(SceneError::LineIndex(index));
        }
        Ok(self.dialogue_lines.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(speaker: Speaker, text: &str) -> DialogueLine {
        DialogueLine {
            character: speaker,
            text: text.to_string(),
            timestamp: "10:30".to_string(),
        }
    }

    #[test]
    fn test_speaker_roundtrip() {
        for speaker in [Speaker::Character1, Speaker::Character2] {
            let s = speaker.to_string();
            let parsed: Speaker = s.parse().unwrap();
            assert_eq!(speaker, parsed);
        }
    }

    #[test]
    fn test_speaker_serde() {
        let json = serde_json::to_string(&Speaker::Character1).unwrap();
        assert_eq!(json, "\"character1\"");
        let parsed: Speaker = serde_json::from_str("\"character2\"").unwrap();
        assert_eq!(parsed, Speaker::Character2);
    }

    #[test]
    fn test_speaker_other() {
        assert_eq!(Speaker::Character1.other(), Speaker::Character2);
        assert_eq!(Speaker::Character2.other(), Speaker::Character1);
    }

    #[test]
    fn test_unknown_speaker_rejected() {
        let result: Result<Speaker, _> = serde_json::from_str("\"character3\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_append_generated_counts() {
        let mut scene = Scene::new("A dim classroom", "A confrontation");
        scene.append_generated(line(Speaker::Character1, "Hello"));
        assert_eq!(scene.dialogue_lines.len(), 1);
        assert_eq!(scene.generate_count, 1);
        assert_eq!(scene.edit_count, 0);
    }

    #[test]
    fn test_append_generated_batch_commits_plot_point() {
        let mut scene = Scene::new("A dim classroom", "A confrontation");
        scene.append_generated_batch(vec![
            line(Speaker::Character1, "Hello"),
            line(Speaker::Character2, "Go away"),
        ]);
        assert_eq!(scene.dialogue_lines.len(), 2);
        assert_eq!(scene.generate_count, 1);
        assert_eq!(scene.plot_points, vec!["A confrontation"]);
    }

    #[test]
    fn test_edit_line_counts() {
        let mut scene = Scene::new("", "");
        scene.dialogue_lines.push(line(Speaker::Character1, "Hello"));
        scene.edit_line(0, "Hello there").unwrap();
        assert_eq!(scene.dialogue_lines[0].text, "Hello there");
        assert_eq!(scene.edit_count, 1);
    }

    #[test]
    fn test_edit_line_out_of_bounds() {
        let mut scene = Scene::new("", "");
        let err = scene.edit_line(3, "x").unwrap_err();
        assert!(matches!(err, SceneError::LineIndex(3)));
        assert_eq!(scene.edit_count, 0);
    }

    #[test]
    fn test_delete_preserves_order() {
        let mut scene = Scene::new("", "");
        for text in ["a", "b", "c", "d"] {
            scene.dialogue_lines.push(line(Speaker::Character1, text));
        }
        scene.delete_line(1).unwrap();
        let texts: Vec<&str> = scene
            .dialogue_lines
            .iter()
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(texts, vec!["a", "c", "d"]);
    }

    #[test]
    fn test_scene_serde_camel_case() {
        let scene = Scene::new("INT. CLASSROOM - NIGHT", "The confrontation");
        let json = serde_json::to_string(&scene).unwrap();
        assert!(json.contains("\"plotLine\""));
        assert!(json.contains("\"dialogueLines\""));
        assert!(json.contains("\"plotPoints\""));
        assert!(json.contains("\"editCount\""));
        assert!(json.contains("\"generateCount\""));
    }

    #[test]
    fn test_scene_counters_default_on_missing_fields() {
        let json = r#"{"description":"x","plotLine":"y","dialogueLines":[]}"#;
        let scene: Scene = serde_json::from_str(json).unwrap();
        assert_eq!(scene.edit_count, 0);
        assert_eq!(scene.generate_count, 0);
        assert!(scene.plot_points.is_empty());
    }
}
