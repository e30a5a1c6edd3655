//! Prompt construction for the two generation workflows.
//!
//! Builders are pure: given the current model state and tuning they
//! produce a deterministic instruction payload. They never slice the
//! dialogue history themselves -- the caller owns the window.

pub mod dialogue;
pub mod scene;

use scenewright_types::scene::DialogueLine;
use scenewright_types::session::CharacterPair;

/// A fully assembled instruction payload for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayload {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

/// Serialize dialogue lines as a speaker-attributed transcript, oldest
/// first, one `Name: text` line each.
pub fn transcript(lines: &[DialogueLine], characters: &CharacterPair) -> String {
    lines
        .iter()
        .map(|line| format!("{}: {}", characters.name_of(line.character), line.text))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_types::character::Character;
    use scenewright_types::scene::Speaker;

    #[test]
    fn test_transcript_attributes_speakers_oldest_first() {
        let characters = CharacterPair {
            character1: Character::new("Harry Potter", "a wizard"),
            character2: Character::new("Severus Snape", "a teacher"),
        };
        let lines = vec![
            DialogueLine {
                character: Speaker::Character1,
                text: "Professor, I need to talk to you.".to_string(),
                timestamp: "10:01".to_string(),
            },
            DialogueLine {
                character: Speaker::Character2,
                text: "Make it quick, Potter.".to_string(),
                timestamp: "10:02".to_string(),
            },
        ];
        let text = transcript(&lines, &characters);
        assert_eq!(
            text,
            "Harry Potter: Professor, I need to talk to you.\nSeverus Snape: Make it quick, Potter."
        );
    }

    #[test]
    fn test_transcript_empty_is_empty() {
        let characters = CharacterPair {
            character1: Character::new("A", "a"),
            character2: Character::new("B", "b"),
        };
        assert_eq!(transcript(&[], &characters), "");
    }
}
