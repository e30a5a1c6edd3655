//! Session and generation-mode types.
//!
//! A `SceneSession` is the full character + scene state for one sitting.
//! It is persisted once under the original key at setup; each generation
//! mode forks its own copy on first edit and persists under a mode-scoped
//! key until reset.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::character::Character;
use crate::scene::{Scene, Speaker};

/// Persistence key of the original (setup-time) session.
pub const ORIGINAL_SESSION_KEY: &str = "originalSessionData";

/// The two fixed character slots of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CharacterPair {
    pub character1: Character,
    pub character2: Character,
}

impl CharacterPair {
    /// The character occupying `slot`.
    pub fn get(&self, slot: Speaker) -> &Character {
        match slot {
            Speaker::Character1 => &self.character1,
            Speaker::Character2 => &self.character2,
        }
    }

    pub fn get_mut(&mut self, slot: Speaker) -> &mut Character {
        match slot {
            Speaker::Character1 => &mut self.character1,
            Speaker::Character2 => &mut self.character2,
        }
    }

    /// Display name of the character in `slot`.
    pub fn name_of(&self, slot: Speaker) -> &str {
        &self.get(slot).name
    }
}

/// The full character + scene state for one user sitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSession {
    pub characters: CharacterPair,
    pub scene: Scene,
}

/// A named generation workflow that forks its own session copy from the
/// original. `Normal` is the scene-batch workflow, `FineGrain` the
/// single-line, attribute-driven one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Normal,
    FineGrain,
}

impl Mode {
    /// Every known mode. Clear-all derives its key set from this list so
    /// the clear path cannot drift from the save path.
    pub const ALL: [Mode; 2] = [Mode::Normal, Mode::FineGrain];

    /// Persistence key of this mode's session copy.
    pub fn storage_key(self) -> String {
        format!("{self}SessionData")
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Normal => write!(f, "normal"),
            Mode::FineGrain => write!(f, "finegrain"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Mode::Normal),
            "finegrain" => Ok(Mode::FineGrain),
            other => Err(format!("invalid mode: '{other}'")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_roundtrip() {
        for mode in Mode::ALL {
            let s = mode.to_string();
            let parsed: Mode = s.parse().unwrap();
            assert_eq!(mode, parsed);
        }
    }

    #[test]
    fn test_mode_storage_keys() {
        assert_eq!(Mode::Normal.storage_key(), "normalSessionData");
        assert_eq!(Mode::FineGrain.storage_key(), "finegrainSessionData");
    }

    #[test]
    fn test_mode_serde() {
        assert_eq!(serde_json::to_string(&Mode::FineGrain).unwrap(), "\"finegrain\"");
        let parsed: Mode = serde_json::from_str("\"normal\"").unwrap();
        assert_eq!(parsed, Mode::Normal);
    }

    #[test]
    fn test_character_pair_lookup() {
        let pair = CharacterPair {
            character1: Character::new("Harry Potter", "A young wizard"),
            character2: Character::new("Severus Snape", "A complex character"),
        };
        assert_eq!(pair.name_of(Speaker::Character1), "Harry Potter");
        assert_eq!(pair.name_of(Speaker::Character2), "Severus Snape");
        assert_eq!(pair.get(Speaker::Character2).description, "A complex character");
    }

    #[test]
    fn test_session_json_roundtrip() {
        let session = SceneSession {
            characters: CharacterPair {
                character1: Character::new("Harry Potter", "A young wizard"),
                character2: Character::new("Severus Snape", "A complex character"),
            },
            scene: Scene::new("The potions classroom", "A confrontation"),
        };
        let json = serde_json::to_value(&session).unwrap();
        let back: SceneSession = serde_json::from_value(json).unwrap();
        assert_eq!(back, session);
    }
}
