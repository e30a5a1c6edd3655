//! Lenient free-text scene parser.
//!
//! The response body is a transcript of `label: text` lines. Blank lines
//! and lines with no colon are dropped, never errors. The speaker label
//! maps case-insensitively against the slot identifiers and the two
//! character names; anything else falls back to the configured default
//! speaker.

use scenewright_types::scene::{DialogueLine, Speaker};
use scenewright_types::session::CharacterPair;

/// Parse a free-text scene response into dialogue lines.
///
/// Every produced line receives `timestamp` (receipt time), regardless of
/// anything the model wrote.
pub fn parse_free_text(
    body: &str,
    characters: &CharacterPair,
    default_speaker: Speaker,
    timestamp: &str,
) -> Vec<DialogueLine> {
    body.lines()
        .filter_map(|raw| {
            let raw = raw.trim();
            if raw.is_empty() {
                return None;
            }
            let (label, text) = raw.split_once(':')?;
            let text = text.trim();
            if text.is_empty() {
                return None;
            }
            Some(DialogueLine {
                character: resolve_speaker(label.trim(), characters, default_speaker),
                text: text.to_string(),
                timestamp: timestamp.to_string(),
            })
        })
        .collect()
}

/// Map a speaker label to a slot: slot id first, then character name,
/// then the configured fallback.
fn resolve_speaker(label: &str, characters: &CharacterPair, default_speaker: Speaker) -> Speaker {
    if let Ok(slot) = label.parse::<Speaker>() {
        return slot;
    }
    if label.eq_ignore_ascii_case(&characters.character1.name) {
        return Speaker::Character1;
    }
    if label.eq_ignore_ascii_case(&characters.character2.name) {
        return Speaker::Character2;
    }
    tracing::warn!(%label, "unmatched speaker label, using fallback slot");
    default_speaker
}
