//! Single-line dialogue prompt builder.
//!
//! Produces one line of dialogue attributed to the speaking character.
//! Each attribute slider contributes a bipolar instruction that always
//! references both poles, and the response-length slider maps to the
//! generation token budget through [`length_budget`].

use scenewright_types::character::{AttributeSlider, humanize_attribute_name};
use scenewright_types::config::GenerationTuning;
use scenewright_types::generation::DialogueGenerationRequest;
use scenewright_types::scene::Speaker;
use scenewright_types::session::CharacterPair;

use super::{PromptPayload, transcript};

/// Map a 0-100 response-length value to a token budget.
///
/// `max(min_response_tokens, response_length * tokens_per_length_point)`.
/// Monotonic non-decreasing in `response_length`, with a fixed floor so a
/// zero slider still yields a usable completion.
pub fn length_budget(response_length: u8, tuning: &GenerationTuning) -> u32 {
    tuning
        .min_response_tokens
        .max(u32::from(response_length) * tuning.tokens_per_length_point)
}

/// Render one attribute as a bipolar instruction line.
///
/// Value `v` weighs `v%` toward the right pole and `(100 - v)%` toward
/// the left; both poles are always named, never only the dominant one.
pub fn attribute_instruction(name: &str, slider: &AttributeSlider) -> String {
    let value = slider.value.min(100);
    format!(
        "- {}: {}% towards {}, {}% towards {}",
        humanize_attribute_name(name),
        value,
        slider.right_label,
        100 - value,
        slider.left_label,
    )
}

/// Build the instruction payload for a single-line generation.
///
/// `dialogue_history` is serialized as given (oldest first); the caller
/// is responsible for windowing it.
pub fn build_dialogue_prompt(
    request: &DialogueGenerationRequest,
    tuning: &GenerationTuning,
) -> PromptPayload {
    let speaking = &request.speaking_character;
    let other = &request.other_character;

    let system = format!(
        "You are a dialogue generator for a scene between two characters.\n\
         Generate a single line of realistic dialogue that {} would say to {}.",
        speaking.name, other.name
    );

    let mut user = format!(
        "Scene Context: {}\nPlot Development: {}\n\n\
         Speaking Character ({}):\nCurrent State: {}",
        request.scene_description, request.plot_line, speaking.name, speaking.description
    );

    if !speaking.attributes.is_empty() {
        user.push_str("\nCurrent Attributes:");
        for (name, slider) in &speaking.attributes {
            user.push('\n');
            user.push_str(&attribute_instruction(name, slider));
        }
    }

    user.push_str(&format!(
        "\n\nOther Character ({}):\nCurrent State: {}",
        other.name, other.description
    ));

    if !request.dialogue_history.is_empty() {
        // History lines carry slot identifiers; rebuild the slot-to-name
        // mapping from which slot the speaker occupies.
        let speaking_slot = request.speaking_slot.unwrap_or(Speaker::Character1);
        let characters = match speaking_slot {
            Speaker::Character1 => CharacterPair {
                character1: speaking.clone(),
                character2: other.clone(),
            },
            Speaker::Character2 => CharacterPair {
                character1: other.clone(),
                character2: speaking.clone(),
            },
        };
        user.push_str("\n\nRecent Dialogue:\n");
        user.push_str(&transcript(&request.dialogue_history, &characters));
    }

    user.push_str(&format!(
        "\n\nGenerate only the dialogue line that {} would say next. \
         Do not include character names or quotation marks. NO quotation marks at all!",
        speaking.name
    ));

    let response_length = request
        .response_length
        .unwrap_or(speaking.response_length)
        .min(100);

    PromptPayload {
        system,
        user,
        max_tokens: length_budget(response_length, tuning),
        temperature: tuning.temperature,
    }
}
