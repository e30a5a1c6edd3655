//! Scene-batch prompt builder.
//!
//! Produces several alternating exchanges advancing a stated plot point,
//! continuing from whatever dialogue and plot point came before. The
//! response-format instruction depends on the parse mode: free-text mode
//! demands `character1: [dialogue]` transcript lines, structured mode
//! relies on the JSON-schema output constraint instead.

use scenewright_types::config::GenerationTuning;
use scenewright_types::generation::{GenerationMode, SceneGenerationRequest};

use super::{PromptPayload, transcript};

/// Fallback plot-point label for the very first batch of a scene.
const STARTING_SCENE: &str = "Starting scene";

/// Build the instruction payload for a scene-batch generation.
pub fn build_scene_prompt(
    request: &SceneGenerationRequest,
    mode: GenerationMode,
    tuning: &GenerationTuning,
) -> PromptPayload {
    let format_requirement = match mode {
        GenerationMode::FreeText => {
            "- Always format lines as \"character1: [dialogue]\" or \"character2: [dialogue]\"\n"
        }
        // The schema constraint carries the shape; no format line needed.
        GenerationMode::Structured => "",
    };

    let system = format!(
        "You are a dialogue scene generator focused on advancing specific plot points \
         through character interactions. Your task is to generate dialogue that explicitly \
         moves the story toward the given plot points while maintaining character authenticity.\n\n\
         Key Requirements:\n\
         - Each line of dialogue must clearly contribute to advancing the plot point\n\
         - Keep the conversation focused on achieving the plot goal\n\
         - Maintain character voices and personalities\n\
         {format_requirement}\
         - Generate {}-{} exchanges that directly progress toward the plot point",
        tuning.min_exchanges, tuning.max_exchanges
    );

    let previous_lines = if request.previous_dialogue.is_empty() {
        "No previous dialogue".to_string()
    } else {
        format!(
            "Previous Dialogue:\n{}",
            transcript(&request.previous_dialogue, &request.characters)
        )
    };

    let previous_plot_point = request
        .previous_plot_point
        .as_deref()
        .filter(|p| !p.trim().is_empty())
        .unwrap_or(STARTING_SCENE);

    let user = format!(
        "Scene Context: {}\n\n\
         Characters:\n{}: {}\n{}: {}\n\n\
         Previous Plot Point: {}\n\n\
         {}\n\n\
         Current Plot Point: {} must continue with the topics and ideas of what previously \
         happened in the scene.\n\
         Generate the next part of the conversation, ensuring it builds naturally from any \
         previous dialogue while driving directly toward the current plot point.",
        request.scene_description,
        request.characters.character1.name,
        request.characters.character1.description,
        request.characters.character2.name,
        request.characters.character2.description,
        previous_plot_point,
        previous_lines,
        request.plot_point,
    );

    PromptPayload {
        system,
        user,
        max_tokens: tuning.scene_max_tokens,
        temperature: tuning.temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_types::character::Character;
    use scenewright_types::scene::{DialogueLine, Speaker};
    use scenewright_types::session::CharacterPair;

    fn request() -> SceneGenerationRequest {
        SceneGenerationRequest {
            characters: CharacterPair {
                character1: Character::new("Harry Potter", "A young wizard"),
                character2: Character::new("Severus Snape", "A complex character"),
            },
            scene_description: "The potions classroom after hours.".to_string(),
            plot_point: "Harry demands the truth".to_string(),
            previous_dialogue: Vec::new(),
            previous_plot_point: None,
            parse_mode: None,
        }
    }

    #[test]
    fn test_free_text_mode_demands_line_format() {
        let payload =
            build_scene_prompt(&request(), GenerationMode::FreeText, &GenerationTuning::default());
        assert!(payload.system.contains("character1: [dialogue]"));
        assert!(payload.system.contains("Generate 3-8 exchanges"));
    }

    #[test]
    fn test_structured_mode_omits_line_format() {
        let payload = build_scene_prompt(
            &request(),
            GenerationMode::Structured,
            &GenerationTuning::default(),
        );
        assert!(!payload.system.contains("character1: [dialogue]"));
        assert!(payload.system.contains("Generate 3-8 exchanges"));
    }

    #[test]
    fn test_first_batch_gets_starting_scene_fallback() {
        let payload =
            build_scene_prompt(&request(), GenerationMode::FreeText, &GenerationTuning::default());
        assert!(payload.user.contains("Previous Plot Point: Starting scene"));
        assert!(payload.user.contains("No previous dialogue"));
    }

    #[test]
    fn test_continuation_carries_previous_context() {
        let mut req = request();
        req.previous_plot_point = Some("Snape deflects".to_string());
        req.previous_dialogue = vec![DialogueLine {
            character: Speaker::Character2,
            text: "You ask too many questions.".to_string(),
            timestamp: "21:14".to_string(),
        }];
        let payload =
            build_scene_prompt(&req, GenerationMode::FreeText, &GenerationTuning::default());
        assert!(payload.user.contains("Previous Plot Point: Snape deflects"));
        assert!(
            payload
                .user
                .contains("Previous Dialogue:\nSeverus Snape: You ask too many questions.")
        );
        assert!(!payload.user.contains("No previous dialogue"));
    }

    #[test]
    fn test_blank_previous_plot_point_treated_as_start() {
        let mut req = request();
        req.previous_plot_point = Some("   ".to_string());
        let payload =
            build_scene_prompt(&req, GenerationMode::FreeText, &GenerationTuning::default());
        assert!(payload.user.contains("Previous Plot Point: Starting scene"));
    }

    #[test]
    fn test_uses_scene_token_ceiling() {
        let tuning = GenerationTuning::default();
        let payload = build_scene_prompt(&request(), GenerationMode::FreeText, &tuning);
        assert_eq!(payload.max_tokens, tuning.scene_max_tokens);
    }

    #[test]
    fn test_exchange_range_follows_tuning() {
        let tuning = GenerationTuning {
            min_exchanges: 3,
            max_exchanges: 6,
            ..GenerationTuning::default()
        };
        let payload = build_scene_prompt(&request(), GenerationMode::FreeText, &tuning);
        assert!(payload.system.contains("Generate 3-6 exchanges"));
    }
}
