//! GenerationService: prompt assembly, provider call, response
//! interpretation, and the per-slot in-flight guard.
//!
//! The service is stateless with respect to sessions: it turns a
//! generation request into validated dialogue lines. Callers own loading
//! the session, appending the result, and writing it back.

use chrono::Local;
use dashmap::DashMap;

use scenewright_types::config::GenerationTuning;
use scenewright_types::error::GenerationError;
use scenewright_types::generation::{
    DialogueGenerationRequest, GenerationMode, SceneGenerationRequest,
};
use scenewright_types::llm::{CompletionRequest, Message, MessageRole};
use scenewright_types::scene::{DialogueLine, Speaker};

use crate::interpret::{parse_free_text, parse_structured, scene_output_config, tidy_dialogue_line};
use crate::llm::BoxLlmProvider;
use crate::prompt::dialogue::build_dialogue_prompt;
use crate::prompt::scene::build_scene_prompt;

/// Key of one in-flight generation: a caller scope (mode name or API
/// surface) and the speaker slot, or `None` for a whole-scene batch.
type SlotKey = (String, Option<Speaker>);

/// Turns generation requests into validated dialogue lines.
///
/// At most one generation may be in flight per slot key; a second request
/// for the same key fails fast with
/// [`GenerationError::AlreadyGenerating`]. Requests for different slots
/// may overlap.
pub struct GenerationService {
    provider: BoxLlmProvider,
    model: String,
    tuning: GenerationTuning,
    in_flight: DashMap<SlotKey, ()>,
}

impl GenerationService {
    pub fn new(provider: BoxLlmProvider, model: String, tuning: GenerationTuning) -> Self {
        Self {
            provider,
            model,
            tuning,
            in_flight: DashMap::new(),
        }
    }

    pub fn tuning(&self) -> &GenerationTuning {
        &self.tuning
    }

    /// The trailing window of `lines` that feeds prompts as context.
    pub fn history_window<'a>(&self, lines: &'a [DialogueLine]) -> &'a [DialogueLine] {
        let start = lines.len().saturating_sub(self.tuning.history_window);
        &lines[start..]
    }

    /// Generate one line of dialogue for the speaking character.
    ///
    /// On success the returned line carries the speaking slot and a fresh
    /// receipt-time timestamp; nothing is persisted here.
    pub async fn generate_line(
        &self,
        scope: &str,
        request: &DialogueGenerationRequest,
    ) -> Result<DialogueLine, GenerationError> {
        let slot = request.speaking_slot.unwrap_or(Speaker::Character1);
        let _guard = self.begin(scope, Some(slot))?;

        // The service owns the history window; the builder serializes
        // whatever it receives.
        let mut request = request.clone();
        request.dialogue_history = self.history_window(&request.dialogue_history).to_vec();

        let payload = build_dialogue_prompt(&request, &self.tuning);
        let completion = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: payload.user,
            }],
            system: Some(payload.system),
            max_tokens: payload.max_tokens,
            temperature: Some(payload.temperature),
            output_config: None,
        };

        let response = self.provider.complete(&completion).await?;
        tracing::debug!(
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "dialogue line generated"
        );

        let text = tidy_dialogue_line(&response.content, &request.speaking_character.name);
        if text.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(DialogueLine {
            character: slot,
            text,
            timestamp: receipt_timestamp(),
        })
    }

    /// Generate a batch of alternating exchanges advancing the plot point.
    pub async fn generate_scene(
        &self,
        scope: &str,
        request: &SceneGenerationRequest,
    ) -> Result<Vec<DialogueLine>, GenerationError> {
        let _guard = self.begin(scope, None)?;

        let mode = request.parse_mode.unwrap_or(self.tuning.parse_mode);

        let mut request = request.clone();
        request.previous_dialogue = self.history_window(&request.previous_dialogue).to_vec();

        let payload = build_scene_prompt(&request, mode, &self.tuning);
        let completion = CompletionRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: MessageRole::User,
                content: payload.user,
            }],
            system: Some(payload.system),
            max_tokens: payload.max_tokens,
            temperature: Some(payload.temperature),
            output_config: match mode {
                GenerationMode::FreeText => None,
                GenerationMode::Structured => Some(scene_output_config()),
            },
        };

        let response = self.provider.complete(&completion).await?;
        tracing::debug!(
            %mode,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "scene batch generated"
        );

        let timestamp = receipt_timestamp();
        let lines = match mode {
            GenerationMode::FreeText => parse_free_text(
                &response.content,
                &request.characters,
                self.tuning.default_speaker,
                &timestamp,
            ),
            GenerationMode::Structured => parse_structured(&response.content, &timestamp)?,
        };

        if lines.is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(lines)
    }

    /// Mark a slot in flight, failing fast if it already is. The returned
    /// guard releases the slot on drop, error paths included.
    fn begin(&self, scope: &str, slot: Option<Speaker>) -> Result<InFlightGuard<'_>, GenerationError> {
        let key = (scope.to_string(), slot);
        if self.in_flight.insert(key.clone(), ()).is_some() {
            let slot_name = match slot {
                Some(speaker) => format!("{scope}/{speaker}"),
                None => format!("{scope}/scene"),
            };
            return Err(GenerationError::AlreadyGenerating { slot: slot_name });
        }
        Ok(InFlightGuard {
            map: &self.in_flight,
            key,
        })
    }
}

/// Releases the in-flight slot when the generation resolves or fails.
struct InFlightGuard<'a> {
    map: &'a DashMap<SlotKey, ()>,
    key: SlotKey,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.map.remove(&self.key);
    }
}

/// Localized hour:minute receipt timestamp for accepted lines.
fn receipt_timestamp() -> String {
    Local::now().format("%H:%M").to_string()
}
