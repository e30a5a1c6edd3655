//! Generation HTTP handlers.
//!
//! Endpoints:
//! - POST /generate-dialogue - one line for one speaking character
//! - POST /generate-scene    - a batch of exchanges advancing a plot point
//!
//! These are stateless over the session store: the caller owns appending
//! the result and writing the session back (`PUT /session/{mode}`).

use axum::Json;
use axum::extract::State;
use serde::Serialize;
use tracing::Instrument;
use uuid::Uuid;

use scenewright_observe::genai_attrs;
use scenewright_types::generation::{DialogueGenerationRequest, SceneGenerationRequest};
use scenewright_types::scene::DialogueLine;

use crate::http::error::AppError;
use crate::state::AppState;

/// Scope key for guarding in-flight generations from the HTTP surface.
const API_SCOPE: &str = "api";

/// Success body of POST /generate-dialogue.
#[derive(Debug, Serialize)]
pub struct DialogueResponse {
    pub dialogue: String,
}

/// Success body of POST /generate-scene.
#[derive(Debug, Serialize)]
pub struct SceneResponse {
    pub dialogue: Vec<DialogueLine>,
}

/// POST /generate-dialogue - Generate a single dialogue line.
pub async fn generate_dialogue(
    State(state): State<AppState>,
    Json(request): Json<DialogueGenerationRequest>,
) -> Result<Json<DialogueResponse>, AppError> {
    let service = state
        .generation()
        .map_err(|e| AppError::Internal(e.to_string()))?
        .clone();

    let span = tracing::info_span!(
        "generate_dialogue",
        request_id = %Uuid::now_v7(),
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_GENERATE_DIALOGUE,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = genai_attrs::PROVIDER_OPENAI_COMPAT,
        { genai_attrs::GEN_AI_REQUEST_MODEL } = state.config.provider.model.as_str(),
        { genai_attrs::GEN_AI_REQUEST_TEMPERATURE } = state.config.tuning.temperature,
    );

    let line = service
        .generate_line(API_SCOPE, &request)
        .instrument(span)
        .await?;

    Ok(Json(DialogueResponse {
        dialogue: line.text,
    }))
}

/// POST /generate-scene - Generate a batch of alternating exchanges.
pub async fn generate_scene(
    State(state): State<AppState>,
    Json(request): Json<SceneGenerationRequest>,
) -> Result<Json<SceneResponse>, AppError> {
    let service = state
        .generation()
        .map_err(|e| AppError::Internal(e.to_string()))?
        .clone();

    let span = tracing::info_span!(
        "generate_scene",
        request_id = %Uuid::now_v7(),
        { genai_attrs::GEN_AI_OPERATION_NAME } = genai_attrs::OP_GENERATE_SCENE,
        { genai_attrs::GEN_AI_PROVIDER_NAME } = genai_attrs::PROVIDER_OPENAI_COMPAT,
        { genai_attrs::GEN_AI_REQUEST_MODEL } = state.config.provider.model.as_str(),
        { genai_attrs::GEN_AI_REQUEST_MAX_TOKENS } = state.config.tuning.scene_max_tokens,
    );

    let dialogue = service
        .generate_scene(API_SCOPE, &request)
        .instrument(span)
        .await?;

    Ok(Json(SceneResponse { dialogue }))
}
