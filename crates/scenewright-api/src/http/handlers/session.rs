//! Session lifecycle HTTP handlers.
//!
//! Endpoints:
//! - POST   /session              - validated setup; saves the original
//! - GET    /session/{mode}       - load with fallback to the original
//! - PUT    /session/{mode}       - write-through save of the mode copy
//! - POST   /session/{mode}/reset - discard the mode copy
//! - DELETE /session/{mode}       - clear the mode copy only
//! - DELETE /session              - clear the original and every copy

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use scenewright_core::session::validate_setup;
use scenewright_types::session::{Mode, SceneSession};

use crate::http::error::AppError;
use crate::state::AppState;

/// Parse a mode path parameter, returning 400 on unknown names.
fn parse_mode(s: &str) -> Result<Mode, AppError> {
    s.parse::<Mode>().map_err(AppError::BadRequest)
}

/// POST /session - Validate and persist the original session.
pub async fn create_session(
    State(state): State<AppState>,
    Json(session): Json<SceneSession>,
) -> Result<(StatusCode, Json<SceneSession>), AppError> {
    validate_setup(&session)?;
    state.session_service.save_original(&session).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// GET /session/{mode} - Load the session visible to a mode.
pub async fn get_session(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<SceneSession>, AppError> {
    let mode = parse_mode(&mode)?;
    let session = state.session_service.load(mode).await?;
    Ok(Json(session))
}

/// PUT /session/{mode} - Replace the mode's forked copy.
pub async fn save_session(
    State(state): State<AppState>,
    Path(mode): Path<String>,
    Json(session): Json<SceneSession>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mode = parse_mode(&mode)?;
    state.session_service.save(mode, &session).await?;
    Ok(Json(serde_json::json!({ "saved": true, "mode": mode })))
}

/// POST /session/{mode}/reset - Discard the mode copy; return the original.
pub async fn reset_session(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<SceneSession>, AppError> {
    let mode = parse_mode(&mode)?;
    let original = state.session_service.reset_to_original(mode).await?;
    Ok(Json(original))
}

/// DELETE /session/{mode} - Clear the mode copy only.
pub async fn clear_mode(
    State(state): State<AppState>,
    Path(mode): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let mode = parse_mode(&mode)?;
    state.session_service.clear_mode(mode).await?;
    Ok(Json(serde_json::json!({ "cleared": true, "mode": mode })))
}

/// DELETE /session - Clear everything; the app returns to setup state.
pub async fn clear_all(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    state.session_service.clear_all().await?;
    Ok(Json(serde_json::json!({ "cleared": true })))
}
