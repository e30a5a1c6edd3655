use serde::Serialize;
use thiserror::Error;

use crate::llm::LlmError;

/// Errors from the session persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection error")]
    Connection,

    #[error("store query error: {0}")]
    Query(String),
}

/// Errors from session load/save/clear operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Neither a mode copy nor the original session exists. Callers route
    /// this back to setup; it is never shown as a user-facing error.
    #[error("no session data found")]
    Missing,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A per-field setup validation failure, surfaced inline next to the field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: "Required".to_string(),
        }
    }
}

/// Setup-form validation failure carrying every offending field.
#[derive(Debug, Error)]
#[error("invalid session setup: {} field(s) failed validation", .0.len())]
pub struct ValidationError(pub Vec<FieldError>);

/// Mutating a scene's dialogue sequence with a bad index.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("dialogue line index {0} out of bounds")]
    LineIndex(usize),
}

/// Errors from dialogue/scene generation. None of these mutate the
/// session; a failed generation requires a manual repeat.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("unparseable generation response: {0}")]
    Parse(String),

    #[error("response names unknown speaker '{0}'")]
    UnknownSpeaker(String),

    #[error("generation produced no dialogue")]
    EmptyResponse,

    #[error("a generation for {slot} is already in flight")]
    AlreadyGenerating { slot: String },
}
