//! Application error type mapping to HTTP status codes.
//!
//! Every failure body is `{ "error": "<message>" }` with a non-2xx
//! status; setup validation additionally carries a `fields` list for
//! inline per-field display.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use scenewright_types::error::{GenerationError, SessionError, ValidationError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Session load/save/clear failures, including the missing-session
    /// signal callers turn into a redirect to setup.
    Session(SessionError),
    /// Setup validation failure with per-field details.
    Validation(ValidationError),
    /// Generation failures; nothing was appended.
    Generation(GenerationError),
    /// Malformed request input (e.g. an unknown mode name).
    BadRequest(String),
    /// Generic internal error.
    Internal(String),
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e)
    }
}

impl From<GenerationError> for AppError {
    fn from(e: GenerationError) -> Self {
        AppError::Generation(e)
    }
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Session(SessionError::Missing) => StatusCode::NOT_FOUND,
            AppError::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            // Any provider-side failure is an upstream error.
            AppError::Generation(GenerationError::Llm(_)) => StatusCode::BAD_GATEWAY,
            AppError::Generation(GenerationError::AlreadyGenerating { .. }) => {
                StatusCode::CONFLICT
            }
            AppError::Generation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::Session(SessionError::Missing) => json!({
                "error": "no session data found",
                "code": "SESSION_MISSING",
            }),
            AppError::Session(e) => json!({ "error": e.to_string() }),
            AppError::Validation(e) => json!({
                "error": e.to_string(),
                "fields": e.0,
            }),
            AppError::Generation(e) => json!({ "error": e.to_string() }),
            AppError::BadRequest(msg) => json!({ "error": msg }),
            AppError::Internal(msg) => json!({ "error": msg }),
        };

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_types::error::FieldError;
    use scenewright_types::llm::LlmError;

    #[test]
    fn test_missing_session_is_404() {
        let err = AppError::Session(SessionError::Missing);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_validation_is_400() {
        let err = AppError::Validation(ValidationError(vec![FieldError::required(
            "character1Name",
        )]));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_provider_failure_is_502() {
        let err = AppError::Generation(GenerationError::Llm(LlmError::Provider {
            message: "boom".to_string(),
        }));
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_parse_failure_is_422() {
        let err = AppError::Generation(GenerationError::Parse("bad".to_string()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let err = AppError::Generation(GenerationError::UnknownSpeaker("narrator".to_string()));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_reentrant_generation_is_409() {
        let err = AppError::Generation(GenerationError::AlreadyGenerating {
            slot: "api/character1".to_string(),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
