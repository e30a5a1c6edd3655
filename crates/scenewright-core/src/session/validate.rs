//! Setup-form validation.
//!
//! Caught before anything is persisted and surfaced inline per field;
//! field identifiers match the wire naming of the setup payload.

use scenewright_types::error::{FieldError, ValidationError};
use scenewright_types::session::SceneSession;

/// Validate a session before it becomes the original.
///
/// Both character names and descriptions, the scene description, and the
/// plot line are required; every slider value must sit in [0, 100].
pub fn validate_setup(session: &SceneSession) -> Result<(), ValidationError> {
    let mut errors = Vec::new();

    let characters = &session.characters;
    if characters.character1.name.trim().is_empty() {
        errors.push(FieldError::required("character1Name"));
    }
    if characters.character1.description.trim().is_empty() {
        errors.push(FieldError::required("character1Description"));
    }
    if characters.character2.name.trim().is_empty() {
        errors.push(FieldError::required("character2Name"));
    }
    if characters.character2.description.trim().is_empty() {
        errors.push(FieldError::required("character2Description"));
    }
    if session.scene.description.trim().is_empty() {
        errors.push(FieldError::required("sceneDescription"));
    }
    if session.scene.plot_line.trim().is_empty() {
        errors.push(FieldError::required("plotLine"));
    }

    for (slot, character) in [
        ("character1", &characters.character1),
        ("character2", &characters.character2),
    ] {
        if !character.is_valid() {
            errors.push(FieldError {
                field: format!("{slot}Attributes"),
                message: "Attribute values must be between 0 and 100".to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::default_session;

    #[test]
    fn test_complete_session_passes() {
        assert!(validate_setup(&default_session()).is_ok());
    }

    #[test]
    fn test_blank_fields_reported_individually() {
        let mut session = default_session();
        session.characters.character1.name = "  ".to_string();
        session.scene.plot_line = String::new();

        let err = validate_setup(&session).unwrap_err();
        let fields: Vec<&str> = err.0.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["character1Name", "plotLine"]);
        assert!(err.0.iter().all(|e| e.message == "Required"));
    }

    #[test]
    fn test_all_fields_blank_reports_all() {
        let mut session = default_session();
        session.characters.character1.name.clear();
        session.characters.character1.description.clear();
        session.characters.character2.name.clear();
        session.characters.character2.description.clear();
        session.scene.description.clear();
        session.scene.plot_line.clear();

        let err = validate_setup(&session).unwrap_err();
        assert_eq!(err.0.len(), 6);
    }
}
