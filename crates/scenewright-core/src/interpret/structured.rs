//! Strict schema-validated scene parser.
//!
//! The request carries a JSON-schema output constraint for the shape
//! `{ "dialogue": [{ "character", "text", "timestamp" }] }`; the response
//! is validated against the same shape here. Any structural violation --
//! missing `dialogue` key, non-list shape, unknown speaker -- fails the
//! whole call. There is no partial acceptance.

use scenewright_types::error::GenerationError;
use scenewright_types::generation::{SceneTurn, add_additional_properties_false};
use scenewright_types::llm::{OutputConfig, OutputFormat, OutputJsonSchema};
use scenewright_types::scene::{DialogueLine, Speaker};

/// Structured-output configuration constraining scene responses to the
/// [`SceneTurn`] schema, with `additionalProperties: false` throughout.
pub fn scene_output_config() -> OutputConfig {
    let schema = schemars::schema_for!(SceneTurn);
    let mut schema_value =
        serde_json::to_value(schema).expect("SceneTurn schema serialization should not fail");
    add_additional_properties_false(&mut schema_value);

    OutputConfig {
        format: OutputFormat {
            type_field: "json_schema".to_string(),
            json_schema: OutputJsonSchema {
                name: "SceneTurn".to_string(),
                schema: schema_value,
                strict: Some(true),
            },
        },
    }
}

/// Parse and validate a schema-mode scene response.
///
/// Every accepted line receives `timestamp` (receipt time); the model's
/// timestamp field is never trusted.
pub fn parse_structured(
    body: &str,
    timestamp: &str,
) -> Result<Vec<DialogueLine>, GenerationError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| GenerationError::Parse(format!("response is not valid JSON: {e}")))?;

    let Some(dialogue) = value.get("dialogue") else {
        return Err(GenerationError::Parse(
            "response is missing the 'dialogue' key".to_string(),
        ));
    };
    let Some(items) = dialogue.as_array() else {
        return Err(GenerationError::Parse(
            "'dialogue' is not a list of line records".to_string(),
        ));
    };

    let mut lines = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Some(record) = item.as_object() else {
            return Err(GenerationError::Parse(format!(
                "dialogue entry {index} is not an object"
            )));
        };
        let label = record
            .get("character")
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                GenerationError::Parse(format!("dialogue entry {index} has no 'character' string"))
            })?;
        let character: Speaker = label
            .parse()
            .map_err(|_| GenerationError::UnknownSpeaker(label.to_string()))?;
        let text = record.get("text").and_then(|t| t.as_str()).ok_or_else(|| {
            GenerationError::Parse(format!("dialogue entry {index} has no 'text' string"))
        })?;

        lines.push(DialogueLine {
            character,
            text: text.trim().to_string(),
            timestamp: timestamp.to_string(),
        });
    }

    Ok(lines)
}
