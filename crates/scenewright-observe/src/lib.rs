//! Observability for Scenewright: tracing-subscriber initialization and
//! OTel GenAI semantic-convention attribute constants.

pub mod genai_attrs;
pub mod tracing_setup;
