//! Business logic and port definitions for Scenewright.
//!
//! This crate defines the "ports" (the `SessionStore` and `LlmProvider`
//! traits) that the infrastructure layer implements, plus the pure core:
//! prompt construction, response interpretation, the generation service,
//! the export formatter, and session defaults/validation. It depends only
//! on `scenewright-types` -- never on `scenewright-infra` or any
//! database/HTTP crate.

pub mod export;
pub mod generate;
pub mod interpret;
pub mod llm;
pub mod prompt;
pub mod session;
pub mod store;
