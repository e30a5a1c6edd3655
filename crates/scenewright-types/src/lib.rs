//! Shared domain types for Scenewright.
//!
//! This crate contains the core domain types used across the Scenewright
//! workspace: characters, scenes, dialogue lines, sessions, generation
//! request/response shapes, LLM types, configuration, and error enums.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror,
//! schemars.

pub mod character;
pub mod config;
pub mod error;
pub mod generation;
pub mod llm;
pub mod scene;
pub mod session;
