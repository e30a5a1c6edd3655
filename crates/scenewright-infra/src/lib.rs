//! Infrastructure layer for Scenewright.
//!
//! Contains implementations of the ports defined in `scenewright-core`:
//! the SQLite session store, the OpenAI-compatible LLM provider client,
//! and configuration/data-directory loading.

pub mod config;
pub mod llm;
pub mod sqlite;
