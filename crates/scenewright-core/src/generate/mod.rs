//! Dialogue generation orchestration.

pub mod service;

pub use service::GenerationService;
