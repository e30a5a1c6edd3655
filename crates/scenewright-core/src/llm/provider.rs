//! LlmProvider trait definition.
//!
//! The abstraction every LLM backend implements. Uses RPITIT (native
//! async fn in traits, Rust 2024 edition); implementations live in
//! scenewright-infra (e.g. `OpenAiCompatProvider`).

use scenewright_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM completion backends.
///
/// Generation consumes whole completions only; there is no streaming
/// surface.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "openai_compatible").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
