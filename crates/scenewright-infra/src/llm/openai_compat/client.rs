//! OpenAiCompatProvider -- concrete [`LlmProvider`] implementation for any
//! OpenAI-compatible chat-completions API.
//!
//! Sends requests to `{base_url}/v1/chat/completions` with bearer
//! authentication. The API key is wrapped in [`secrecy::SecretString`]
//! and is never logged or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use scenewright_core::llm::LlmProvider;
use scenewright_types::llm::{
    CompletionRequest, CompletionResponse, LlmError, MessageRole, Usage,
};

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat,
    ResponseJsonSchema,
};

/// OpenAI-compatible chat-completions provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and only exposed when
/// constructing the Authorization header. It never appears in Debug
/// output, Display output, or tracing logs.
pub struct OpenAiCompatProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl OpenAiCompatProvider {
    /// Create a new provider.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key wrapped in SecretString
    /// * `base_url` - Base URL of the API (e.g. "https://api.openai.com")
    /// * `model` - Model identifier (e.g. "gpt-4")
    pub fn new(api_key: SecretString, base_url: String, model: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(300)) // 5 min timeout for long generations
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    /// The default model for this provider.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into the chat wire shape.
    ///
    /// The system prompt travels as a leading system-role message.
    fn to_chat_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        let response_format = request.output_config.as_ref().map(|config| ResponseFormat {
            type_field: config.format.type_field.clone(),
            json_schema: ResponseJsonSchema {
                name: config.format.json_schema.name.clone(),
                schema: config.format.json_schema.schema.clone(),
                strict: config.format.json_schema.strict,
            },
        });

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format,
        }
    }
}

// OpenAiCompatProvider intentionally does NOT derive Debug. The
// SecretString field ensures the API key is never printed, but Debug is
// omitted entirely as well.

impl LlmProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        "openai_compatible"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let body = self.to_chat_request(request);
        let url = self.url("/v1/chat/completions");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.api_key.expose_secret())
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited {
                    retry_after_ms: None,
                },
                400 => LlmError::InvalidRequest(error_body),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let chat_resp: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Deserialization(format!("failed to parse response: {e}")))?;

        let content = chat_resp
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .ok_or_else(|| {
                LlmError::Deserialization("response contains no completion choice".to_string())
            })?;

        Ok(CompletionResponse {
            id: chat_resp.id,
            content,
            model: chat_resp.model,
            usage: Usage {
                input_tokens: chat_resp.usage.prompt_tokens,
                output_tokens: chat_resp.usage.completion_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scenewright_types::llm::{Message, OutputConfig, OutputFormat, OutputJsonSchema};

    fn make_provider() -> OpenAiCompatProvider {
        OpenAiCompatProvider::new(
            SecretString::from("test-key-not-real"),
            "https://api.openai.com/".to_string(),
            "gpt-4".to_string(),
        )
    }

    fn make_request() -> CompletionRequest {
        CompletionRequest {
            model: "gpt-4".to_string(),
            messages: vec![Message {
                role: MessageRole::User,
                content: "Hello".to_string(),
            }],
            system: Some("Be helpful".to_string()),
            max_tokens: 100,
            temperature: Some(0.7),
            output_config: None,
        }
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "openai_compatible");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let provider = make_provider();
        assert_eq!(
            provider.url("/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_system_prompt_becomes_leading_message() {
        let provider = make_provider();
        let chat = provider.to_chat_request(&make_request());
        assert_eq!(chat.messages.len(), 2);
        assert_eq!(chat.messages[0].role, "system");
        assert_eq!(chat.messages[0].content, "Be helpful");
        assert_eq!(chat.messages[1].role, "user");
    }

    #[test]
    fn test_output_config_maps_to_response_format() {
        let provider = make_provider();
        let mut request = make_request();
        request.output_config = Some(OutputConfig {
            format: OutputFormat {
                type_field: "json_schema".to_string(),
                json_schema: OutputJsonSchema {
                    name: "SceneTurn".to_string(),
                    schema: serde_json::json!({"type": "object"}),
                    strict: Some(true),
                },
            },
        });
        let chat = provider.to_chat_request(&request);
        let format = chat.response_format.expect("response_format missing");
        assert_eq!(format.type_field, "json_schema");
        assert_eq!(format.json_schema.name, "SceneTurn");
        assert_eq!(format.json_schema.strict, Some(true));
    }

    #[test]
    fn test_no_output_config_no_response_format() {
        let provider = make_provider();
        let chat = provider.to_chat_request(&make_request());
        assert!(chat.response_format.is_none());
    }
}
