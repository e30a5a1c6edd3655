//! OpenTelemetry GenAI Semantic Convention attribute constants.
//!
//! These follow the OTel GenAI Semantic Conventions specification for
//! consistent LLM call instrumentation across the codebase. All constants
//! are string slices usable in `tracing::span!` and `tracing::info_span!`
//! field names.
//!
//! Span naming convention: `"{operation} {model}"` (e.g., `"generate_dialogue gpt-4"`)

// --- Required attributes ---

/// The name of the operation being performed.
pub const GEN_AI_OPERATION_NAME: &str = "gen_ai.operation.name";

/// The name of the GenAI provider (e.g., "openai_compatible").
pub const GEN_AI_PROVIDER_NAME: &str = "gen_ai.provider.name";

// --- Recommended attributes ---

/// The model ID requested (e.g., "gpt-4").
pub const GEN_AI_REQUEST_MODEL: &str = "gen_ai.request.model";

/// The sampling temperature for the request.
pub const GEN_AI_REQUEST_TEMPERATURE: &str = "gen_ai.request.temperature";

/// The maximum number of output tokens requested.
pub const GEN_AI_REQUEST_MAX_TOKENS: &str = "gen_ai.request.max_tokens";

/// The number of input tokens consumed.
pub const GEN_AI_USAGE_INPUT_TOKENS: &str = "gen_ai.usage.input_tokens";

/// The number of output tokens generated.
pub const GEN_AI_USAGE_OUTPUT_TOKENS: &str = "gen_ai.usage.output_tokens";

/// The unique response/message ID from the provider.
pub const GEN_AI_RESPONSE_ID: &str = "gen_ai.response.id";

// --- Operation name values ---

/// Single-line dialogue generation.
pub const OP_GENERATE_DIALOGUE: &str = "generate_dialogue";

/// Scene-batch generation.
pub const OP_GENERATE_SCENE: &str = "generate_scene";

// --- Provider name values ---

/// OpenAI-compatible provider identifier.
pub const PROVIDER_OPENAI_COMPAT: &str = "openai_compatible";
