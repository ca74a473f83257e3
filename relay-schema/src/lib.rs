pub mod anthropic;
pub mod gemini;
pub mod relay;

pub use anthropic::{AnthropicErrorBody, MessagesRequest, MessagesResponse};
pub use gemini::{GeminiErrorBody, GeminiGenerateContentRequest, GeminiResponseBody};
pub use relay::{
    AuditRequest, ConfigResponse, ErrorDetail, ModelType, NarrativeRequest, TextResponse,
    TokenResponse,
};
