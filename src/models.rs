use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inbound proxy request. Clients send either a bare `prompt` string or a
/// full Gemini-shaped `contents` conversation; both are accepted and
/// normalized before forwarding. Unknown fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse { error: message.into() }
    }
}
