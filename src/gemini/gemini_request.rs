use crate::gemini::{GeminiContent, GeminiPart};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a `generateContent` call. Client-supplied `contents` are kept as
/// raw JSON so the conversation is forwarded without reshaping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    pub contents: Value,
}

impl GeminiRequest {
    /// Wrap a bare prompt as a single-turn user conversation.
    pub fn from_prompt(prompt: &str) -> Self {
        let turn = GeminiContent {
            role: "user".to_string(),
            parts: vec![GeminiPart { text: prompt.to_string() }],
        };
        GeminiRequest {
            contents: serde_json::json!([turn]),
        }
    }

    pub fn from_contents(contents: Value) -> Self {
        GeminiRequest { contents }
    }
}
