use serde::{Deserialize, Serialize};

// Text-only; inline data and function parts are not proxied here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}
