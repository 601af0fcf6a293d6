pub mod gemini_content;
pub mod gemini_part;
pub mod gemini_request;

pub use gemini_content::GeminiContent;
pub use gemini_part::GeminiPart;
pub use gemini_request::GeminiRequest;
