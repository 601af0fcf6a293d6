use crate::config::Config;
use crate::gemini::GeminiRequest;
use crate::request_id::RequestId;
use reqwest::header::HeaderValue;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Debug)]
pub struct GeminiClient {
    http_client: Arc<reqwest::Client>,
}

impl GeminiClient {
    pub fn new(http_client: Arc<reqwest::Client>) -> Self {
        Self { http_client }
    }

    fn build_target_url(config: &Config) -> String {
        let api_base = &config.api_base;
        let path = format!("models/{}:generateContent", config.model);
        if api_base.ends_with('/') {
            format!("{}{}", api_base, path)
        } else {
            format!("{}/{}", api_base, path)
        }
    }

    /// Issue the one outbound call for a proxied request. The caller must
    /// have checked that the credential is present.
    pub fn generate_content(
        &self,
        config: &Config,
        api_key: &str,
        body: &GeminiRequest,
        request_id: &RequestId,
    ) -> impl Future<Output = Result<reqwest::Response, reqwest::Error>> {
        let target_url = Self::build_target_url(config);
        info!("Forwarding request to: {}", target_url);
        debug!(
            "request body: {}",
            serde_json::to_string(body).unwrap_or_else(|_| "<unserializable>".to_string())
        );

        // Gemini takes the API key as a query parameter, not an auth header.
        // Keep it out of the logged URL above.
        let mut target_request = self
            .http_client
            .post(format!("{}?key={}", target_url, api_key))
            .header("Content-Type", "application/json");

        // Propagate request id upstream
        if let Ok(val) = HeaderValue::from_str(&request_id.0) {
            target_request = target_request.header("x-request-id", val);
        }

        target_request.json(body).send()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_target_url() {
        let config = Config {
            api_base: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash".to_string(),
            ..Config::default()
        };
        assert_eq!(
            GeminiClient::build_target_url(&config),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_build_target_url_trailing_slash() {
        let config = Config {
            api_base: "http://localhost:8080/".to_string(),
            model: "gemini-2.5-flash-lite".to_string(),
            ..Config::default()
        };
        assert_eq!(
            GeminiClient::build_target_url(&config),
            "http://localhost:8080/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[tokio::test]
    async fn test_generate_content_sends_key_and_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gemini-2.0-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded("key".into(), "test-key".into()))
            .match_header("content-type", "application/json")
            .match_header("x-request-id", "req-1")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[]}"#)
            .create_async()
            .await;

        let config = Config {
            api_base: server.url(),
            ..Config::default()
        };
        let client = GeminiClient::new(Arc::new(reqwest::Client::new()));
        let body = GeminiRequest::from_prompt("hello");
        let response = client
            .generate_content(&config, "test-key", &body, &RequestId("req-1".to_string()))
            .await
            .expect("request failed");

        assert_eq!(response.status(), 200);
        mock.assert_async().await;
    }
}
