use crate::config::Config;
use crate::gemini::GeminiRequest;
use crate::gemini_client::GeminiClient;
use crate::models::{ErrorResponse, GenerateRequest};
use crate::request_id::{RequestId, inject_request_id};
use axum::{
    Extension, Json, Router,
    extract::State,
    http::{Method, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub gemini_client: Arc<GeminiClient>,
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(state: AppState) -> Router {
    let mut app = Router::new()
        .route("/api/gemini", post(generate).options(preflight))
        .route("/health", get(|| async { "OK" }))
        .method_not_allowed_fallback(method_not_allowed)
        .layer(axum::middleware::from_fn(inject_request_id));

    if state.config.cors {
        app = app.layer(cors_layer());
    }

    app.with_state(state)
}

// CORS preflight; must answer before any validation runs.
pub async fn preflight() -> impl IntoResponse {
    StatusCode::OK
}

pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method Not Allowed")),
    )
}

#[axum_macros::debug_handler]
pub async fn generate(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    // Credential outranks request validity: without a key every POST is a 500.
    let api_key = match state.config.api_key.as_deref() {
        Some(key) => key,
        None => {
            warn!("GEMINI_API_KEY is not configured");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Missing GEMINI_API_KEY")),
            )
                .into_response();
        }
    };

    // `contents` wins when both shapes are present; a bare prompt is wrapped
    // as a single user turn.
    let body = match request.contents {
        Some(contents) => {
            if contents_is_empty(&contents) {
                info!("Rejecting request with empty contents");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Missing contents")),
                )
                    .into_response();
            }
            GeminiRequest::from_contents(contents)
        }
        None => match request.prompt.as_deref() {
            Some(prompt) if !prompt.is_empty() => GeminiRequest::from_prompt(prompt),
            _ => {
                info!("Rejecting request with no prompt");
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("Missing prompt")),
                )
                    .into_response();
            }
        },
    };

    let response = match state
        .gemini_client
        .generate_content(&state.config, api_key, &body, &request_id)
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Failed to send request to Gemini: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error calling Gemini")),
            )
                .into_response();
        }
    };

    let upstream_status = response.status();
    let response_json: Value = match response.json().await {
        Ok(resp) => resp,
        Err(e) => {
            warn!("Failed to parse Gemini response: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Server error calling Gemini")),
            )
                .into_response();
        }
    };

    debug!(
        "raw response ({}): {:?}",
        upstream_status,
        serde_json::to_string(&response_json)
    );

    // Mirror the upstream status and relay the body untouched.
    let status = StatusCode::from_u16(upstream_status.as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response_json)).into_response()
}

fn contents_is_empty(contents: &Value) -> bool {
    match contents {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}
