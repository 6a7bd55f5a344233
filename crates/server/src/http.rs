//! HTTP Endpoints
//!
//! Chat endpoint for the web page, a small read-only lead API, and the
//! operational endpoints.

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use sales_assistant_agent::AssistantError;
use sales_assistant_core::Intent;

use crate::metrics::{metrics_handler, record_error, record_request};
use crate::state::AppState;
use crate::ServerError;

/// Origin allowed when none are configured
const DEFAULT_ORIGIN: &str = "http://localhost:5000";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let config = state.get_config();
    let cors_layer = build_cors_layer(&config.server.cors_origins, config.server.cors_enabled);
    let static_dir = ServeDir::new(&config.server.static_dir);
    drop(config);

    Router::new()
        // Chat
        .route("/chat", post(chat))
        // Lead API
        .route("/api/leads", get(list_leads))
        .route("/api/leads/:key", get(get_lead))
        .route("/api/leads/:key/:field", get(get_lead_field))
        // Health check
        .route("/health", get(health_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        // Admin
        .route("/admin/reload-config", post(reload_config))
        // Chat page
        .fallback_service(static_dir)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If no configured origin parses, allows only the local chat page
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    if parsed_origins.is_empty() {
        tracing::info!("No valid CORS origins configured, defaulting to {}", DEFAULT_ORIGIN);
        return CorsLayer::new()
            .allow_origin(HeaderValue::from_static(DEFAULT_ORIGIN))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
    }

    tracing::info!("CORS configured with {} origins", parsed_origins.len());
    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let status: StatusCode = self.into();
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Chat response
#[derive(Debug, Serialize)]
struct ChatResponse {
    response: String,
}

/// Chat endpoint
///
/// The body must be a JSON object with a `message`. A missing, null or
/// falsy `message` (or a body that is not JSON) is a 400. Any other
/// non-string `message` gets the invalid-input reply.
async fn chat(
    State(state): State<AppState>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let message = body
        .ok()
        .and_then(|Json(mut value)| value.get_mut("message").map(serde_json::Value::take))
        .filter(is_truthy);

    let assistant = state.assistant();
    let (text, intent, error) = match message {
        Some(serde_json::Value::String(message)) => {
            let reply = assistant.respond(&message);
            let error = reply.error.filter(|_| reply.is_fault());
            (reply.text, reply.intent, error)
        }
        Some(other) => {
            tracing::debug!(kind = json_kind(&other), "Chat message is not text");
            (assistant.error_text(&AssistantError::InvalidInput), Intent::Unknown, None)
        }
        None => {
            tracing::warn!("Chat request without a message");
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({ "error": "No message received" })),
            )
                .into_response();
        }
    };

    record_request(intent);
    if let Some(kind) = error {
        record_error(kind);
    }

    Json(ChatResponse { response: text }).into_response()
}

/// JSON truthiness: null, false, zero and empty values are falsy
fn is_truthy(value: &serde_json::Value) -> bool {
    use serde_json::Value;
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// List leads
async fn list_leads(State(state): State<AppState>) -> Json<serde_json::Value> {
    let leads: Vec<serde_json::Value> = state
        .store
        .iter()
        .map(|lead| {
            serde_json::json!({
                "key": lead.key,
                "display_name": lead.display_name,
                "status": lead.status,
            })
        })
        .collect();

    Json(serde_json::json!({
        "count": leads.len(),
        "leads": leads,
    }))
}

/// Full summary of one lead
async fn get_lead(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, ServerError> {
    let response = state.assistant().lead_summary(&key)?;
    Ok(Json(serde_json::json!({
        "key": key,
        "response": response,
    })))
}

/// One field of one lead
async fn get_lead_field(
    State(state): State<AppState>,
    Path((key, field)): Path<(String, String)>,
) -> Result<Response, ServerError> {
    let assistant = state.assistant();
    let (status, response) = match assistant.lead_field(&key, &field) {
        Ok(response) => (StatusCode::OK, response),
        Err(err @ AssistantError::NoFieldMatch { .. }) => {
            (StatusCode::NOT_FOUND, assistant.error_text(&err))
        }
        Err(err) => return Err(err.into()),
    };

    Ok((
        status,
        Json(serde_json::json!({
            "key": key,
            "field": field,
            "response": response,
        })),
    )
        .into_response())
}

/// Health check
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "leads": state.store.len(),
    }))
}

/// Config reload endpoint
///
/// POST /admin/reload-config
async fn reload_config(State(state): State<AppState>) -> impl IntoResponse {
    match state.reload_config() {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "status": "success",
                "message": "Configuration reloaded successfully"
            })),
        ),
        Err(e) => {
            tracing::error!("Config reload failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "status": "error",
                    "message": e.to_string()
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use sales_assistant_config::{LeadsConfig, ReplyFormat, Settings};

    fn test_state() -> AppState {
        let store = Arc::new(LeadsConfig::bundled().unwrap().into_store().unwrap());
        let mut settings = Settings::default();
        settings.assistant.reply_format = ReplyFormat::Plain;
        settings.assistant.examples.enabled = false;
        AppState::new(settings, store)
    }

    async fn send(request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = create_router(test_state()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_chat() {
        let (status, body) = send(post_chat(r#"{"message": "What's the status of Beta Solutions?"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "The status for Beta Solutions is: Negotiation");
    }

    #[tokio::test]
    async fn test_chat_whitespace_message_gets_prompt() {
        let (status, body) = send(post_chat(r#"{"message": "   "}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "Please provide some input.");
    }

    #[tokio::test]
    async fn test_chat_rejects_missing_message() {
        let payloads = [
            r#"{}"#,
            r#"{"message": ""}"#,
            r#"{"message": null}"#,
            r#"{"message": false}"#,
            r#"{"message": 0}"#,
            r#"{"message": []}"#,
            "not json",
        ];
        for payload in payloads {
            let (status, body) = send(post_chat(payload)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert_eq!(body["error"], "No message received");
        }
    }

    #[tokio::test]
    async fn test_chat_non_text_message_gets_prompt() {
        for payload in [r#"{"message": 42}"#, r#"{"message": true}"#, r#"{"message": ["hi"]}"#] {
            let (status, body) = send(post_chat(payload)).await;
            assert_eq!(status, StatusCode::OK, "{payload}");
            assert_eq!(body["response"], "Please provide some input.");
        }
    }

    #[tokio::test]
    async fn test_list_leads() {
        let (status, body) = send(get("/api/leads")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 8);
        assert_eq!(body["leads"][0]["key"], "alpha_corp");
        assert_eq!(body["leads"][0]["status"], "Prospecting");
    }

    #[tokio::test]
    async fn test_get_lead() {
        let (status, body) = send(get("/api/leads/gamma_tech")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["response"]
            .as_str()
            .unwrap()
            .starts_with("Found info for 'Gamma Tech':"));

        let (status, _) = send(get("/api/leads/initech")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_lead_field() {
        let (status, body) = send(get("/api/leads/alpha_corp/contact")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["response"], "The contact person for Alpha Corp is: John Doe");

        let (status, body) = send(get("/api/leads/alpha_corp/budget")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["response"], "I don't have a 'budget' field for Alpha Corp.");

        let (status, _) = send(get("/api/leads/initech/contact")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["leads"], 8);
    }
}
