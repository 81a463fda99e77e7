use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use chatrelay::api::{build_router, AppState};
use chatrelay::config::RelayConfig;
use chatrelay::errors::RelayError;
use chatrelay::llm::{ChatMessage, ChatProvider};
use chatrelay::orchestrator::{Orchestrator, FALLBACK_MESSAGE};

struct StubProvider {
    name: &'static str,
    reply: Option<&'static str>,
    configured: bool,
}

#[async_trait]
impl ChatProvider for StubProvider {
    async fn chat(
        &self,
        _message: &str,
        _context: &[ChatMessage],
        _image: Option<&str>,
        _timeout: Duration,
    ) -> Result<String, RelayError> {
        match self.reply {
            Some(text) => Ok(text.to_string()),
            None => Err(RelayError::Api("stub failure".into())),
        }
    }

    fn name(&self) -> &str {
        self.name
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

fn app_with(providers: Vec<StubProvider>) -> axum::Router {
    let providers: Vec<Arc<dyn ChatProvider>> =
        providers.into_iter().map(|p| Arc::new(p) as Arc<dyn ChatProvider>).collect();
    let config = RelayConfig {
        request_timeout: Duration::from_millis(500),
        race_timeout: Duration::from_millis(200),
        ..Default::default()
    };
    let state = AppState {
        orchestrator: Arc::new(Orchestrator::new(providers, &config)),
    };
    build_router(state)
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = app_with(vec![]);
    let response = app.oneshot(make_request("GET", "/api/health", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "chatrelay");
}

#[tokio::test]
async fn test_chat_returns_text_and_provider() {
    let app = app_with(vec![StubProvider { name: "one", reply: Some("hello!"), configured: true }]);
    let req = make_request("POST", "/api/chat", Some(json!({
        "message": "Hi",
        "context": [{"role": "user", "content": "earlier"}]
    })));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["response"], "hello!");
    assert_eq!(body["provider"], "one");
}

#[tokio::test]
async fn test_chat_empty_message_rejected() {
    let app = app_with(vec![StubProvider { name: "one", reply: Some("x"), configured: true }]);
    let req = make_request("POST", "/api/chat", Some(json!({"message": "   "})));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("must not be empty"));
}

#[tokio::test]
async fn test_chat_total_failure_is_200_with_fallback_text() {
    let app = app_with(vec![
        StubProvider { name: "one", reply: None, configured: true },
        StubProvider { name: "two", reply: None, configured: true },
    ]);
    let req = make_request("POST", "/api/chat", Some(json!({"message": "Hi"})));
    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["response"], FALLBACK_MESSAGE);
    assert!(body.get("provider").is_none());
}

#[tokio::test]
async fn test_chat_falls_back_to_second_provider() {
    let app = app_with(vec![
        StubProvider { name: "one", reply: None, configured: true },
        StubProvider { name: "two", reply: Some("from two"), configured: true },
    ]);
    let req = make_request("POST", "/api/chat", Some(json!({"message": "Hi"})));
    let response = app.oneshot(req).await.unwrap();

    let body = response_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["provider"], "two");
}

#[tokio::test]
async fn test_chat_respects_order_override() {
    let app = app_with(vec![
        StubProvider { name: "one", reply: Some("from one"), configured: true },
        StubProvider { name: "two", reply: Some("from two"), configured: true },
    ]);
    let req = make_request("POST", "/api/chat", Some(json!({
        "message": "Hi",
        "provider_order": ["two", "one"]
    })));
    let response = app.oneshot(req).await.unwrap();

    let body = response_json(response).await;
    assert_eq!(body["provider"], "two");
}

#[tokio::test]
async fn test_providers_listing() {
    let app = app_with(vec![
        StubProvider { name: "one", reply: Some("x"), configured: true },
        StubProvider { name: "two", reply: Some("x"), configured: false },
    ]);
    let response = app.oneshot(make_request("GET", "/api/providers", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["name"], "one");
    assert_eq!(providers[0]["configured"], true);
    assert_eq!(providers[1]["configured"], false);
    assert_eq!(providers[1]["supports_vision"], false);
}
