#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use superlists_api::config::{ServerConfig, StoreBackend};
use superlists_api::router::build_app_router;
use superlists_api::state::AppState;
use superlists_core::item_text::ItemTextPolicy;
use superlists_db::store::TodoStore;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses the in-memory store, the default item-text policy and a 30-second
/// request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        request_timeout_secs: 30,
        item_text_policy: ItemTextPolicy::RejectBlank,
        store: StoreBackend::Memory,
        database_url: None,
        db_max_connections: 5,
    }
}

/// Build the full application router over `store` with all middleware layers.
pub fn build_test_app(store: Arc<dyn TodoStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<dyn TodoStore>, config: ServerConfig) -> Router {
    build_app_router(AppState::new(store, config))
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// POST a single `item_text` field as an urlencoded form.
pub async fn post_item(app: Router, uri: &str, item_text: &str) -> Response {
    let body = format!("item_text={}", urlencode(item_text));
    post_form(app, uri, body).await
}

pub async fn post_form(app: Router, uri: &str, body: String) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("response should carry a Location header")
        .to_str()
        .unwrap()
        .to_string()
}

/// Minimal `application/x-www-form-urlencoded` encoder for test payloads.
fn urlencode(raw: &str) -> String {
    let mut out = String::new();
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'*' => {
                out.push(byte as char)
            }
            b' ' => out.push('+'),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
