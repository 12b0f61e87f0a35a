//! Shared helpers for integration tests: an app on the memory backend plus request helpers.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use quakezone_api::{app, AppState, Backend, MemoryStore, Settings};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub fn test_settings() -> Settings {
    Settings {
        backend: Backend::Memory,
        host: "127.0.0.1".into(),
        port: 0,
        ..Settings::default()
    }
}

/// Full router over an empty in-memory store.
pub fn build_test_app() -> Router {
    let state = AppState::new(Arc::new(MemoryStore::new()));
    app(state, &test_settings())
}

/// Percent-encode a JSON query value.
pub fn encode(v: &Value) -> String {
    let raw = v.to_string();
    let mut out = String::with_capacity(raw.len() * 3);
    for b in raw.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            _ => out.push_str(&format!("%{:02X}", b)),
        }
    }
    out
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

/// POST and return the assigned id.
pub async fn create(app: &Router, uri: &str, body: Value) -> String {
    let (status, json) = post(app, uri, body).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", json);
    json["id"].as_str().unwrap().to_string()
}
