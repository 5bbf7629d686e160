#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use shopping_api::{app, AppState, ItemStore, ServerConfig, SqliteItemStore};
use std::sync::Arc;
use tower::ServiceExt;

/// Full router over a fresh in-memory SQLite store.
pub async fn build_test_app() -> Router {
    build_test_app_with(ServerConfig::default()).await
}

pub async fn build_test_app_with(config: ServerConfig) -> Router {
    let store = SqliteItemStore::in_memory()
        .await
        .expect("in-memory store");
    app(AppState::new(Arc::new(store), config))
}

/// Full router over an arbitrary store, e.g. one whose backend is down.
pub fn build_test_app_with_store(store: Arc<dyn ItemStore>) -> Router {
    app(AppState::new(store, ServerConfig::default()))
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body.to_string()).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body.to_string()).await
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: String) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap(),
    )
    .await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("json body")
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).expect("utf-8 body")
}
