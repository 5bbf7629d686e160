//! Behaviour when the backing store is unreachable.

mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use common::{body_json, build_test_app_with_store, delete, get, post_json, put_json};
use serde_json::json;
use shopping_api::{AppError, Item, ItemStore, SqliteItemStore};
use std::sync::Arc;

/// Store whose every call fails the way a dead connection pool does.
struct UnavailableStore;

fn unavailable() -> AppError {
    AppError::Db(sqlx::Error::PoolClosed)
}

#[async_trait]
impl ItemStore for UnavailableStore {
    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _id: i64) -> Result<Option<Item>, AppError> {
        Err(unavailable())
    }

    async fn save(&self, _item: Item) -> Result<Item, AppError> {
        Err(unavailable())
    }

    async fn exists_by_id(&self, _id: i64) -> Result<bool, AppError> {
        Err(unavailable())
    }

    async fn delete_by_id(&self, _id: i64) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        Err(unavailable())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unavailable())
    }
}

fn internal_error_body() -> serde_json::Value {
    json!({"error": {"code": "internal_error", "message": "internal server error"}})
}

#[tokio::test]
async fn ready_reports_degraded_when_store_is_down() {
    let app = build_test_app_with_store(Arc::new(UnavailableStore));
    let response = get(&app, "/ready").await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        body_json(response).await,
        json!({"status": "degraded", "database": "unavailable"})
    );

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn item_endpoints_return_generic_500() {
    let app = build_test_app_with_store(Arc::new(UnavailableStore));

    let response = get(&app, "/api/items").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());

    let response = get(&app, "/api/items/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());

    let response = post_json(&app, "/api/items", json!({"name": "Widget", "price": 9.99})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());

    let response = put_json(&app, "/api/items/1", json!({"name": "Widget", "price": 9.99})).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());

    let response = delete(&app, "/api/items/1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());
}

#[tokio::test]
async fn validation_runs_before_the_store_is_touched() {
    let app = build_test_app_with_store(Arc::new(UnavailableStore));
    let response = post_json(&app, "/api/items", json!({"name": "Widget", "price": 0})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"]["code"], "validation_error");
}

#[tokio::test]
async fn closed_pool_surfaces_as_500_and_503() {
    let store = SqliteItemStore::in_memory().await.expect("in-memory store");
    let pool = store.pool().clone();
    let app = build_test_app_with_store(Arc::new(store));
    pool.close().await;

    let response = get(&app, "/api/items").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await, internal_error_body());

    assert_eq!(
        get(&app, "/ready").await.status(),
        StatusCode::SERVICE_UNAVAILABLE
    );
}
