//! Item collection handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::extractors::ItemJson;
use crate::model::{Item, ItemPayload};
use crate::response::created_at;
use crate::service::ItemValidator;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

fn parse_id(path: Result<Path<i64>, PathRejection>) -> Result<i64, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::BadRequest("invalid id".into()))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Item>>, AppError> {
    let items = state.store.find_all().await?;
    tracing::debug!(count = items.len(), "listed items");
    Ok(Json(items))
}

pub async fn read(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(id)?;
    let item = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
    Ok(Json(item))
}

pub async fn create(
    State(state): State<AppState>,
    ItemJson(body): ItemJson<ItemPayload>,
) -> Result<impl IntoResponse, AppError> {
    let item = ItemValidator::validate(body)?;
    let saved = state.store.save(item).await?;
    let id = saved.id.unwrap_or_default();
    tracing::info!(id, name = %saved.name, "item created");
    let location = format!("{}/{}", state.config.items_path(), id);
    Ok(created_at(&location, saved))
}

pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    ItemJson(body): ItemJson<ItemPayload>,
) -> Result<Json<Item>, AppError> {
    let id = parse_id(id)?;
    let changes = ItemValidator::validate(body)?;
    let mut existing = state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("item {}", id)))?;
    existing.name = changes.name;
    existing.price = changes.price;
    let saved = state.store.save(existing).await?;
    tracing::info!(id, "item updated");
    Ok(Json(saved))
}

pub async fn delete(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(id)?;
    if !state.store.exists_by_id(id).await? {
        return Err(AppError::NotFound(format!("item {}", id)));
    }
    state.store.delete_by_id(id).await?;
    tracing::info!(id, "item deleted");
    Ok(StatusCode::NO_CONTENT)
}
