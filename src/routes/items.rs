//! Item collection routes under `/api/items`, open to any origin.

use crate::handlers::items::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

pub fn item_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/items", get(list).post(create))
        .route(
            "/api/items/:id",
            get(read).put(update).delete(delete_handler),
        )
        .layer(cors)
        .with_state(state)
}
