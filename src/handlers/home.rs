//! Service root banner.

use crate::state::AppState;
use axum::extract::State;

/// Plain-text pointer at the item collection.
pub async fn home(State(state): State<AppState>) -> String {
    banner(&state.config.items_path())
}

pub fn banner(items_path: &str) -> String {
    format!("Shopping API is running. Try GET {}", items_path)
}
