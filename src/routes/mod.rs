//! Router assembly.

mod common;
mod items;

pub use common::common_routes_with_ready;
pub use items::item_routes;

use crate::handlers::home::home;
use crate::state::AppState;
use axum::{routing::get, Router};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// GET / banner.
pub fn home_routes(state: AppState) -> Router {
    Router::new().route("/", get(home)).with_state(state)
}

/// Full application: root banner, operational routes and the item collection,
/// served under the configured context path.
pub fn app(state: AppState) -> Router {
    let context_path = state.config.context_path.clone();
    let body_limit = state.config.body_limit_bytes;

    let api = Router::new()
        .merge(home_routes(state.clone()))
        .merge(common_routes_with_ready(state.clone()))
        .merge(item_routes(state));

    let app = if context_path.is_empty() {
        api
    } else {
        Router::new().nest(&context_path, api)
    };

    app.layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TraceLayer::new_for_http())
}
