//! Shopping API: CRUD REST backend for a shopping-item inventory.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{Item, ItemPayload};
pub use routes::{app, common_routes_with_ready, home_routes, item_routes};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, ItemStore, PgItemStore, SqliteItemStore};
