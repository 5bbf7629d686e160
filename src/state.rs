//! Shared application state for all routes.

use crate::config::ServerConfig;
use crate::store::ItemStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ItemStore>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>, config: ServerConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }
}
