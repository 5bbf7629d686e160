//! Server configuration types.

/// Which relational backend `DATABASE_URL` points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseKind {
    Postgres,
    Sqlite,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub database_url: String,
    pub database_kind: DatabaseKind,
    pub host: String,
    pub port: u16,
    pub max_connections: u32,
    /// Prefix the whole API is served under, e.g. `/shoppingapi`. Empty means root.
    pub context_path: String,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Absolute path of the item collection, including the context path.
    pub fn items_path(&self) -> String {
        format!("{}/api/items", self.context_path)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            database_url: super::DEFAULT_DATABASE_URL.to_string(),
            database_kind: DatabaseKind::Sqlite,
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_connections: 5,
            context_path: String::new(),
            body_limit_bytes: 64 * 1024,
        }
    }
}
