//! Load `ServerConfig` from the process environment (after `.env`).

use crate::config::types::{DatabaseKind, ServerConfig};
use crate::error::ConfigError;
use std::str::FromStr;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://shopping.db?mode=rwc";

impl ServerConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys take their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ServerConfig::default();
        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let database_kind = database_kind(&database_url)?;
        Ok(ServerConfig {
            database_kind,
            database_url,
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_var(&lookup, "PORT", defaults.port)?,
            max_connections: parse_var(&lookup, "DB_MAX_CONNECTIONS", defaults.max_connections)?,
            context_path: lookup("CONTEXT_PATH")
                .map(|p| normalize_context_path(&p))
                .unwrap_or(defaults.context_path),
            body_limit_bytes: parse_var(&lookup, "BODY_LIMIT_BYTES", defaults.body_limit_bytes)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, var: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            reason: format!("'{}': {}", raw, e),
        }),
    }
}

/// Select the store backend from the url scheme.
pub fn database_kind(url: &str) -> Result<DatabaseKind, ConfigError> {
    let scheme = url.split(':').next().unwrap_or("");
    match scheme {
        "postgres" | "postgresql" => Ok(DatabaseKind::Postgres),
        "sqlite" => Ok(DatabaseKind::Sqlite),
        _ => Err(ConfigError::UnsupportedDatabase(scheme.to_string())),
    }
}

/// `shoppingapi/` and `/shoppingapi` both become `/shoppingapi`; `/` becomes empty.
pub fn normalize_context_path(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}
