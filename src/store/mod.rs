//! Item persistence: the `ItemStore` repository trait and its PostgreSQL and
//! SQLite implementations. Both run parameterized SQL against a connection pool.

mod postgres;
mod sqlite;

pub use postgres::PgItemStore;
pub use sqlite::SqliteItemStore;

use crate::config::{DatabaseKind, ServerConfig};
use crate::error::{AppError, ConfigError};
use crate::model::Item;
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::ConnectOptions;
use std::str::FromStr;
use std::sync::Arc;

/// Table holding all items.
pub const ITEMS_TABLE: &str = "items";

#[async_trait]
pub trait ItemStore: Send + Sync {
    /// All items ordered by id. Empty when none exist.
    async fn find_all(&self) -> Result<Vec<Item>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, AppError>;

    /// Insert when `item.id` is `None` (a fresh id is assigned), otherwise
    /// overwrite the record at that id. Returns the persisted record.
    async fn save(&self, item: Item) -> Result<Item, AppError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError>;

    /// Remove the record. Deleting an absent id is a no-op.
    async fn delete_by_id(&self, id: i64) -> Result<(), AppError>;

    /// Create the items table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// One round trip to the backend, for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Open a pool for the configured backend and make sure the items table exists.
pub async fn connect(config: &ServerConfig) -> Result<Arc<dyn ItemStore>, AppError> {
    let store: Arc<dyn ItemStore> = match config.database_kind {
        DatabaseKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            Arc::new(PgItemStore::new(pool)) as Arc<dyn ItemStore>
        }
        DatabaseKind::Sqlite => {
            let pool = sqlx::sqlite::SqlitePoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            Arc::new(SqliteItemStore::new(pool)) as Arc<dyn ItemStore>
        }
    };
    store.ensure_schema().await?;
    tracing::info!(backend = ?config.database_kind, "item store ready");
    Ok(store)
}

/// Ensure the PostgreSQL database in `database_url` exists; create it if not.
/// Connects to the default `postgres` database to run CREATE DATABASE.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin, db_name)) = admin_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Connect options for the `postgres` maintenance database plus the target
/// database name. `None` when the url names no database or names `postgres`.
fn admin_options(database_url: &str) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts =
        PgConnectOptions::from_str(database_url).map_err(|e| invalid_url(e.to_string()))?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn invalid_url(reason: String) -> AppError {
    AppError::Config(ConfigError::InvalidVar {
        var: "DATABASE_URL",
        reason,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_options_target_postgres_database() {
        let (admin, name) =
            admin_options("postgres://app:secret@db:5432/shopping?sslmode=disable")
                .unwrap()
                .unwrap();
        assert_eq!(name, "shopping");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db");
        assert_eq!(admin.get_port(), 5432);
        assert_eq!(admin.get_username(), "app");
    }

    #[test]
    fn slash_in_query_does_not_move_database_name() {
        let (admin, name) =
            admin_options("postgres://app@db:5432/shopping?sslrootcert=/etc/ssl/ca.pem")
                .unwrap()
                .unwrap();
        assert_eq!(name, "shopping");
        assert_eq!(admin.get_database(), Some("postgres"));
        assert_eq!(admin.get_host(), "db");
    }

    #[test]
    fn url_without_database_skips_creation() {
        if std::env::var_os("PGDATABASE").is_some() {
            return;
        }
        assert!(admin_options("postgres://app@db:5432").unwrap().is_none());
        assert!(admin_options("postgres://app@db:5432/postgres")
            .unwrap()
            .is_none());
    }

    #[test]
    fn malformed_url_is_a_config_error() {
        let err = admin_options("postgres://app@db:notaport/shopping").unwrap_err();
        assert!(matches!(
            err,
            AppError::Config(ConfigError::InvalidVar { var: "DATABASE_URL", .. })
        ));
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_ident("shop\"ping"), "\"shop\"\"ping\"");
    }
}
