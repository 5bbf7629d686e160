//! SQLite item store; the default backend and the one tests run against.

use super::{ItemStore, ITEMS_TABLE};
use crate::error::AppError;
use crate::model::Item;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::time::Duration;

/// SQLite-backed store. A `sqlite::memory:` pool must be limited to a single
/// connection, each connection otherwise opens its own empty database.
#[derive(Clone)]
pub struct SqliteItemStore {
    pool: SqlitePool,
}

impl SqliteItemStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteItemStore { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Single-connection in-memory store with the schema already created.
    pub async fn in_memory() -> Result<Self, AppError> {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
            .connect("sqlite::memory:")
            .await?;
        let store = SqliteItemStore::new(pool);
        store.ensure_schema().await?;
        Ok(store)
    }
}

#[async_trait]
impl ItemStore for SqliteItemStore {
    async fn find_all(&self) -> Result<Vec<Item>, AppError> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT id, name, price FROM {} ORDER BY id",
            ITEMS_TABLE
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Item>, AppError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT id, name, price FROM {} WHERE id = ?1",
            ITEMS_TABLE
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn save(&self, item: Item) -> Result<Item, AppError> {
        let saved = match item.id {
            None => {
                sqlx::query_as::<_, Item>(&format!(
                    "INSERT INTO {} (name, price) VALUES (?1, ?2) RETURNING id, name, price",
                    ITEMS_TABLE
                ))
                .bind(&item.name)
                .bind(item.price)
                .fetch_one(&self.pool)
                .await?
            }
            Some(id) => {
                sqlx::query_as::<_, Item>(&format!(
                    r#"
                    INSERT INTO {} (id, name, price) VALUES (?1, ?2, ?3)
                    ON CONFLICT (id) DO UPDATE SET name = excluded.name, price = excluded.price
                    RETURNING id, name, price
                    "#,
                    ITEMS_TABLE
                ))
                .bind(id)
                .bind(&item.name)
                .bind(item.price)
                .fetch_one(&self.pool)
                .await?
            }
        };
        Ok(saved)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, AppError> {
        let exists: (i64,) = sqlx::query_as(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1)",
            ITEMS_TABLE
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0 != 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = ?1", ITEMS_TABLE))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                price REAL NOT NULL CHECK (price > 0)
            )
            "#,
            ITEMS_TABLE
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
