//! PostgreSQL item store.

use super::{ItemStore, ITEMS_TABLE};
use crate::error::AppError;
use crate::model::Item;
use async_trait::async_trait;
use sqlx::PgPool;

#[derive(Clone)]
pub struct PgItemStore {
    pool: PgPool,
}

impl PgItemStore {
    pub fn new(pool: PgPool) -> Self {
        PgItemStore { pool }
    }
}

#[async_trait]
impl ItemStore for PgItemStore {
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
            "SELECT id, name, price FROM {} WHERE id = $1",
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
                    "INSERT INTO {} (name, price) VALUES ($1, $2) RETURNING id, name, price",
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
                    INSERT INTO {} (id, name, price) VALUES ($1, $2, $3)
                    ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, price = EXCLUDED.price
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
        let exists: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)",
            ITEMS_TABLE
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists.0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), AppError> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", ITEMS_TABLE))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), AppError> {
        let ddl = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                price DOUBLE PRECISION NOT NULL CHECK (price > 0)
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
