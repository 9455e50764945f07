//! Favorite repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::Favorite;

fn favorite_from_row(row: &sqlx::postgres::PgRow) -> Favorite {
    Favorite {
        id: row.get("id"),
        user_id: row.get("user_id"),
        product_id: row.get("product_id"),
        added_at: row.get("added_at"),
    }
}

/// Favorite repository
#[derive(Clone)]
pub struct FavoriteRepository {
    pool: PgPool,
}

impl FavoriteRepository {
    /// Create a new favorite repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Add a product to a user's favorites. Adding an existing favorite is
    /// a no-op; the (user_id, product_id) unique constraint absorbs it. The
    /// returned flag is true when a new row was created.
    pub async fn add(&self, user_id: i32, product_id: i32) -> Result<(Favorite, bool)> {
        info!("Adding favorite {} for user {}", product_id, user_id);

        let result = sqlx::query(
            r#"
            INSERT INTO favorites (user_id, product_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, product_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .execute(&self.pool)
        .await?;

        let created = result.rows_affected() > 0;

        let row = sqlx::query(
            r#"
            SELECT id, user_id, product_id, added_at
            FROM favorites
            WHERE user_id = $1 AND product_id = $2
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;

        Ok((favorite_from_row(&row), created))
    }

    /// Remove a product from a user's favorites
    pub async fn remove(&self, user_id: i32, product_id: i32) -> Result<bool> {
        info!("Removing favorite {} for user {}", product_id, user_id);

        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND product_id = $2")
            .bind(user_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// List a user's favorites
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Favorite>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, product_id, added_at
            FROM favorites
            WHERE user_id = $1
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(favorite_from_row).collect())
    }
}
