//! Cart repository for database operations

use anyhow::Result;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{Cart, CartItem, CartItemDetail};

fn cart_from_row(row: &sqlx::postgres::PgRow) -> Cart {
    Cart {
        id: row.get("id"),
        user_id: row.get("user_id"),
        is_active: row.get("is_active"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const CART_COLUMNS: &str = "id, user_id, is_active, created_at, updated_at";

/// Cart repository
#[derive(Clone)]
pub struct CartRepository {
    pool: PgPool,
}

impl CartRepository {
    /// Create a new cart repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the user's active cart, if any
    pub async fn find_active(&self, user_id: i32) -> Result<Option<Cart>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {CART_COLUMNS}
            FROM carts
            WHERE user_id = $1 AND is_active
            ORDER BY id
            LIMIT 1
            "#
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| cart_from_row(&row)))
    }

    /// Fetch the user's active cart, creating one if none exists
    pub async fn get_or_create_active(&self, user_id: i32) -> Result<Cart> {
        if let Some(cart) = self.find_active(user_id).await? {
            return Ok(cart);
        }

        info!("Creating active cart for user: {}", user_id);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO carts (user_id)
            VALUES ($1)
            RETURNING {CART_COLUMNS}
            "#
        ))
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(cart_from_row(&row))
    }

    /// Find a cart by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Cart>> {
        let row = sqlx::query(&format!("SELECT {CART_COLUMNS} FROM carts WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| cart_from_row(&row)))
    }

    /// Set the quantity of a product in a cart. A positive quantity inserts
    /// or updates the item; zero removes it.
    pub async fn set_item(&self, cart_id: i32, product_id: i32, quantity: i32) -> Result<()> {
        if quantity == 0 {
            self.remove_item(cart_id, product_id).await?;
            return Ok(());
        }

        info!(
            "Setting cart {} item {} quantity to {}",
            cart_id, product_id, quantity
        );

        let updated = sqlx::query(
            r#"
            UPDATE cart_items
            SET quantity = $3
            WHERE cart_id = $1 AND product_id = $2
            "#,
        )
        .bind(cart_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            sqlx::query(
                r#"
                INSERT INTO cart_items (cart_id, product_id, quantity)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(cart_id)
            .bind(product_id)
            .bind(quantity)
            .execute(&self.pool)
            .await?;
        }

        sqlx::query("UPDATE carts SET updated_at = now() WHERE id = $1")
            .bind(cart_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Remove a product from a cart
    pub async fn remove_item(&self, cart_id: i32, product_id: i32) -> Result<bool> {
        info!("Removing product {} from cart {}", product_id, cart_id);

        let result = sqlx::query("DELETE FROM cart_items WHERE cart_id = $1 AND product_id = $2")
            .bind(cart_id)
            .bind(product_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Fetch the items of a cart, joined with product name and unit price
    pub async fn items(&self, cart_id: i32) -> Result<Vec<CartItemDetail>> {
        let rows = sqlx::query(
            r#"
            SELECT ci.id, ci.product_id, p.name AS product_name,
                   p.price AS unit_price, ci.quantity, ci.added_at
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.cart_id = $1
            ORDER BY ci.id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CartItemDetail {
                id: row.get("id"),
                product_id: row.get("product_id"),
                product_name: row.get("product_name"),
                unit_price: row.get("unit_price"),
                quantity: row.get("quantity"),
                added_at: row.get("added_at"),
            })
            .collect())
    }

    /// List all carts
    pub async fn list(&self) -> Result<Vec<Cart>> {
        let rows = sqlx::query(&format!("SELECT {CART_COLUMNS} FROM carts ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(cart_from_row).collect())
    }

    /// List the raw cart item rows of a cart
    pub async fn list_items(&self, cart_id: i32) -> Result<Vec<CartItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, cart_id, product_id, quantity, added_at
            FROM cart_items
            WHERE cart_id = $1
            ORDER BY id
            "#,
        )
        .bind(cart_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| CartItem {
                id: row.get("id"),
                cart_id: row.get("cart_id"),
                product_id: row.get("product_id"),
                quantity: row.get("quantity"),
                added_at: row.get("added_at"),
            })
            .collect())
    }

    /// Delete a cart. Its items cascade.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        info!("Deleting cart: {}", id);

        let result = sqlx::query("DELETE FROM carts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
