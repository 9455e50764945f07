//! Order and order status repository for database operations

use anyhow::Result;
use rust_decimal::Decimal;
use sqlx::{PgPool, Row};
use tracing::info;

use crate::models::{CartItemDetail, NewOrderStatus, Order, OrderStatus};

fn order_from_row(row: &sqlx::postgres::PgRow) -> Order {
    Order {
        id: row.get("id"),
        user_id: row.get("user_id"),
        cart_id: row.get("cart_id"),
        status_id: row.get("status_id"),
        total_amount: row.get("total_amount"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const ORDER_COLUMNS: &str =
    "id, user_id, cart_id, status_id, total_amount, created_at, updated_at";

/// Sum quantity times unit price over the cart's items
pub fn order_total(items: &[CartItemDetail]) -> Decimal {
    items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum()
}

/// Order repository, also covering order statuses
#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    /// Create a new order repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create an order snapshotting the cart total, and deactivate the cart
    /// so the user's next get-or-create starts a fresh one. Both writes
    /// happen in one transaction.
    pub async fn create(
        &self,
        user_id: i32,
        cart_id: i32,
        status_id: i32,
        total_amount: Decimal,
    ) -> Result<Order> {
        info!("Creating order for user {} from cart {}", user_id, cart_id);

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO orders (user_id, cart_id, status_id, total_amount)
            VALUES ($1, $2, $3, $4)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(cart_id)
        .bind(status_id)
        .bind(total_amount)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("UPDATE carts SET is_active = FALSE, updated_at = now() WHERE id = $1")
            .bind(cart_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(order_from_row(&row))
    }

    /// Update an order's status. Any existing status is accepted; there is
    /// no transition graph.
    pub async fn set_status(&self, order_id: i32, status_id: i32) -> Result<Option<Order>> {
        info!("Setting order {} status to {}", order_id, status_id);

        let row = sqlx::query(&format!(
            r#"
            UPDATE orders
            SET status_id = $2, updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(status_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| order_from_row(&row)))
    }

    /// Find an order by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<Order>> {
        let row = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| order_from_row(&row)))
    }

    /// List a user's orders
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }

    /// List all orders
    pub async fn list(&self) -> Result<Vec<Order>> {
        let rows = sqlx::query(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }

    /// Delete an order
    pub async fn delete(&self, id: i32) -> Result<bool> {
        info!("Deleting order: {}", id);

        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Create a new order status. Duplicate names surface as a unique
    /// violation.
    pub async fn create_status(&self, new_status: &NewOrderStatus) -> Result<OrderStatus> {
        info!("Creating new order status: {}", new_status.name);

        let row = sqlx::query(
            r#"
            INSERT INTO order_statuses (name)
            VALUES ($1)
            RETURNING id, name
            "#,
        )
        .bind(&new_status.name)
        .fetch_one(&self.pool)
        .await?;

        Ok(OrderStatus {
            id: row.get("id"),
            name: row.get("name"),
        })
    }

    /// Find an order status by name
    pub async fn find_status_by_name(&self, name: &str) -> Result<Option<OrderStatus>> {
        let row = sqlx::query("SELECT id, name FROM order_statuses WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|row| OrderStatus {
            id: row.get("id"),
            name: row.get("name"),
        }))
    }

    /// List all order statuses
    pub async fn list_statuses(&self) -> Result<Vec<OrderStatus>> {
        let rows = sqlx::query("SELECT id, name FROM order_statuses ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| OrderStatus {
                id: row.get("id"),
                name: row.get("name"),
            })
            .collect())
    }

    /// Delete an order status. Fails with a foreign-key violation while any
    /// order still references it; that relation has no cascade.
    pub async fn delete_status(&self, id: i32) -> Result<bool> {
        info!("Deleting order status: {}", id);

        let result = sqlx::query("DELETE FROM order_statuses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn item(price: &str, quantity: i32) -> CartItemDetail {
        CartItemDetail {
            id: 0,
            product_id: 0,
            product_name: "item".to_string(),
            unit_price: Decimal::from_str(price).unwrap(),
            quantity,
            added_at: Utc::now(),
        }
    }

    #[test]
    fn test_order_total_sums_quantity_times_price() {
        let items = vec![item("9.99", 2), item("0.50", 3)];
        assert_eq!(order_total(&items), Decimal::from_str("21.48").unwrap());
    }

    #[test]
    fn test_order_total_of_empty_cart_is_zero() {
        assert_eq!(order_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_order_total_keeps_two_fractional_digits_exact() {
        // 0.1 + 0.2 style drift must not appear with decimal arithmetic.
        let items = vec![item("0.10", 1), item("0.20", 1)];
        assert_eq!(order_total(&items), Decimal::from_str("0.30").unwrap());
    }
}
