//! Order and order status models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Order status entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderStatus {
    pub id: i32,
    pub name: String,
}

/// New order status creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrderStatus {
    pub name: String,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub cart_id: i32,
    pub status_id: i32,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload updating an order's status. Any existing status id is accepted;
/// no transition graph is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetOrderStatus {
    pub status_id: i32,
}
