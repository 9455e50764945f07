//! Cart and cart item models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Cart entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Cart {
    pub id: i32,
    pub user_id: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Cart item entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItem {
    pub id: i32,
    pub cart_id: i32,
    pub product_id: i32,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Cart item joined with product name and unit price
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CartItemDetail {
    pub id: i32,
    pub product_id: i32,
    pub product_name: String,
    pub unit_price: Decimal,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Payload setting the quantity of a product in the cart.
/// A quantity of zero removes the item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetCartItem {
    pub product_id: i32,
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_cart_item_deserializes() {
        let payload: SetCartItem =
            serde_json::from_str(r#"{"product_id": 7, "quantity": 2}"#).unwrap();
        assert_eq!(payload.product_id, 7);
        assert_eq!(payload.quantity, 2);
    }
}
