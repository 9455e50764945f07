//! Product and characteristic models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Product entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// New product creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Product update payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_active: Option<bool>,
}

/// Characteristic entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Characteristic {
    pub id: i32,
    pub name: String,
}

/// New characteristic creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCharacteristic {
    pub name: String,
}

/// Join row linking a product to a characteristic with a value
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductCharacteristic {
    pub id: i32,
    pub product_id: i32,
    pub characteristic_id: i32,
    pub value: String,
}

/// Payload attaching a characteristic value to a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttachCharacteristic {
    pub characteristic_id: i32,
    pub value: String,
}

/// Characteristic value resolved with its name, as returned on product reads
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProductCharacteristicValue {
    pub characteristic_id: i32,
    pub name: String,
    pub value: String,
}
