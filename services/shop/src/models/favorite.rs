//! Favorite model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Favorite entity; (user_id, product_id) is unique
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: i32,
    pub user_id: i32,
    pub product_id: i32,
    pub added_at: DateTime<Utc>,
}
