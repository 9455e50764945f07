//! Public catalog routes

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{Product, ProductCharacteristicValue},
};

/// A product together with its characteristic values
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub characteristics: Vec<ProductCharacteristicValue>,
}

/// List active products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let products = state.products.list(true).await?;

    Ok(Json(products))
}

/// Fetch one product with its characteristic values
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let product = state
        .products
        .find_by_id(id)
        .await?
        .filter(|product| product.is_active)
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;

    let characteristics = state.products.characteristics_of(id).await?;

    Ok(Json(ProductDetail {
        product,
        characteristics,
    }))
}
