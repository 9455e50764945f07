//! Shopping cart routes, all authenticated

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::json;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{Cart, CartItemDetail, SetCartItem},
    repositories::order::order_total,
};

/// The user's active cart with its items and running total
#[derive(Debug, Serialize)]
pub struct CartResponse {
    #[serde(flatten)]
    pub cart: Cart,
    pub items: Vec<CartItemDetail>,
    pub total: Decimal,
}

/// Fetch the active cart, creating one on first use
pub async fn get_cart(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let cart = state.carts.get_or_create_active(auth_user.id).await?;
    let items = state.carts.items(cart.id).await?;
    let total = order_total(&items);

    Ok(Json(CartResponse { cart, items, total }))
}

/// Set the quantity of a product in the active cart. Quantity zero removes
/// the item; negative quantities are rejected before reaching storage.
pub async fn set_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<SetCartItem>,
) -> ApiResult<impl IntoResponse> {
    if payload.quantity < 0 {
        return Err(ApiError::BadRequest(
            "quantity must not be negative".to_string(),
        ));
    }

    let cart = state.carts.get_or_create_active(auth_user.id).await?;
    state
        .carts
        .set_item(cart.id, payload.product_id, payload.quantity)
        .await?;

    let items = state.carts.items(cart.id).await?;
    let total = order_total(&items);

    Ok(Json(CartResponse { cart, items, total }))
}

/// Remove a product from the active cart
pub async fn remove_item(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(product_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let cart = state
        .carts
        .find_active(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("active cart".to_string()))?;

    let removed = state.carts.remove_item(cart.id, product_id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!(
            "product {product_id} in cart"
        )));
    }

    Ok((StatusCode::OK, Json(json!({"message": "item removed"}))))
}
