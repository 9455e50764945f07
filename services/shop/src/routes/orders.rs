//! Order routes, all authenticated

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    repositories::order::order_total,
};

/// Status assigned to freshly created orders
const INITIAL_STATUS: &str = "new";

/// Create an order from the user's active cart. The total is snapshotted
/// from the cart's items at this moment; the cart is then deactivated.
pub async fn create(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let cart = state
        .carts
        .find_active(auth_user.id)
        .await?
        .ok_or_else(|| ApiError::BadRequest("no active cart".to_string()))?;

    let items = state.carts.items(cart.id).await?;
    if items.is_empty() {
        return Err(ApiError::BadRequest("cart is empty".to_string()));
    }

    let status = state
        .orders
        .find_status_by_name(INITIAL_STATUS)
        .await?
        .ok_or_else(|| {
            ApiError::Unprocessable(format!(
                "order status '{INITIAL_STATUS}' is not configured"
            ))
        })?;

    let total = order_total(&items);
    let order = state
        .orders
        .create(auth_user.id, cart.id, status.id, total)
        .await?;

    Ok((StatusCode::CREATED, Json(order)))
}

/// List the user's orders
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let orders = state.orders.list_for_user(auth_user.id).await?;

    Ok(Json(orders))
}

/// Fetch one of the user's orders
pub async fn get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .orders
        .find_by_id(id)
        .await?
        .filter(|order| order.user_id == auth_user.id)
        .ok_or_else(|| ApiError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}
