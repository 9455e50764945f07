//! Administrative CRUD routes, enumerated per entity
//!
//! Everything here sits behind the admin middleware. Deletions follow the
//! schema's cascade rules; deleting an order status still referenced by an
//! order fails with a conflict.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{
        AttachCharacteristic, NewCharacteristic, NewOrderStatus, NewProduct, NewRole, NewUser,
        SetOrderStatus, UpdateProduct, UserResponse,
    },
};

// ---- roles ----

pub async fn list_roles(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.roles.list().await?))
}

pub async fn create_role(
    State(state): State<AppState>,
    Json(payload): Json<NewRole>,
) -> ApiResult<impl IntoResponse> {
    let role = state.roles.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(role)))
}

pub async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.roles.delete(id).await? {
        return Err(ApiError::NotFound(format!("role {id}")));
    }

    Ok(Json(json!({"message": "role deleted"})))
}

// ---- users ----

pub async fn list_users(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let users = state.users.list().await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<AppState>,
    Json(payload): Json<NewUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state.users.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.users.delete(id).await? {
        return Err(ApiError::NotFound(format!("user {id}")));
    }

    Ok(Json(json!({"message": "user deleted"})))
}

pub async fn list_user_favorites(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.favorites.list_for_user(id).await?))
}

// ---- products ----

pub async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    // Admin sees inactive products too.
    Ok(Json(state.products.list(false).await?))
}

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<NewProduct>,
) -> ApiResult<impl IntoResponse> {
    let product = state.products.create(&payload).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateProduct>,
) -> ApiResult<impl IntoResponse> {
    let product = state
        .products
        .update(id, &payload)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

pub async fn deactivate_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let product = state
        .products
        .deactivate(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("product {id}")))?;

    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.products.delete(id).await? {
        return Err(ApiError::NotFound(format!("product {id}")));
    }

    Ok(Json(json!({"message": "product deleted"})))
}

pub async fn attach_characteristic(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<AttachCharacteristic>,
) -> ApiResult<impl IntoResponse> {
    let link = state.products.attach_characteristic(id, &payload).await?;

    Ok((StatusCode::CREATED, Json(link)))
}

// ---- characteristics ----

pub async fn list_characteristics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.products.list_characteristics().await?))
}

pub async fn create_characteristic(
    State(state): State<AppState>,
    Json(payload): Json<NewCharacteristic>,
) -> ApiResult<impl IntoResponse> {
    let characteristic = state.products.create_characteristic(&payload).await?;

    Ok((StatusCode::CREATED, Json(characteristic)))
}

pub async fn delete_characteristic(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.products.delete_characteristic(id).await? {
        return Err(ApiError::NotFound(format!("characteristic {id}")));
    }

    Ok(Json(json!({"message": "characteristic deleted"})))
}

// ---- carts ----

pub async fn list_carts(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.carts.list().await?))
}

pub async fn delete_cart(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.carts.delete(id).await? {
        return Err(ApiError::NotFound(format!("cart {id}")));
    }

    Ok(Json(json!({"message": "cart deleted"})))
}

pub async fn list_cart_items(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    state
        .carts
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("cart {id}")))?;

    Ok(Json(state.carts.list_items(id).await?))
}

// ---- order statuses ----

pub async fn list_order_statuses(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.orders.list_statuses().await?))
}

pub async fn create_order_status(
    State(state): State<AppState>,
    Json(payload): Json<NewOrderStatus>,
) -> ApiResult<impl IntoResponse> {
    let status = state.orders.create_status(&payload).await?;

    Ok((StatusCode::CREATED, Json(status)))
}

pub async fn delete_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.orders.delete_status(id).await? {
        return Err(ApiError::NotFound(format!("order status {id}")));
    }

    Ok(Json(json!({"message": "order status deleted"})))
}

// ---- orders ----

pub async fn list_orders(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.orders.list().await?))
}

pub async fn set_order_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<SetOrderStatus>,
) -> ApiResult<impl IntoResponse> {
    let order = state
        .orders
        .set_status(id, payload.status_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("order {id}")))?;

    Ok(Json(order))
}

pub async fn delete_order(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    if !state.orders.delete(id).await? {
        return Err(ApiError::NotFound(format!("order {id}")));
    }

    Ok(Json(json!({"message": "order deleted"})))
}
