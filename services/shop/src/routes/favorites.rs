//! Favorites routes, all authenticated

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
};

/// List the user's favorites
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let favorites = state.favorites.list_for_user(auth_user.id).await?;

    Ok(Json(favorites))
}

/// Add a product to the user's favorites. A fresh favorite answers 201;
/// re-adding an existing one is a no-op answering 200.
pub async fn add(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(product_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let (favorite, created) = state.favorites.add(auth_user.id, product_id).await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(favorite)))
}

/// Remove a product from the user's favorites
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(product_id): Path<i32>,
) -> ApiResult<impl IntoResponse> {
    let removed = state.favorites.remove(auth_user.id, product_id).await?;
    if !removed {
        return Err(ApiError::NotFound(format!("favorite {product_id}")));
    }

    Ok(Json(json!({"message": "favorite removed"})))
}
