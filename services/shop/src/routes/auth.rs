//! Authentication routes: register, login, current user

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    middleware::AuthUser,
    models::{LoginCredentials, NewUser, UserResponse},
    validation,
};

/// Role assigned to self-registered users
const DEFAULT_ROLE: &str = "customer";

/// Request for user registration
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Response for a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Register a new user with the default customer role
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    validation::validate_username(&payload.username).map_err(ApiError::BadRequest)?;
    validation::validate_email(&payload.email).map_err(ApiError::BadRequest)?;
    validation::validate_password(&payload.password).map_err(ApiError::BadRequest)?;

    let role = state
        .roles
        .find_by_name(DEFAULT_ROLE)
        .await?
        .ok_or_else(|| {
            ApiError::Unprocessable(format!("role '{DEFAULT_ROLE}' is not configured"))
        })?;

    let new_user = NewUser {
        username: payload.username,
        email: payload.email,
        password: payload.password,
        role_id: role.id,
    };

    let user = state.users.create(&new_user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// Log a user in by email and password, issuing a session token
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginCredentials>,
) -> ApiResult<impl IntoResponse> {
    info!("Login attempt for email: {}", payload.email);

    // Unknown email and wrong password produce the same answer.
    let user = state
        .users
        .find_by_email(&payload.email)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    let valid = state.users.verify_password(&user, &payload.password)?;
    if !valid {
        return Err(ApiError::Unauthorized);
    }

    let role = state
        .roles
        .find_by_id(user.role_id)
        .await?
        .ok_or(ApiError::InternalServerError)?;

    let token = state.sessions.issue(user.id, &role.name).map_err(|e| {
        tracing::error!("Failed to issue session token: {}", e);
        ApiError::InternalServerError
    })?;

    let response = LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.sessions.ttl(),
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Return the authenticated user, the user-loader contract over HTTP
pub async fn me(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<impl IntoResponse> {
    let user = state
        .users
        .find_by_id(auth_user.id)
        .await?
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(UserResponse::from(user)))
}
