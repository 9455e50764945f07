//! Authentication middleware for session token validation

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{AppState, error::ApiError};

/// Authenticated user information resolved from a session token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i32,
    pub role: String,
}

fn authenticate(state: &AppState, req: &Request<Body>) -> Result<AuthUser, ApiError> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.sessions.verify(token).map_err(|e| {
        warn!("Session token rejected: {}", e);
        ApiError::Unauthorized
    })?;

    Ok(AuthUser {
        id: claims.sub,
        role: claims.role,
    })
}

/// Middleware requiring a valid session token
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &req)?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Middleware requiring a valid session token for a user with the admin role
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let user = authenticate(&state, &req)?;

    if user.role != "admin" {
        return Err(ApiError::Forbidden);
    }

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
