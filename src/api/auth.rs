use axum::{
    Json,
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::{LoginDto, UserDto};
use crate::services::{Registration, TokenClaims, auth_service::decode_token};

// ============================================================================
// Request types
// ============================================================================

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Identity attached to the request by [`enrich_auth`] when a valid bearer
/// token is present.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i32,
    pub role: String,
}

/// Always present on enriched routes; `None` for anonymous requests.
#[derive(Debug, Clone)]
pub struct AuthContext(pub Option<CurrentUser>);

// ============================================================================
// Middleware
// ============================================================================

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
}

async fn claims_from_request(state: &AppState, headers: &HeaderMap) -> Option<TokenClaims> {
    let token = bearer_token(headers)?;
    let secret = state.config().read().await.security.jwt_secret.clone();
    decode_token(&secret, token)
}

/// Attaches [`CurrentUser`] when the request carries a valid token. Public
/// routes keep working without one; confession creation uses the identity to
/// record ownership.
pub async fn enrich_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let user = claims_from_request(&state, request.headers())
        .await
        .map(|claims| CurrentUser {
            id: claims.sub,
            role: claims.role,
        });
    request.extensions_mut().insert(AuthContext(user));

    next.run(request).await
}

/// Gate for the admin router: a valid token AND the admin role.
pub async fn require_admin(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(claims) = claims_from_request(&state, request.headers()).await else {
        return Err(ApiError::Unauthorized("Unauthorized".to_string()));
    };

    if !claims.is_admin() {
        tracing::warn!("Admin route denied for user {}", claims.sub);
        return Err(ApiError::Forbidden("Admin role required".to_string()));
    }

    Ok(next.run(request).await)
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(axum::http::StatusCode, Json<ApiResponse<UserDto>>), ApiError> {
    let user = state
        .auth_service()
        .register(Registration {
            name: payload.name,
            email: payload.email,
            password: payload.password,
            password_confirmation: payload.password_confirmation,
        })
        .await?;

    Ok((
        axum::http::StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginDto>>, ApiError> {
    if payload.email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }
    if payload.password.is_empty() {
        return Err(ApiError::validation("Password is required"));
    }

    let result = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginDto {
        user: UserDto::from(result.user),
        token: result.token,
    })))
}
