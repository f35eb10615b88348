use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::{PageQuery, UserDto};
use crate::constants::limits;
use crate::db::UserUpdate;
use crate::entities::users::UserRole;

#[derive(Debug, Serialize)]
pub struct UserListDto {
    pub items: Vec<UserDto>,
    pub total: u64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
}

/// GET /api/admin/users
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<UserListDto>>, ApiError> {
    let page = state
        .user_service()
        .list(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(limits::DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(Json(ApiResponse::success(UserListDto {
        items: page.items.into_iter().map(UserDto::from).collect(),
        total: page.total,
    })))
}

/// PUT /api/admin/users/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError> {
    let updated = state
        .user_service()
        .update(
            id,
            UserUpdate {
                name: payload.name,
                email: payload.email,
                role: payload.role,
            },
        )
        .await?;

    Ok(Json(ApiResponse::success(UserDto::from(updated))))
}

/// DELETE /api/admin/users/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    state.user_service().delete(id).await?;
    Ok(Json(ApiResponse::success(true)))
}
