use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState};
use crate::api::types::BadWordDto;

#[derive(Debug, Deserialize)]
pub struct BadWordRequest {
    #[serde(default)]
    pub word: String,
}

/// GET /api/admin/bad-words
pub async fn list(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<BadWordDto>>>, ApiError> {
    let words = state.bad_word_service().list().await?;
    let dtos: Vec<BadWordDto> = words.into_iter().map(BadWordDto::from).collect();
    Ok(Json(ApiResponse::success(dtos)))
}

/// POST /api/admin/bad-words
pub async fn add(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BadWordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BadWordDto>>), ApiError> {
    if payload.word.is_empty() {
        return Err(ApiError::validation("Word is required"));
    }

    let word = state.bad_word_service().add(&payload.word).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(BadWordDto::from(word))),
    ))
}

/// PUT /api/admin/bad-words/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<BadWordRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    if payload.word.is_empty() {
        return Err(ApiError::validation("Word is required"));
    }

    state.bad_word_service().update(id, &payload.word).await?;

    Ok(Json(ApiResponse::success(true)))
}

/// DELETE /api/admin/bad-words/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    state.bad_word_service().delete(id).await?;
    Ok(Json(ApiResponse::success(true)))
}
