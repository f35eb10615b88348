//! Admin moderation actions on confessions, plus the CSV export.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::types::ConfessionDto;
use crate::db::{Confession, ConfessionFilter};

#[derive(Debug, Serialize)]
pub struct VerifyDto {
    pub verified: bool,
}

/// GET /api/admin/verify — the admin middleware already ran, so reaching
/// this handler is the proof.
pub async fn verify() -> Json<ApiResponse<VerifyDto>> {
    Json(ApiResponse::success(VerifyDto { verified: true }))
}

/// POST /api/admin/confessions/{id}/approve
pub async fn approve(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ConfessionDto>>, ApiError> {
    let id = validation::validate_confession_id(id)?;
    let confession = state.confession_service().approve(id).await?;
    Ok(Json(ApiResponse::success(ConfessionDto::from(confession))))
}

/// POST /api/admin/confessions/{id}/reject
pub async fn reject(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<ConfessionDto>>, ApiError> {
    let id = validation::validate_confession_id(id)?;
    let confession = state.confession_service().reject(id).await?;
    Ok(Json(ApiResponse::success(ConfessionDto::from(confession))))
}

/// DELETE /api/admin/confessions/{id}
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let id = validation::validate_confession_id(id)?;
    state.confession_service().delete(id).await?;
    Ok(Json(ApiResponse::success(true)))
}

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    pub q: Option<String>,
    pub status: Option<String>,
}

/// GET /api/admin/confessions/export.csv
pub async fn export_csv(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let status = query
        .status
        .as_deref()
        .map(validation::parse_status)
        .transpose()?;

    let filter = ConfessionFilter {
        query: query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
        status,
    };

    let confessions = state.confession_service().export(filter).await?;
    let csv = to_csv(&confessions);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"confessions.csv\"",
            ),
        ],
        csv,
    ))
}

fn csv_escape(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn to_csv(rows: &[Confession]) -> String {
    let mut out =
        String::from("id,name,message,likes,dislikes,created_at,status,user_id\n");

    for c in rows {
        let status = match c.status {
            crate::entities::confessions::ConfessionStatus::Approved => "APPROVED",
            crate::entities::confessions::ConfessionStatus::Pending => "PENDING",
            crate::entities::confessions::ConfessionStatus::Rejected => "REJECTED",
        };

        let fields = [
            c.id.to_string(),
            c.name.clone().unwrap_or_default(),
            c.message.clone(),
            c.likes.to_string(),
            c.dislikes.to_string(),
            c.created_at.clone(),
            status.to_string(),
            c.user_id.map(|id| id.to_string()).unwrap_or_default(),
        ];

        let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&line.join(","));
        out.push('\n');
    }

    out
}
