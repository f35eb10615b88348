use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, validation};
use crate::api::auth::AuthContext;
use crate::api::types::{ConfessionDto, PaginatedDto};
use crate::constants::limits;
use crate::db::ConfessionFilter;
use crate::entities::confessions::ConfessionStatus;
use crate::services::ConfessionSubmission;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateConfessionRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
    /// Honeypot: real clients never fill this.
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub value: i32,
}

/// Truncated SHA-256 of the client address, the wall's coarse identity for
/// rate-limiting votes and attributing submissions. Proxies put the client
/// first in `X-Forwarded-For`.
#[must_use]
pub fn client_ip_hash(headers: &HeaderMap) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("0.0.0.0");

    let digest = Sha256::digest(ip.as_bytes());
    let hex = digest.iter().fold(String::with_capacity(64), |mut acc, b| {
        use std::fmt::Write;
        let _ = write!(acc, "{b:02x}");
        acc
    });

    hex[..16].to_string()
}

/// Cuts a string to at most `max` characters without splitting a char.
fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// GET /api/confessions
pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ApiResponse<PaginatedDto<ConfessionDto>>>, ApiError> {
    // The public wall shows approved posts unless an explicit filter asks
    // otherwise.
    let status = match query.status.as_deref() {
        Some(raw) => validation::parse_status(raw)?,
        None => ConfessionStatus::Approved,
    };

    let filter = ConfessionFilter {
        query: query.q.map(|q| q.trim().to_string()).filter(|q| !q.is_empty()),
        status: Some(status),
    };

    let page = state
        .confession_service()
        .list(
            filter,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(limits::DEFAULT_PAGE_SIZE),
        )
        .await?;

    Ok(Json(ApiResponse::success(PaginatedDto {
        items: page.items.into_iter().map(ConfessionDto::from).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    })))
}

/// POST /api/confessions
pub async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Extension(AuthContext(user)): Extension<AuthContext>,
    Json(payload): Json<CreateConfessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ConfessionDto>>), ApiError> {
    if !payload.website.is_empty() {
        return Err(ApiError::validation("Spam detected"));
    }

    let submission = ConfessionSubmission {
        name: Some(truncate_chars(&payload.name, limits::MAX_NAME_LEN)),
        message: truncate_chars(&payload.message, limits::MAX_MESSAGE_LEN),
        ip_hash: client_ip_hash(&headers),
        user_id: user.map(|u| u.id),
    };

    let confession = state.confession_service().create(submission).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ConfessionDto::from(confession))),
    ))
}

/// POST /api/confessions/{id}/vote
pub async fn vote(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<ApiResponse<ConfessionDto>>, ApiError> {
    let id = validation::validate_confession_id(id)?;

    if payload.value != 1 && payload.value != -1 {
        return Err(ApiError::validation("Invalid value"));
    }

    let confession = state
        .confession_service()
        .vote(id, payload.value, &client_ip_hash(&headers))
        .await?;

    Ok(Json(ApiResponse::success(ConfessionDto::from(confession))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_ip_hash_is_stable_and_short() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        let a = client_ip_hash(&headers);
        let b = client_ip_hash(&headers);

        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_ip_hash_uses_first_forwarded_address() {
        let mut first = HeaderMap::new();
        first.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );

        let mut bare = HeaderMap::new();
        bare.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_ip_hash(&first), client_ip_hash(&bare));
    }

    #[test]
    fn test_ip_hash_falls_back_without_header() {
        let headers = HeaderMap::new();
        assert_eq!(client_ip_hash(&headers).len(), 16);
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }
}
