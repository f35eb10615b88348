use serde::{Deserialize, Serialize};

use crate::db::{BadWord, Confession, User};
use crate::entities::confessions::ConfessionStatus;
use crate::entities::users::UserRole;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Confession as clients see it. The ip hash and embedding never leave the
/// server.
#[derive(Debug, Serialize, Clone)]
pub struct ConfessionDto {
    pub id: i32,
    pub name: Option<String>,
    pub message: String,
    pub likes: i32,
    pub dislikes: i32,
    pub created_at: String,
    pub status: ConfessionStatus,
    pub user_id: Option<i32>,
}

impl From<Confession> for ConfessionDto {
    fn from(c: Confession) -> Self {
        Self {
            id: c.id,
            name: c.name,
            message: c.message,
            likes: c.likes,
            dislikes: c.dislikes,
            created_at: c.created_at,
            status: c.status,
            user_id: c.user_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PaginatedDto<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[derive(Debug, Serialize, Clone)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            name: u.name,
            email: u.email,
            role: u.role,
            created_at: u.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BadWordDto {
    pub id: i32,
    pub word: String,
    pub created_at: String,
}

impl From<BadWord> for BadWordDto {
    fn from(w: BadWord) -> Self {
        Self {
            id: w.id,
            word: w.word,
            created_at: w.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginDto {
    pub user: UserDto,
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
}
