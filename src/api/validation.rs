use super::ApiError;
use crate::entities::confessions::ConfessionStatus;

pub fn validate_confession_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid confession ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

/// Parses the `status` query parameter; the frontend sends uppercase but we
/// accept any casing.
pub fn parse_status(raw: &str) -> Result<ConfessionStatus, ApiError> {
    match raw.to_uppercase().as_str() {
        "APPROVED" => Ok(ConfessionStatus::Approved),
        "PENDING" => Ok(ConfessionStatus::Pending),
        "REJECTED" => Ok(ConfessionStatus::Rejected),
        other => Err(ApiError::validation(format!(
            "Invalid status: {}. Expected APPROVED, PENDING, or REJECTED",
            other
        ))),
    }
}
