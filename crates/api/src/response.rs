//! Shared response envelope types for API handlers.
//!
//! Successful list and action responses carry `"success": true` next to
//! their payload. Failures are rendered by [`crate::error::AppError`].

use serde::Serialize;

/// `{ "success": true, "message": ... }`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

impl MessageResponse {
    pub fn ok(message: &'static str) -> Self {
        Self {
            success: true,
            message,
        }
    }
}
