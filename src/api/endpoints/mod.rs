//! API endpoint handlers.

pub mod analyze;
pub mod health;

use axum::http::Uri;

use crate::api::error::ApiError;

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
