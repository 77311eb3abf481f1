//! API route definitions.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;

use getah_shared::AppError;

use crate::AppState;

pub mod health;
pub mod payroll;
pub mod reports;
pub mod transactions;

/// Creates the API router with all routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(transactions::routes())
        .merge(payroll::routes())
}

/// Renders an [`AppError`] as the standard JSON error envelope.
pub(crate) fn error_response(error: &AppError) -> Response {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(json!({
            "error": error.error_code(),
            "message": error.to_string()
        })),
    )
        .into_response()
}
