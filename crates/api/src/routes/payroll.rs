//! Payroll routes: generate screen, run storage, run removal.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use getah_db::PayrollRepository;
use getah_db::repositories::payroll::{GenerateRow, PayrollError, StorePayrollInput};
use getah_shared::AppError;

use crate::AppState;
use crate::routes::error_response;

/// Creates the payroll routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/payroll/generate", get(generate_payroll))
        .route("/api/payroll", post(store_payroll))
        .route("/api/payroll/{id}", delete(destroy_payroll))
}

/// Query parameters for the generate screen.
#[derive(Debug, Deserialize)]
pub struct GenerateQuery {
    /// Month (1-12) for the suggested period label.
    pub month: Option<u32>,
    /// Year for the suggested period label.
    pub year: Option<i32>,
}

/// Response for the generate screen.
#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    /// Suggested payroll period label (`YYYY-MM`).
    pub period: String,
    /// Per-employee prefilled rows.
    pub rows: Vec<GenerateRow>,
}

/// GET `/api/payroll/generate` - Prefilled rows for a payroll run.
async fn generate_payroll(
    State(state): State<AppState>,
    Query(query): Query<GenerateQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let month = query.month.unwrap_or_else(|| today.month());
    let year = query.year.unwrap_or_else(|| today.year());

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.generate_rows().await {
        Ok(rows) => (
            StatusCode::OK,
            Json(GenerateResponse {
                period: period_label(month, year),
                rows,
            }),
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, "Failed to build payroll generate rows");
            error_response(&AppError::Database(
                "the payroll rows could not be generated".to_string(),
            ))
        }
    }
}

/// POST `/api/payroll` - Store a payroll run.
///
/// The whole run commits or rolls back as one; a failure leaves no
/// partial payrolls or settlements behind.
async fn store_payroll(
    State(state): State<AppState>,
    Json(payload): Json<StorePayrollInput>,
) -> impl IntoResponse {
    if payload.payroll_period.trim().is_empty() {
        return error_response(&AppError::BusinessRule(
            "payroll_period is required".to_string(),
        ));
    }

    let repo = PayrollRepository::new((*state.db).clone());
    match repo.store_run(payload).await {
        Ok(outcome) => {
            info!(created = outcome.created, "Payroll run stored");
            (StatusCode::CREATED, Json(outcome)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to store payroll run");
            error_response(&AppError::Database(
                "the payroll run could not be stored".to_string(),
            ))
        }
    }
}

/// DELETE `/api/payroll/{id}` - Remove a run and roll back its
/// advance repayments.
async fn destroy_payroll(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = PayrollRepository::new((*state.db).clone());
    match repo.destroy_run(id).await {
        Ok(()) => {
            info!(payroll_id = id, "Payroll run removed");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(PayrollError::NotFound(id)) => {
            error_response(&AppError::NotFound(format!("Payroll {id}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to remove payroll run");
            error_response(&AppError::Database(
                "the payroll run could not be removed".to_string(),
            ))
        }
    }
}

/// Period label in the stored `YYYY-MM` form.
fn period_label(month: u32, year: i32) -> String {
    format!("{year:04}-{month:02}")
}
