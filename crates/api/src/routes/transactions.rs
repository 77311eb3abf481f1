//! Manual ledger transaction routes.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use chrono::{Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{error, info};

use getah_core::classify::{TrxDirection, TrxSource};
use getah_db::TransactionRepository;
use getah_db::repositories::transaction::{TransactionError, TransactionInput};
use getah_shared::AppError;
use getah_shared::types::PageRequest;

use crate::AppState;
use crate::routes::error_response;

/// Creates the transaction routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/transactions", get(list_transactions))
        .route("/api/transactions", post(create_transaction))
        .route("/api/transactions/{id}", put(update_transaction))
        .route("/api/transactions/{id}", delete(delete_transaction))
}

/// Query parameters for listing transactions.
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    /// Transaction-date month (1-12), defaulting to the current month.
    pub month: Option<u32>,
    /// Transaction-date year, defaulting to the current year.
    pub year: Option<i32>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Page size (default 10, max 100).
    pub per_page: Option<u32>,
}

/// Request body for creating or replacing a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    /// Direction: `income` or `expense`.
    #[serde(rename = "type")]
    pub trx_type: String,
    /// Source: `cash` or `bank`.
    pub source: String,
    /// Business category literal.
    pub category: String,
    /// Monetary amount.
    pub amount: Decimal,
    /// Book date (YYYY-MM-DD).
    pub transaction_date: NaiveDate,
    /// Document code.
    pub transaction_code: String,
    /// Sequence number within the code.
    pub transaction_number: String,
    /// Free-text description.
    pub description: Option<String>,
    /// Debit/credit annotation.
    pub db_cr: Option<String>,
    /// Counterparty name.
    pub counterparty: Option<String>,
}

/// GET `/api/transactions` - Paginated manual ledger list, one calendar
/// month at a time.
async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListTransactionsQuery>,
) -> impl IntoResponse {
    let defaults = PageRequest::default();
    let page = PageRequest {
        page: query.page.unwrap_or(defaults.page),
        per_page: query.per_page.unwrap_or(defaults.per_page).min(100),
    };
    let today = Utc::now().date_naive();
    let month = query.month.unwrap_or_else(|| today.month());
    let year = query.year.unwrap_or_else(|| today.year());

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.list(month, year, &page).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!(error = %e, "Failed to list transactions");
            error_response(&AppError::Database(
                "the transactions could not be listed".to_string(),
            ))
        }
    }
}

/// POST `/api/transactions` - Create a manual ledger row.
async fn create_transaction(
    State(state): State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> impl IntoResponse {
    let input = match validate_payload(payload) {
        Ok(input) => input,
        Err(e) => return error_response(&e),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.create(input).await {
        Ok(row) => {
            info!(transaction_id = row.id, "Transaction created");
            (StatusCode::CREATED, Json(row)).into_response()
        }
        Err(e) => {
            error!(error = %e, "Failed to create transaction");
            error_response(&AppError::Database(
                "the transaction could not be created".to_string(),
            ))
        }
    }
}

/// PUT `/api/transactions/{id}` - Replace a manual ledger row.
async fn update_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionPayload>,
) -> impl IntoResponse {
    let input = match validate_payload(payload) {
        Ok(input) => input,
        Err(e) => return error_response(&e),
    };

    let repo = TransactionRepository::new((*state.db).clone());
    match repo.update(id, input).await {
        Ok(row) => {
            info!(transaction_id = id, "Transaction updated");
            (StatusCode::OK, Json(row)).into_response()
        }
        Err(TransactionError::NotFound(id)) => {
            error_response(&AppError::NotFound(format!("Transaction {id}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to update transaction");
            error_response(&AppError::Database(
                "the transaction could not be updated".to_string(),
            ))
        }
    }
}

/// DELETE `/api/transactions/{id}` - Remove a manual ledger row.
async fn delete_transaction(State(state): State<AppState>, Path(id): Path<i64>) -> impl IntoResponse {
    let repo = TransactionRepository::new((*state.db).clone());
    match repo.delete(id).await {
        Ok(()) => {
            info!(transaction_id = id, "Transaction deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(TransactionError::NotFound(id)) => {
            error_response(&AppError::NotFound(format!("Transaction {id}")))
        }
        Err(e) => {
            error!(error = %e, "Failed to delete transaction");
            error_response(&AppError::Database(
                "the transaction could not be deleted".to_string(),
            ))
        }
    }
}

/// Validates a payload's enum strings and amount, producing repository
/// input.
fn validate_payload(payload: TransactionPayload) -> Result<TransactionInput, AppError> {
    let direction: TrxDirection = payload
        .trx_type
        .parse()
        .map_err(|_| AppError::BusinessRule("type must be income or expense".to_string()))?;
    let source: TrxSource = payload
        .source
        .parse()
        .map_err(|_| AppError::BusinessRule("source must be cash or bank".to_string()))?;
    if payload.amount < Decimal::ZERO {
        return Err(AppError::BusinessRule(
            "amount must not be negative".to_string(),
        ));
    }

    Ok(TransactionInput {
        transaction_code: payload.transaction_code,
        transaction_number: payload.transaction_number,
        transaction_date: payload.transaction_date,
        source,
        direction,
        category: payload.category,
        amount: payload.amount,
        description: payload.description,
        db_cr: payload.db_cr,
        counterparty: payload.counterparty,
    })
}
