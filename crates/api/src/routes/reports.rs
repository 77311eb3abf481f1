//! Financial report routes.
//!
//! The report endpoint is a read path and degrades instead of failing:
//! malformed filter input resolves to a default window, never a 4xx.
//! Only a storage failure surfaces as an error.

use std::str::FromStr;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use getah_core::period::ReportRange;
use getah_core::report::{ChartPoint, FinancialReport, ReportService};
use getah_db::ReportRepository;
use getah_shared::AppError;

use crate::AppState;
use crate::routes::error_response;

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/reports/financial", get(get_financial_report))
}

/// Query parameters for the financial report.
///
/// Everything is accepted as raw text so a bad value degrades to the
/// default filter instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct FinancialReportQuery {
    /// Time-period mode.
    pub time_period: Option<String>,
    /// Month (1-12) for `specific-month`.
    pub month: Option<String>,
    /// Calendar year for `specific-month`.
    pub year: Option<String>,
}

/// Echo of the filter the report was actually computed with.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FilterEcho {
    /// Resolved time-period mode.
    pub time_period: &'static str,
    /// Month, present only for `specific-month`.
    pub month: Option<u32>,
    /// Year, present only for `specific-month`.
    pub year: Option<i32>,
}

/// Response for the financial report endpoint.
#[derive(Debug, Serialize)]
pub struct FinancialReportResponse {
    /// Resolved filter echo.
    pub filter: FilterEcho,
    /// Period report plus cumulative balance sheet.
    pub report: FinancialReport,
    /// Income/expense time series for the same window.
    pub chart: Vec<ChartPoint>,
}

/// GET `/api/reports/financial` - Full financial report for a window.
#[axum::debug_handler]
async fn get_financial_report(
    State(state): State<AppState>,
    Query(query): Query<FinancialReportQuery>,
) -> impl IntoResponse {
    let today = chrono::Utc::now().date_naive();
    let range = ReportRange::from_request(
        query.time_period.as_deref(),
        parse_lenient(query.month.as_deref()),
        parse_lenient(query.year.as_deref()),
        today,
    );
    let period = range.resolve(today);

    let report_repo = ReportRepository::new((*state.db).clone());
    let snapshot = match report_repo.fetch_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!(error = %e, "Failed to load ledger snapshot");
            return error_response(&AppError::Database(
                "the report could not be generated".to_string(),
            ));
        }
    };

    let response = FinancialReportResponse {
        filter: filter_echo(range),
        report: ReportService::financial_report(&snapshot, &period),
        chart: ReportService::chart_series(&snapshot, &period),
    };

    (StatusCode::OK, Json(response)).into_response()
}

/// Parses an optional numeric filter value, treating anything
/// unreadable as absent.
fn parse_lenient<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|raw| raw.trim().parse().ok())
}

/// Builds the filter echo for a resolved range.
fn filter_echo(range: ReportRange) -> FilterEcho {
    match range {
        ReportRange::SpecificMonth { month, year } => FilterEcho {
            time_period: range.mode(),
            month: Some(month),
            year: Some(year),
        },
        ReportRange::ThisMonth | ReportRange::ThisYear | ReportRange::AllTime => FilterEcho {
            time_period: range.mode(),
            month: None,
            year: None,
        },
    }
}
