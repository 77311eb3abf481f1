//! Financial report aggregation.
//!
//! Pure functions that turn an immutable ledger snapshot plus a resolved
//! [`crate::period::Period`] into the report structure the presenter
//! renders: bank ledger, cash ledger, profit and loss, the cumulative
//! balance-sheet snapshot, and the chart time series.

pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use service::ReportService;
pub use types::*;
