//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the
//! application.

pub mod kasbon;
pub mod payroll;
pub mod report;
pub mod transaction;

pub use kasbon::{KasbonError, KasbonRepository, SettlementOutcome};
pub use payroll::{
    GenerateRow, PayrollError, PayrollRepository, StoreEntry, StoreOutcome, StorePayrollInput,
};
pub use report::{ReportError, ReportRepository};
pub use transaction::{TransactionError, TransactionInput, TransactionRepository};

use chrono::NaiveDate;
use sea_orm::prelude::DateTimeWithTimeZone;

/// Effective date of a kasbon row: the explicit transaction date when
/// one was recorded, otherwise the creation date. Every period filter
/// and settlement order goes through this rule.
pub(crate) fn kasbon_effective_date(
    transaction_date: Option<NaiveDate>,
    created_at: DateTimeWithTimeZone,
) -> NaiveDate {
    transaction_date.unwrap_or_else(|| created_at.date_naive())
}
