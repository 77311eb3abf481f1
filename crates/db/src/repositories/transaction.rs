//! Transaction repository for the manual financial ledger.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
};

use getah_core::classify::{TrxDirection, TrxSource};
use getah_core::period::{Period, ReportRange};
use getah_shared::types::{PageRequest, PageResponse};

use crate::entities::financial_transactions;

/// Error types for manual-ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Transaction not found.
    #[error("Transaction not found: {0}")]
    NotFound(i64),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Input for creating or replacing a manual ledger row.
///
/// Source and direction arrive already parsed; string validation is the
/// API layer's job.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    /// Document code, e.g. a voucher prefix.
    pub transaction_code: String,
    /// Sequence number within the code.
    pub transaction_number: String,
    /// Book date of the entry.
    pub transaction_date: NaiveDate,
    /// Cash till or bank account.
    pub source: TrxSource,
    /// Income or expense.
    pub direction: TrxDirection,
    /// Business category literal.
    pub category: String,
    /// Monetary amount.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
    /// Debit/credit annotation carried from the books.
    pub db_cr: Option<String>,
    /// Counterparty name.
    pub counterparty: Option<String>,
}

/// Repository for manual financial transactions.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists one calendar month of ledger rows, newest first.
    ///
    /// The month window comes from the same resolver the reports use, so
    /// an out-of-range month yields an empty page rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the count or fetch query fails.
    pub async fn list(
        &self,
        month: u32,
        year: i32,
        page: &PageRequest,
    ) -> Result<PageResponse<financial_transactions::Model>, TransactionError> {
        let window =
            ReportRange::SpecificMonth { month, year }.resolve(Utc::now().date_naive());

        let total = Self::in_window(&window).count(&self.db).await?;

        let rows = Self::in_window(&window)
            .order_by_desc(financial_transactions::Column::TransactionDate)
            // Id breaks date ties so pages stay stable between requests.
            .order_by_desc(financial_transactions::Column::Id)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await?;

        Ok(PageResponse::new(rows, page.page, page.per_page, total))
    }

    /// Inserts a new ledger row.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: TransactionInput,
    ) -> Result<financial_transactions::Model, TransactionError> {
        let now = Utc::now().into();

        let row = financial_transactions::ActiveModel {
            transaction_code: Set(input.transaction_code),
            transaction_number: Set(input.transaction_number),
            transaction_date: Set(input.transaction_date),
            trx_type: Set(input.direction.as_str().to_string()),
            source: Set(input.source.as_str().to_string()),
            category: Set(input.category),
            amount: Set(input.amount),
            description: Set(input.description),
            db_cr: Set(input.db_cr),
            counterparty: Set(input.counterparty),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(row.insert(&self.db).await?)
    }

    /// Replaces an existing ledger row.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NotFound`] if the id does not exist.
    pub async fn update(
        &self,
        id: i64,
        input: TransactionInput,
    ) -> Result<financial_transactions::Model, TransactionError> {
        let existing = financial_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        let mut row: financial_transactions::ActiveModel = existing.into();
        row.transaction_code = Set(input.transaction_code);
        row.transaction_number = Set(input.transaction_number);
        row.transaction_date = Set(input.transaction_date);
        row.trx_type = Set(input.direction.as_str().to_string());
        row.source = Set(input.source.as_str().to_string());
        row.category = Set(input.category);
        row.amount = Set(input.amount);
        row.description = Set(input.description);
        row.db_cr = Set(input.db_cr);
        row.counterparty = Set(input.counterparty);
        row.updated_at = Set(Utc::now().into());

        Ok(row.update(&self.db).await?)
    }

    /// Deletes a ledger row.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError::NotFound`] if the id does not exist.
    pub async fn delete(&self, id: i64) -> Result<(), TransactionError> {
        let existing = financial_transactions::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(TransactionError::NotFound(id))?;

        existing.delete(&self.db).await?;
        Ok(())
    }

    fn in_window(window: &Period) -> Select<financial_transactions::Entity> {
        let mut query = financial_transactions::Entity::find();
        if let Some(start) = window.start {
            query = query.filter(financial_transactions::Column::TransactionDate.gte(start));
        }
        if let Some(end) = window.end {
            query = query.filter(financial_transactions::Column::TransactionDate.lte(end));
        }
        query
    }
}
