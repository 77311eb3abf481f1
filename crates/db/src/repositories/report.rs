//! Report repository: loads the ledger snapshot the aggregator runs on.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QuerySelect, TransactionTrait};
use tracing::warn;

use getah_core::classify::{TrxDirection, TrxSource};
use getah_core::report::{
    KasbonOwner, KasbonRow, LedgerSnapshot, PayrollRow, StockInRow, StockOutRow, TrxRow,
};

use crate::entities::{
    financial_transactions, incoming_stocks, kasbon_payments, kasbons, outgoing_stocks, payrolls,
};

use super::kasbon_effective_date;

/// Error types for report data access.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

/// Repository that assembles the immutable ledger snapshot.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    db: DatabaseConnection,
}

impl ReportRepository {
    /// Creates a new report repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Loads all five ledgers plus the repayment total.
    ///
    /// Every select runs inside one read transaction, so the period
    /// sections and the cumulative balance sheet of a single report call
    /// are computed from the same state. Rows are unfiltered; the
    /// aggregator applies the period in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub async fn fetch_snapshot(&self) -> Result<LedgerSnapshot, ReportError> {
        let txn = self.db.begin().await?;

        let incoming: Vec<(NaiveDate, Option<Decimal>)> = incoming_stocks::Entity::find()
            .select_only()
            .column(incoming_stocks::Column::Date)
            .column(incoming_stocks::Column::TotalAmount)
            .into_tuple()
            .all(&txn)
            .await?;

        let outgoing: Vec<(NaiveDate, Decimal)> = outgoing_stocks::Entity::find()
            .select_only()
            .column(outgoing_stocks::Column::Date)
            .column(outgoing_stocks::Column::GrandTotal)
            .into_tuple()
            .all(&txn)
            .await?;

        let transactions: Vec<(NaiveDate, String, String, String, Decimal)> =
            financial_transactions::Entity::find()
                .select_only()
                .column(financial_transactions::Column::TransactionDate)
                .column(financial_transactions::Column::Source)
                .column(financial_transactions::Column::TrxType)
                .column(financial_transactions::Column::Category)
                .column(financial_transactions::Column::Amount)
                .into_tuple()
                .all(&txn)
                .await?;

        let advances: Vec<(Option<NaiveDate>, DateTimeWithTimeZone, String, Decimal)> =
            kasbons::Entity::find()
                .select_only()
                .column(kasbons::Column::TransactionDate)
                .column(kasbons::Column::CreatedAt)
                .column(kasbons::Column::OwnerType)
                .column(kasbons::Column::Amount)
                .into_tuple()
                .all(&txn)
                .await?;

        let payroll_rows: Vec<(DateTimeWithTimeZone, Decimal)> = payrolls::Entity::find()
            .select_only()
            .column(payrolls::Column::CreatedAt)
            .column(payrolls::Column::NetPay)
            .into_tuple()
            .all(&txn)
            .await?;

        let payments: Vec<Decimal> = kasbon_payments::Entity::find()
            .select_only()
            .column(kasbon_payments::Column::Amount)
            .into_tuple()
            .all(&txn)
            .await?;

        txn.commit().await?;

        Ok(LedgerSnapshot {
            incoming: incoming.into_iter().map(map_incoming).collect(),
            outgoing: outgoing.into_iter().map(map_outgoing).collect(),
            transactions: transactions.into_iter().filter_map(map_transaction).collect(),
            kasbons: advances.into_iter().map(map_kasbon).collect(),
            payrolls: payroll_rows.into_iter().map(map_payroll).collect(),
            kasbon_payments_total: payments.iter().sum(),
        })
    }
}

fn map_incoming((date, total_amount): (NaiveDate, Option<Decimal>)) -> StockInRow {
    StockInRow {
        date,
        total_amount: total_amount.unwrap_or(Decimal::ZERO),
    }
}

fn map_outgoing((date, grand_total): (NaiveDate, Decimal)) -> StockOutRow {
    StockOutRow { date, grand_total }
}

/// Maps one manual ledger row, dropping rows whose source/type strings
/// are not recognized. Such a row cannot be placed in any bucket; a
/// silent guess would miscount money.
fn map_transaction(
    (transaction_date, source, trx_type, category, amount): (
        NaiveDate,
        String,
        String,
        String,
        Decimal,
    ),
) -> Option<TrxRow> {
    let source = match source.parse::<TrxSource>() {
        Ok(source) => source,
        Err(err) => {
            warn!(error = %err, %category, "skipping transaction with unknown source");
            return None;
        }
    };
    let direction = match trx_type.parse::<TrxDirection>() {
        Ok(direction) => direction,
        Err(err) => {
            warn!(error = %err, %category, "skipping transaction with unknown type");
            return None;
        }
    };

    Some(TrxRow {
        transaction_date,
        source,
        direction,
        category,
        amount,
    })
}

fn map_kasbon(
    (transaction_date, created_at, owner_type, amount): (
        Option<NaiveDate>,
        DateTimeWithTimeZone,
        String,
        Decimal,
    ),
) -> KasbonRow {
    // Anything that is not an incisor advance counts as an employee
    // advance, so no advance ever falls out of the cash ledger.
    let owner = if owner_type == kasbons::OWNER_INCISOR {
        KasbonOwner::Incisor
    } else {
        KasbonOwner::Employee
    };

    KasbonRow {
        effective_date: kasbon_effective_date(transaction_date, created_at),
        owner,
        amount,
    }
}

fn map_payroll((created_at, net_pay): (DateTimeWithTimeZone, Decimal)) -> PayrollRow {
    PayrollRow {
        created_date: created_at.date_naive(),
        net_pay,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use rust_decimal_macros::dec;

    use super::*;

    fn ts(y: i32, m: u32, d: u32) -> DateTimeWithTimeZone {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 10, 30, 0)
            .unwrap()
    }

    #[test]
    fn test_map_transaction_parses_enums() {
        let row = map_transaction((
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "bank".to_string(),
            "expense".to_string(),
            "Pembayaran Kapal".to_string(),
            dec!(200_000),
        ))
        .unwrap();

        assert_eq!(row.source, TrxSource::Bank);
        assert_eq!(row.direction, TrxDirection::Expense);
        assert_eq!(row.amount, dec!(200_000));
    }

    #[test]
    fn test_map_transaction_drops_unknown_source() {
        let row = map_transaction((
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "wallet".to_string(),
            "expense".to_string(),
            "Lain-lain".to_string(),
            dec!(1),
        ));
        assert!(row.is_none());
    }

    #[test]
    fn test_map_kasbon_effective_date_fallback() {
        let explicit = map_kasbon((
            NaiveDate::from_ymd_opt(2025, 1, 5),
            ts(2025, 2, 1),
            "employee".to_string(),
            dec!(100_000),
        ));
        assert_eq!(
            explicit.effective_date,
            NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()
        );

        let fallback = map_kasbon((None, ts(2025, 2, 1), "incisor".to_string(), dec!(50_000)));
        assert_eq!(
            fallback.effective_date,
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
        );
        assert_eq!(fallback.owner, KasbonOwner::Incisor);
    }

    #[test]
    fn test_map_kasbon_unknown_owner_counts_as_employee() {
        let row = map_kasbon((
            None,
            ts(2025, 2, 1),
            "App\\Models\\Employee".to_string(),
            dec!(10),
        ));
        assert_eq!(row.owner, KasbonOwner::Employee);
    }

    #[test]
    fn test_map_incoming_missing_value_is_zero() {
        let row = map_incoming((NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(), None));
        assert_eq!(row.total_amount, Decimal::ZERO);
    }
}
