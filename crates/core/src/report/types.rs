//! Ledger snapshot rows and report output types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::classify::{TrxDirection, TrxSource};

// ============================================================================
// Snapshot rows
// ============================================================================

/// Who a cash advance was handed to.
///
/// Advances to incisors (tappers paid per kilogram) and to salaried
/// employees land in different cash-report lines, so the distinction
/// survives into the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KasbonOwner {
    Employee,
    Incisor,
}

/// One incoming-stock purchase (raw rubber bought from the field).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockInRow {
    pub date: NaiveDate,
    /// Purchase value of the delivery. Zero when the row was recorded
    /// without a price.
    pub total_amount: Decimal,
}

/// One outgoing-stock sale (processed rubber shipped to a buyer).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockOutRow {
    pub date: NaiveDate,
    /// Invoice value after PPh and cost adjustments.
    pub grand_total: Decimal,
}

/// One manual financial transaction as entered by the admin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrxRow {
    pub transaction_date: NaiveDate,
    pub source: TrxSource,
    pub direction: TrxDirection,
    pub category: String,
    pub amount: Decimal,
}

/// One cash advance, dated by its effective date.
///
/// The effective date is the explicit transaction date when one was
/// recorded, otherwise the calendar date the row was created. The
/// repository computes it once while mapping rows so every consumer
/// applies the same rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KasbonRow {
    pub effective_date: NaiveDate,
    pub owner: KasbonOwner,
    pub amount: Decimal,
}

/// One finalized payroll run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayrollRow {
    pub created_date: NaiveDate,
    pub net_pay: Decimal,
}

/// Immutable snapshot of every ledger the reports read.
///
/// The repository loads all five ledgers (plus the advance-repayment
/// total) inside a single read transaction, so every figure in one
/// report reflects the same instant. Period filtering happens here in
/// core, row by row, never in SQL.
#[derive(Debug, Clone, Default)]
pub struct LedgerSnapshot {
    pub incoming: Vec<StockInRow>,
    pub outgoing: Vec<StockOutRow>,
    pub transactions: Vec<TrxRow>,
    pub kasbons: Vec<KasbonRow>,
    pub payrolls: Vec<PayrollRow>,
    /// Sum of all advance repayments ever recorded, regardless of period.
    /// Only the cumulative receivable figure needs it.
    pub kasbon_payments_total: Decimal,
}

// ============================================================================
// Report output
// ============================================================================

/// Bank ledger for the selected period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankReport {
    /// Sales invoices; every outgoing-stock grand total is assumed to
    /// settle by transfer.
    pub in_penjualan: Decimal,
    /// Manually entered bank income.
    pub in_lainnya: Decimal,
    /// Net pay of finalized payroll runs.
    pub out_gaji: Decimal,
    pub out_kapal: Decimal,
    pub out_truck: Decimal,
    pub out_hutang: Decimal,
    /// Withdrawals moving money from the bank into the cash drawer.
    pub out_penarikan: Decimal,
    /// Bank expenses in no named category above.
    pub out_lainnya: Decimal,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub balance: Decimal,
}

/// Cash-drawer ledger for the selected period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashReport {
    /// Bank withdrawals arriving in the drawer. The same rows also
    /// appear as `out_penarikan` on the bank side; the transfer is
    /// counted on both ledgers on purpose.
    pub in_penarikan: Decimal,
    /// Manually entered cash income.
    pub in_lainnya: Decimal,
    pub out_lapangan: Decimal,
    pub out_kantor: Decimal,
    pub out_bpjs: Decimal,
    /// Incisor wage payouts.
    pub out_bayar_penoreh: Decimal,
    /// Rubber purchases paid in cash.
    pub out_belikaret: Decimal,
    pub out_kasbon_pegawai: Decimal,
    pub out_kasbon_penoreh: Decimal,
    /// Cash expenses in no named category above.
    pub out_lainnya: Decimal,
    pub total_in: Decimal,
    pub total_out: Decimal,
    pub balance: Decimal,
}

/// Profit and loss for the selected period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitLoss {
    pub revenue: Decimal,
    pub cogs: Decimal,
    pub gross_profit: Decimal,
    pub opex: Decimal,
    pub net_profit: Decimal,
}

/// Asset side of the balance-sheet snapshot.
///
/// Field names mirror the period ledgers they are derived from, but the
/// figures are cumulative: both balances are evaluated over unbounded
/// history no matter what period the rest of the report was asked for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetAssets {
    pub kas_period: Decimal,
    pub bank_period: Decimal,
    /// Outstanding advances: everything lent minus everything repaid.
    pub piutang: Decimal,
    /// Stock on hand is not valued yet; reported as zero until a costing
    /// method is picked.
    pub inventory_value: Decimal,
}

/// Liability side of the balance-sheet snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheetLiabilities {
    /// Supplier payables are settled on the spot today; reported as zero.
    pub hutang_dagang: Decimal,
}

/// Cumulative balance-sheet snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSheet {
    pub assets: BalanceSheetAssets,
    pub liabilities: BalanceSheetLiabilities,
}

/// The three period-scoped sections of the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    pub bank: BankReport,
    pub kas: CashReport,
    pub profit_loss: ProfitLoss,
}

/// Complete financial report: period-scoped sections plus the
/// cumulative balance sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub period_report: PeriodReport,
    pub balance_sheet_cumulative: BalanceSheet,
}

/// One bucket of the income/expense chart.
///
/// `label` is `YYYY-MM-DD` for daily buckets and `YYYY-MM` for monthly
/// ones, so lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub income: Decimal,
    pub expense: Decimal,
}
