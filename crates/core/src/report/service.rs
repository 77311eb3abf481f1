//! Report generation service.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::classify::{
    Bucket, TrxDirection, TrxSource, categories, classify, counts_toward_opex, is_bank_withdrawal,
    is_manual_cogs,
};
use crate::period::{Granularity, Period};

use super::types::{
    BalanceSheet, BalanceSheetAssets, BalanceSheetLiabilities, BankReport, CashReport, ChartPoint,
    FinancialReport, KasbonOwner, LedgerSnapshot, PeriodReport, ProfitLoss,
};

/// Service for generating financial reports.
///
/// Every method is a pure function over a [`LedgerSnapshot`] and a
/// resolved [`Period`]; the database is never touched here. An empty
/// period produces an all-zero report rather than an error.
pub struct ReportService;

impl ReportService {
    /// Generates the complete report: bank, cash and profit-and-loss for
    /// the requested period plus the cumulative balance sheet.
    #[must_use]
    pub fn financial_report(snapshot: &LedgerSnapshot, period: &Period) -> FinancialReport {
        let bank = Self::bank_report(snapshot, period);
        let kas = Self::cash_report(snapshot, period);
        let profit_loss = Self::profit_loss(snapshot, period, &bank);

        FinancialReport {
            period_report: PeriodReport {
                bank,
                kas,
                profit_loss,
            },
            balance_sheet_cumulative: Self::balance_sheet(snapshot),
        }
    }

    /// Generates the bank ledger for the period.
    ///
    /// Income is every sales invoice plus manually entered bank income.
    /// Expenses are finalized payroll plus manual bank expenses, broken
    /// into the named categories the admin uses day to day.
    #[must_use]
    pub fn bank_report(snapshot: &LedgerSnapshot, period: &Period) -> BankReport {
        let in_penjualan: Decimal = snapshot
            .outgoing
            .iter()
            .filter(|row| period.contains(row.date))
            .map(|row| row.grand_total)
            .sum();

        let out_gaji: Decimal = snapshot
            .payrolls
            .iter()
            .filter(|row| period.contains(row.created_date))
            .map(|row| row.net_pay)
            .sum();

        let mut in_lainnya = Decimal::ZERO;
        let mut out_kapal = Decimal::ZERO;
        let mut out_truck = Decimal::ZERO;
        let mut out_hutang = Decimal::ZERO;
        let mut out_penarikan = Decimal::ZERO;
        let mut out_lainnya = Decimal::ZERO;

        for row in snapshot
            .transactions
            .iter()
            .filter(|row| period.contains(row.transaction_date))
        {
            match classify(row.source, row.direction, &row.category) {
                Bucket::BankInManual => in_lainnya += row.amount,
                Bucket::BankOutManual => match row.category.as_str() {
                    categories::PEMBAYARAN_KAPAL => out_kapal += row.amount,
                    categories::PEMBAYARAN_TRUCK => out_truck += row.amount,
                    categories::BAYAR_HUTANG => out_hutang += row.amount,
                    categories::PENARIKAN_BANK => out_penarikan += row.amount,
                    _ => out_lainnya += row.amount,
                },
                _ => {}
            }
        }

        let total_in = in_penjualan + in_lainnya;
        let total_out = out_gaji + out_kapal + out_truck + out_hutang + out_penarikan + out_lainnya;

        BankReport {
            in_penjualan,
            in_lainnya,
            out_gaji,
            out_kapal,
            out_truck,
            out_hutang,
            out_penarikan,
            out_lainnya,
            total_in,
            total_out,
            balance: total_in - total_out,
        }
    }

    /// Generates the cash-drawer ledger for the period.
    ///
    /// Cash comes in through bank withdrawals and manual cash income, and
    /// goes out through incisor payments, rubber purchases, advances and
    /// the remaining cash expense categories.
    #[must_use]
    pub fn cash_report(snapshot: &LedgerSnapshot, period: &Period) -> CashReport {
        let mut in_penarikan = Decimal::ZERO;
        let mut in_lainnya = Decimal::ZERO;
        let mut out_lapangan = Decimal::ZERO;
        let mut out_kantor = Decimal::ZERO;
        let mut out_bpjs = Decimal::ZERO;
        let mut out_bayar_penoreh = Decimal::ZERO;
        let mut out_belikaret = Decimal::ZERO;
        let mut out_lainnya = Decimal::ZERO;

        for row in snapshot
            .transactions
            .iter()
            .filter(|row| period.contains(row.transaction_date))
        {
            // The withdrawal check matches on source and category alone,
            // so the same rows that left the bank ledger arrive here.
            if is_bank_withdrawal(row.source, &row.category) {
                in_penarikan += row.amount;
            }

            match classify(row.source, row.direction, &row.category) {
                Bucket::CashInManual => in_lainnya += row.amount,
                Bucket::CashOutBayarPenoreh => out_bayar_penoreh += row.amount,
                Bucket::CashOutBeliKaret => out_belikaret += row.amount,
                Bucket::CashOutLainnya => match row.category.as_str() {
                    categories::OPERASIONAL_LAPANGAN => out_lapangan += row.amount,
                    categories::OPERASIONAL_KANTOR => out_kantor += row.amount,
                    categories::BPJS_KETENAGAKERJAAN => out_bpjs += row.amount,
                    _ => out_lainnya += row.amount,
                },
                _ => {}
            }
        }

        let mut out_kasbon_pegawai = Decimal::ZERO;
        let mut out_kasbon_penoreh = Decimal::ZERO;
        for row in snapshot
            .kasbons
            .iter()
            .filter(|row| period.contains(row.effective_date))
        {
            match row.owner {
                KasbonOwner::Employee => out_kasbon_pegawai += row.amount,
                KasbonOwner::Incisor => out_kasbon_penoreh += row.amount,
            }
        }

        let total_in = in_penarikan + in_lainnya;
        let total_out = out_lapangan
            + out_kantor
            + out_bpjs
            + out_bayar_penoreh
            + out_belikaret
            + out_kasbon_pegawai
            + out_kasbon_penoreh
            + out_lainnya;

        CashReport {
            in_penarikan,
            in_lainnya,
            out_lapangan,
            out_kantor,
            out_bpjs,
            out_bayar_penoreh,
            out_belikaret,
            out_kasbon_pegawai,
            out_kasbon_penoreh,
            out_lainnya,
            total_in,
            total_out,
            balance: total_in - total_out,
        }
    }

    /// Generates the profit-and-loss statement for the period.
    ///
    /// Revenue is total bank income. Cost of goods is incoming-stock
    /// purchase value plus manually recorded rubber purchases. Operating
    /// expenses are payroll plus every expense category that is not a
    /// cost of goods and not a bank withdrawal.
    #[must_use]
    pub fn profit_loss(snapshot: &LedgerSnapshot, period: &Period, bank: &BankReport) -> ProfitLoss {
        let stock_cogs: Decimal = snapshot
            .incoming
            .iter()
            .filter(|row| period.contains(row.date))
            .map(|row| row.total_amount)
            .sum();

        let manual_cogs: Decimal = snapshot
            .transactions
            .iter()
            .filter(|row| period.contains(row.transaction_date) && is_manual_cogs(&row.category))
            .map(|row| row.amount)
            .sum();

        let expense_opex: Decimal = snapshot
            .transactions
            .iter()
            .filter(|row| {
                period.contains(row.transaction_date)
                    && counts_toward_opex(row.direction, &row.category)
            })
            .map(|row| row.amount)
            .sum();

        let revenue = bank.total_in;
        let cogs = stock_cogs + manual_cogs;
        let gross_profit = revenue - cogs;
        let opex = expense_opex + bank.out_gaji;
        let net_profit = gross_profit - opex;

        ProfitLoss {
            revenue,
            cogs,
            gross_profit,
            opex,
            net_profit,
        }
    }

    /// Generates the cumulative balance sheet.
    ///
    /// Always evaluated over unbounded history, whatever period the rest
    /// of the report was asked for. Cash and bank positions are the
    /// all-time ledger balances; receivables are advances lent minus
    /// advances repaid.
    #[must_use]
    pub fn balance_sheet(snapshot: &LedgerSnapshot) -> BalanceSheet {
        let all_time = Period::all_time();
        let bank = Self::bank_report(snapshot, &all_time);
        let kas = Self::cash_report(snapshot, &all_time);

        let lent: Decimal = snapshot.kasbons.iter().map(|row| row.amount).sum();
        let piutang = lent - snapshot.kasbon_payments_total;

        BalanceSheet {
            assets: BalanceSheetAssets {
                kas_period: kas.balance,
                bank_period: bank.balance,
                piutang,
                inventory_value: Decimal::ZERO,
            },
            liabilities: BalanceSheetLiabilities {
                hutang_dagang: Decimal::ZERO,
            },
        }
    }

    /// Generates the income/expense chart series for the period.
    ///
    /// Points are bucketed by day, or by month when the period spans a
    /// year or more. Income is sales plus manual bank income; expense is
    /// every manual expense except bank withdrawals, which only move
    /// money between the two ledgers.
    #[must_use]
    pub fn chart_series(snapshot: &LedgerSnapshot, period: &Period) -> Vec<ChartPoint> {
        let mut buckets: BTreeMap<String, (Decimal, Decimal)> = BTreeMap::new();

        for row in snapshot
            .outgoing
            .iter()
            .filter(|row| period.contains(row.date))
        {
            let entry = buckets
                .entry(Self::bucket_label(row.date, period.granularity))
                .or_default();
            entry.0 += row.grand_total;
        }

        for row in snapshot
            .transactions
            .iter()
            .filter(|row| period.contains(row.transaction_date))
        {
            let is_income =
                row.source == TrxSource::Bank && row.direction == TrxDirection::Income;
            let is_expense = row.direction == TrxDirection::Expense
                && row.category != categories::PENARIKAN_BANK;
            if !is_income && !is_expense {
                continue;
            }

            let entry = buckets
                .entry(Self::bucket_label(row.transaction_date, period.granularity))
                .or_default();
            if is_income {
                entry.0 += row.amount;
            } else {
                entry.1 += row.amount;
            }
        }

        buckets
            .into_iter()
            .map(|(label, (income, expense))| ChartPoint {
                label,
                income,
                expense,
            })
            .collect()
    }

    fn bucket_label(date: chrono::NaiveDate, granularity: Granularity) -> String {
        match granularity {
            Granularity::Day => date.format("%Y-%m-%d").to_string(),
            Granularity::Month => date.format("%Y-%m").to_string(),
        }
    }
}
