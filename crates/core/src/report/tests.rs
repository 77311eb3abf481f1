//! Property-based tests for the report module.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::classify::{TrxDirection, TrxSource, categories};
use crate::period::{Granularity, Period, ReportRange};

use super::service::ReportService;
use super::types::{
    KasbonOwner, KasbonRow, LedgerSnapshot, PayrollRow, PeriodReport, StockInRow, StockOutRow,
    TrxRow,
};

fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2024i32..=2026, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    })
}

fn arb_source() -> impl Strategy<Value = TrxSource> {
    prop_oneof![Just(TrxSource::Cash), Just(TrxSource::Bank)]
}

fn arb_direction() -> impl Strategy<Value = TrxDirection> {
    prop_oneof![Just(TrxDirection::Income), Just(TrxDirection::Expense)]
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(categories::PEMBAYARAN_KAPAL.to_string()),
        Just(categories::PEMBAYARAN_TRUCK.to_string()),
        Just(categories::BAYAR_HUTANG.to_string()),
        Just(categories::PENARIKAN_BANK.to_string()),
        Just(categories::PEMBAYARAN_PENOREH.to_string()),
        Just(categories::PEMBELIAN_KARET.to_string()),
        Just(categories::OPERASIONAL_LAPANGAN.to_string()),
        Just(categories::OPERASIONAL_KANTOR.to_string()),
        Just(categories::BPJS_KETENAGAKERJAAN.to_string()),
        Just("Lain-lain".to_string()),
        Just("Sumbangan".to_string()),
    ]
}

fn arb_trx() -> impl Strategy<Value = TrxRow> {
    (arb_date(), arb_source(), arb_direction(), arb_category(), 0i64..5_000_000).prop_map(
        |(transaction_date, source, direction, category, amount)| TrxRow {
            transaction_date,
            source,
            direction,
            category,
            amount: Decimal::from(amount),
        },
    )
}

fn arb_snapshot() -> impl Strategy<Value = LedgerSnapshot> {
    (
        prop::collection::vec(
            (arb_date(), 0i64..20_000_000)
                .prop_map(|(date, v)| StockInRow { date, total_amount: Decimal::from(v) }),
            0..8,
        ),
        prop::collection::vec(
            (arb_date(), 0i64..20_000_000)
                .prop_map(|(date, v)| StockOutRow { date, grand_total: Decimal::from(v) }),
            0..8,
        ),
        prop::collection::vec(arb_trx(), 0..24),
        prop::collection::vec(
            (
                arb_date(),
                prop_oneof![Just(KasbonOwner::Employee), Just(KasbonOwner::Incisor)],
                0i64..2_000_000,
            )
                .prop_map(|(effective_date, owner, v)| KasbonRow {
                    effective_date,
                    owner,
                    amount: Decimal::from(v),
                }),
            0..8,
        ),
        prop::collection::vec(
            (arb_date(), 0i64..10_000_000)
                .prop_map(|(created_date, v)| PayrollRow { created_date, net_pay: Decimal::from(v) }),
            0..4,
        ),
    )
        .prop_map(
            |(incoming, outgoing, transactions, kasbons, payrolls)| LedgerSnapshot {
                incoming,
                outgoing,
                transactions,
                kasbons,
                payrolls,
                kasbon_payments_total: Decimal::ZERO,
            },
        )
}

proptest! {
    /// Every manual transaction lands in exactly one report line. Summing
    /// all bank and cash lines fed by manual rows (leaving out
    /// `in_penarikan`, which re-counts the withdrawal rows already in
    /// `out_penarikan`) must reproduce the total entered.
    #[test]
    fn test_manual_rows_partition_without_loss(rows in prop::collection::vec(arb_trx(), 0..40)) {
        let total: Decimal = rows.iter().map(|r| r.amount).sum();
        let snapshot = LedgerSnapshot { transactions: rows, ..LedgerSnapshot::default() };
        let period = Period::all_time();

        let bank = ReportService::bank_report(&snapshot, &period);
        let kas = ReportService::cash_report(&snapshot, &period);

        let bank_manual = bank.in_lainnya
            + bank.out_kapal
            + bank.out_truck
            + bank.out_hutang
            + bank.out_penarikan
            + bank.out_lainnya;
        let kas_manual = kas.in_lainnya
            + kas.out_lapangan
            + kas.out_kantor
            + kas.out_bpjs
            + kas.out_bayar_penoreh
            + kas.out_belikaret
            + kas.out_lainnya;

        prop_assert_eq!(bank_manual + kas_manual, total);
    }

    /// The drawer-side withdrawal line counts every bank row in the
    /// withdrawal category, whichever direction it was entered with. The
    /// bank-side line only counts the expense ones.
    #[test]
    fn test_withdrawal_lines_agree(rows in prop::collection::vec(arb_trx(), 0..40)) {
        let income_withdrawals: Decimal = rows
            .iter()
            .filter(|r| {
                r.source == TrxSource::Bank
                    && r.direction == TrxDirection::Income
                    && r.category == categories::PENARIKAN_BANK
            })
            .map(|r| r.amount)
            .sum();

        let snapshot = LedgerSnapshot { transactions: rows, ..LedgerSnapshot::default() };
        let period = Period::all_time();

        let bank = ReportService::bank_report(&snapshot, &period);
        let kas = ReportService::cash_report(&snapshot, &period);

        prop_assert_eq!(kas.in_penarikan, bank.out_penarikan + income_withdrawals);
    }

    /// Totals are the sum of their lines and balances are in minus out,
    /// on both ledgers, for any snapshot.
    #[test]
    fn test_ledger_totals_are_consistent(snapshot in arb_snapshot()) {
        let period = Period::all_time();
        let bank = ReportService::bank_report(&snapshot, &period);
        let kas = ReportService::cash_report(&snapshot, &period);

        prop_assert_eq!(bank.total_in, bank.in_penjualan + bank.in_lainnya);
        prop_assert_eq!(
            bank.total_out,
            bank.out_gaji + bank.out_kapal + bank.out_truck + bank.out_hutang
                + bank.out_penarikan + bank.out_lainnya
        );
        prop_assert_eq!(bank.balance, bank.total_in - bank.total_out);

        prop_assert_eq!(kas.total_in, kas.in_penarikan + kas.in_lainnya);
        prop_assert_eq!(
            kas.total_out,
            kas.out_lapangan + kas.out_kantor + kas.out_bpjs + kas.out_bayar_penoreh
                + kas.out_belikaret + kas.out_kasbon_pegawai + kas.out_kasbon_penoreh
                + kas.out_lainnya
        );
        prop_assert_eq!(kas.balance, kas.total_in - kas.total_out);
    }

    /// Profit-and-loss identities hold for any snapshot: revenue is bank
    /// income, gross profit is revenue minus cost of goods, net profit is
    /// gross profit minus operating expenses, and payroll is inside opex.
    #[test]
    fn test_profit_loss_identities(snapshot in arb_snapshot()) {
        let period = Period::all_time();
        let bank = ReportService::bank_report(&snapshot, &period);
        let pl = ReportService::profit_loss(&snapshot, &period, &bank);

        prop_assert_eq!(pl.revenue, bank.total_in);
        prop_assert_eq!(pl.gross_profit, pl.revenue - pl.cogs);
        prop_assert_eq!(pl.net_profit, pl.gross_profit - pl.opex);
        prop_assert!(pl.opex >= bank.out_gaji);
    }

    /// Filtering the snapshot by hand and reporting over everything gives
    /// the same period sections as reporting the full snapshot over the
    /// period.
    #[test]
    fn test_period_filter_matches_prefiltered_snapshot(snapshot in arb_snapshot()) {
        let period = Period {
            start: NaiveDate::from_ymd_opt(2025, 3, 1),
            end: NaiveDate::from_ymd_opt(2025, 3, 31),
            granularity: Granularity::Day,
        };

        let filtered = LedgerSnapshot {
            incoming: snapshot
                .incoming
                .iter()
                .filter(|r| period.contains(r.date))
                .cloned()
                .collect(),
            outgoing: snapshot
                .outgoing
                .iter()
                .filter(|r| period.contains(r.date))
                .cloned()
                .collect(),
            transactions: snapshot
                .transactions
                .iter()
                .filter(|r| period.contains(r.transaction_date))
                .cloned()
                .collect(),
            kasbons: snapshot
                .kasbons
                .iter()
                .filter(|r| period.contains(r.effective_date))
                .cloned()
                .collect(),
            payrolls: snapshot
                .payrolls
                .iter()
                .filter(|r| period.contains(r.created_date))
                .cloned()
                .collect(),
            kasbon_payments_total: snapshot.kasbon_payments_total,
        };

        prop_assert_eq!(
            ReportService::bank_report(&snapshot, &period),
            ReportService::bank_report(&filtered, &Period::all_time())
        );
        prop_assert_eq!(
            ReportService::cash_report(&snapshot, &period),
            ReportService::cash_report(&filtered, &Period::all_time())
        );
    }

    /// The balance sheet never moves with the requested period.
    #[test]
    fn test_balance_sheet_ignores_period(snapshot in arb_snapshot(), month in 1u32..=12) {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let scoped = ReportRange::SpecificMonth { month, year: 2025 }.resolve(today);

        let from_scoped = ReportService::financial_report(&snapshot, &scoped);
        let from_all = ReportService::financial_report(&snapshot, &Period::all_time());

        prop_assert_eq!(
            from_scoped.balance_sheet_cumulative,
            from_all.balance_sheet_cumulative
        );
    }
}

mod unit_tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn trx(
        date: NaiveDate,
        source: TrxSource,
        direction: TrxDirection,
        category: &str,
        amount: Decimal,
    ) -> TrxRow {
        TrxRow {
            transaction_date: date,
            source,
            direction,
            category: category.to_string(),
            amount,
        }
    }

    /// A trading month as the admin would enter it: one rubber shipment,
    /// some manual bank activity and one payroll run, plus noise in the
    /// neighbouring month that must not leak in.
    #[test]
    fn test_specific_month_bank_ledger() {
        let snapshot = LedgerSnapshot {
            outgoing: vec![
                StockOutRow { date: day(2025, 3, 15), grand_total: dec!(10_000_000) },
                StockOutRow { date: day(2025, 2, 20), grand_total: dec!(4_000_000) },
            ],
            transactions: vec![
                trx(day(2025, 3, 10), TrxSource::Bank, TrxDirection::Income, "Lain-lain", dec!(500_000)),
                trx(day(2025, 3, 20), TrxSource::Bank, TrxDirection::Expense, categories::PEMBAYARAN_KAPAL, dec!(200_000)),
                trx(day(2025, 4, 1), TrxSource::Bank, TrxDirection::Expense, categories::PEMBAYARAN_KAPAL, dec!(999_999)),
            ],
            payrolls: vec![
                PayrollRow { created_date: day(2025, 3, 28), net_pay: dec!(3_000_000) },
                PayrollRow { created_date: day(2025, 2, 28), net_pay: dec!(2_500_000) },
            ],
            ..LedgerSnapshot::default()
        };

        let today = day(2025, 8, 23);
        let period = ReportRange::from_request(Some("specific-month"), Some(3), Some(2025), today)
            .resolve(today);
        let bank = ReportService::bank_report(&snapshot, &period);

        assert_eq!(bank.in_penjualan, dec!(10_000_000));
        assert_eq!(bank.in_lainnya, dec!(500_000));
        assert_eq!(bank.out_gaji, dec!(3_000_000));
        assert_eq!(bank.out_kapal, dec!(200_000));
        assert_eq!(bank.total_in, dec!(10_500_000));
        assert_eq!(bank.total_out, dec!(3_200_000));
        assert_eq!(bank.balance, dec!(7_300_000));
    }

    /// A bank withdrawal leaves the bank ledger and arrives in the cash
    /// drawer in the same period, and never counts as an operating
    /// expense or a chart expense.
    #[test]
    fn test_withdrawal_moves_between_ledgers() {
        let snapshot = LedgerSnapshot {
            transactions: vec![trx(
                day(2025, 5, 2),
                TrxSource::Bank,
                TrxDirection::Expense,
                categories::PENARIKAN_BANK,
                dec!(750_000),
            )],
            ..LedgerSnapshot::default()
        };
        let period = Period::all_time();

        let bank = ReportService::bank_report(&snapshot, &period);
        let kas = ReportService::cash_report(&snapshot, &period);
        let pl = ReportService::profit_loss(&snapshot, &period, &bank);
        let chart = ReportService::chart_series(&snapshot, &period);

        assert_eq!(bank.out_penarikan, dec!(750_000));
        assert_eq!(bank.balance, dec!(-750_000));
        assert_eq!(kas.in_penarikan, dec!(750_000));
        assert_eq!(kas.balance, dec!(750_000));
        assert_eq!(pl.opex, Decimal::ZERO);
        assert!(chart.is_empty());
    }

    #[test]
    fn test_cash_report_splits_advances_by_owner() {
        let snapshot = LedgerSnapshot {
            kasbons: vec![
                KasbonRow { effective_date: day(2025, 1, 5), owner: KasbonOwner::Employee, amount: dec!(300_000) },
                KasbonRow { effective_date: day(2025, 1, 9), owner: KasbonOwner::Incisor, amount: dec!(450_000) },
                KasbonRow { effective_date: day(2025, 1, 12), owner: KasbonOwner::Employee, amount: dec!(50_000) },
            ],
            ..LedgerSnapshot::default()
        };

        let kas = ReportService::cash_report(&snapshot, &Period::all_time());

        assert_eq!(kas.out_kasbon_pegawai, dec!(350_000));
        assert_eq!(kas.out_kasbon_penoreh, dec!(450_000));
        assert_eq!(kas.total_out, dec!(800_000));
    }

    /// Rubber bought through the manual ledger counts as cost of goods no
    /// matter how the row was entered, on top of the incoming-stock value.
    #[test]
    fn test_cogs_combines_stock_and_manual_purchases() {
        let snapshot = LedgerSnapshot {
            incoming: vec![StockInRow { date: day(2025, 6, 3), total_amount: dec!(1_000_000) }],
            transactions: vec![
                trx(day(2025, 6, 5), TrxSource::Cash, TrxDirection::Expense, categories::PEMBELIAN_KARET, dec!(100_000)),
                trx(day(2025, 6, 7), TrxSource::Bank, TrxDirection::Expense, categories::PEMBELIAN_KARET, dec!(200_000)),
            ],
            ..LedgerSnapshot::default()
        };
        let period = Period::all_time();

        let bank = ReportService::bank_report(&snapshot, &period);
        let pl = ReportService::profit_loss(&snapshot, &period, &bank);

        assert_eq!(pl.cogs, dec!(1_300_000));
        // The bank-side purchase is an uncategorized bank expense, not opex.
        assert_eq!(bank.out_lainnya, dec!(200_000));
        assert_eq!(pl.opex, Decimal::ZERO);
    }

    /// An empty window zeroes the period sections but leaves the
    /// cumulative balance sheet untouched.
    #[test]
    fn test_empty_period_reports_zeros() {
        let snapshot = LedgerSnapshot {
            outgoing: vec![StockOutRow { date: day(2025, 3, 15), grand_total: dec!(10_000_000) }],
            kasbons: vec![KasbonRow {
                effective_date: day(2025, 1, 5),
                owner: KasbonOwner::Incisor,
                amount: dec!(400_000),
            }],
            kasbon_payments_total: dec!(150_000),
            ..LedgerSnapshot::default()
        };

        let report = ReportService::financial_report(&snapshot, &Period::empty());

        assert_eq!(report.period_report, PeriodReport::default());
        assert_eq!(report.balance_sheet_cumulative.assets.piutang, dec!(250_000));
        assert_eq!(
            report.balance_sheet_cumulative.assets.bank_period,
            dec!(10_000_000)
        );
    }

    #[test]
    fn test_chart_merges_sales_and_manual_rows_per_day() {
        let snapshot = LedgerSnapshot {
            outgoing: vec![
                StockOutRow { date: day(2025, 3, 10), grand_total: dec!(2_000_000) },
                StockOutRow { date: day(2025, 3, 10), grand_total: dec!(1_000_000) },
            ],
            transactions: vec![
                trx(day(2025, 3, 10), TrxSource::Bank, TrxDirection::Income, "Lain-lain", dec!(500_000)),
                trx(day(2025, 3, 12), TrxSource::Cash, TrxDirection::Expense, categories::OPERASIONAL_KANTOR, dec!(300_000)),
                // Cash income is drawer money, not chart income.
                trx(day(2025, 3, 12), TrxSource::Cash, TrxDirection::Income, "Lain-lain", dec!(80_000)),
            ],
            ..LedgerSnapshot::default()
        };
        let period = Period {
            start: NaiveDate::from_ymd_opt(2025, 3, 1),
            end: NaiveDate::from_ymd_opt(2025, 3, 31),
            granularity: Granularity::Day,
        };

        let chart = ReportService::chart_series(&snapshot, &period);

        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label, "2025-03-10");
        assert_eq!(chart[0].income, dec!(3_500_000));
        assert_eq!(chart[0].expense, Decimal::ZERO);
        assert_eq!(chart[1].label, "2025-03-12");
        assert_eq!(chart[1].income, Decimal::ZERO);
        assert_eq!(chart[1].expense, dec!(300_000));
    }

    #[test]
    fn test_chart_buckets_by_month_over_a_year() {
        let snapshot = LedgerSnapshot {
            outgoing: vec![
                StockOutRow { date: day(2025, 1, 5), grand_total: dec!(1_000_000) },
                StockOutRow { date: day(2025, 1, 25), grand_total: dec!(2_000_000) },
                StockOutRow { date: day(2025, 11, 3), grand_total: dec!(4_000_000) },
            ],
            ..LedgerSnapshot::default()
        };
        let today = day(2025, 8, 23);
        let period = ReportRange::ThisYear.resolve(today);

        let chart = ReportService::chart_series(&snapshot, &period);

        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label, "2025-01");
        assert_eq!(chart[0].income, dec!(3_000_000));
        assert_eq!(chart[1].label, "2025-11");
        assert_eq!(chart[1].income, dec!(4_000_000));
    }
}
