//! Tests for the category rule table.

use rstest::rstest;

use super::error::ClassifyError;
use super::rules::{
    Bucket, CATEGORY_RULES, CategoryRule, TrxDirection, TrxSource, categories, classify,
    counts_toward_opex, is_bank_withdrawal, is_manual_cogs, validate_rules,
};

#[test]
fn test_production_table_is_valid() {
    assert_eq!(validate_rules(CATEGORY_RULES), Ok(()));
}

#[rstest]
#[case(TrxSource::Bank, TrxDirection::Income, "Penjualan Lain", Bucket::BankInManual)]
#[case(TrxSource::Bank, TrxDirection::Expense, "Pembayaran Kapal", Bucket::BankOutManual)]
#[case(TrxSource::Bank, TrxDirection::Expense, "Penarikan Bank", Bucket::BankOutManual)]
#[case(TrxSource::Cash, TrxDirection::Income, "Setoran", Bucket::CashInManual)]
#[case(
    TrxSource::Cash,
    TrxDirection::Expense,
    "Pembayaran Penoreh",
    Bucket::CashOutBayarPenoreh
)]
#[case(
    TrxSource::Cash,
    TrxDirection::Expense,
    "Pembelian Karet",
    Bucket::CashOutBeliKaret
)]
#[case(
    TrxSource::Cash,
    TrxDirection::Expense,
    "Operasional Lapangan",
    Bucket::CashOutLainnya
)]
#[case(
    TrxSource::Cash,
    TrxDirection::Expense,
    "Kategori Baru Apapun",
    Bucket::CashOutLainnya
)]
fn test_classify(
    #[case] source: TrxSource,
    #[case] direction: TrxDirection,
    #[case] category: &str,
    #[case] expected: Bucket,
) {
    assert_eq!(classify(source, direction, category), expected);
}

#[test]
fn test_cogs_categories_never_land_in_lainnya() {
    assert_eq!(
        classify(
            TrxSource::Cash,
            TrxDirection::Expense,
            categories::PEMBAYARAN_PENOREH
        ),
        Bucket::CashOutBayarPenoreh
    );
    assert_eq!(
        classify(
            TrxSource::Cash,
            TrxDirection::Expense,
            categories::PEMBELIAN_KARET
        ),
        Bucket::CashOutBeliKaret
    );
}

#[test]
fn test_bank_withdrawal_matches_any_direction() {
    assert!(is_bank_withdrawal(
        TrxSource::Bank,
        categories::PENARIKAN_BANK
    ));
    // Not a cash-in when booked on the cash side.
    assert!(!is_bank_withdrawal(
        TrxSource::Cash,
        categories::PENARIKAN_BANK
    ));
    assert!(!is_bank_withdrawal(TrxSource::Bank, "Bayar Hutang"));
}

#[rstest]
#[case("Operasional Lapangan", true)]
#[case("Operasional Kantor", true)]
#[case("BPJS Ketenagakerjaan", true)]
#[case("Kategori Tak Dikenal", true)]
#[case("Pembelian Karet", false)]
#[case("Penarikan Bank", false)]
#[case("Pembayaran Penoreh", false)]
fn test_opex_exclusion_list(#[case] category: &str, #[case] expected: bool) {
    assert_eq!(counts_toward_opex(TrxDirection::Expense, category), expected);
}

#[test]
fn test_income_never_counts_toward_opex() {
    assert!(!counts_toward_opex(
        TrxDirection::Income,
        "Operasional Kantor"
    ));
}

#[test]
fn test_manual_cogs_matches_category_alone() {
    assert!(is_manual_cogs(categories::PEMBELIAN_KARET));
    assert!(!is_manual_cogs(categories::PEMBAYARAN_PENOREH));
    assert!(!is_manual_cogs("Pembelian Truk"));
}

#[test]
fn test_validation_rejects_uncovered_quadrant() {
    // Cash expense quadrant has only specific rules, no catch-all.
    let rules = [
        CategoryRule {
            source: TrxSource::Bank,
            direction: TrxDirection::Income,
            category: None,
            bucket: Bucket::BankInManual,
        },
        CategoryRule {
            source: TrxSource::Bank,
            direction: TrxDirection::Expense,
            category: None,
            bucket: Bucket::BankOutManual,
        },
        CategoryRule {
            source: TrxSource::Cash,
            direction: TrxDirection::Income,
            category: None,
            bucket: Bucket::CashInManual,
        },
        CategoryRule {
            source: TrxSource::Cash,
            direction: TrxDirection::Expense,
            category: Some(categories::PEMBELIAN_KARET),
            bucket: Bucket::CashOutBeliKaret,
        },
    ];

    assert_eq!(
        validate_rules(&rules),
        Err(ClassifyError::UncoveredQuadrant {
            source: TrxSource::Cash,
            direction: TrxDirection::Expense,
        })
    );
}

#[test]
fn test_validation_rejects_duplicate_key() {
    let mut rules = CATEGORY_RULES.to_vec();
    rules.push(CategoryRule {
        source: TrxSource::Cash,
        direction: TrxDirection::Expense,
        category: Some(categories::PEMBELIAN_KARET),
        bucket: Bucket::CashOutLainnya,
    });

    assert!(matches!(
        validate_rules(&rules),
        Err(ClassifyError::DuplicateRule { .. })
    ));
}

#[test]
fn test_validation_rejects_rule_shadowed_by_catch_all() {
    let rules = [
        CategoryRule {
            source: TrxSource::Cash,
            direction: TrxDirection::Income,
            category: None,
            bucket: Bucket::CashInManual,
        },
        CategoryRule {
            source: TrxSource::Cash,
            direction: TrxDirection::Income,
            category: Some("Setoran Modal"),
            bucket: Bucket::CashInManual,
        },
    ];

    assert_eq!(
        validate_rules(&rules),
        Err(ClassifyError::UnreachableRule {
            source: TrxSource::Cash,
            direction: TrxDirection::Income,
            category: "Setoran Modal",
        })
    );
}

#[test]
fn test_source_and_direction_round_trip() {
    for source in [TrxSource::Cash, TrxSource::Bank] {
        assert_eq!(source.as_str().parse::<TrxSource>(), Ok(source));
    }
    for direction in [TrxDirection::Income, TrxDirection::Expense] {
        assert_eq!(direction.as_str().parse::<TrxDirection>(), Ok(direction));
    }
    assert!("transfer".parse::<TrxSource>().is_err());
    assert!("refund".parse::<TrxDirection>().is_err());
}
