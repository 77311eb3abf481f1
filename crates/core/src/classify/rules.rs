//! The declarative category rule table.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use super::error::ClassifyError;

/// Well-known category literals used by the business.
///
/// These are data-entry values, not display labels; they must match the
/// strings stored on manual transactions byte for byte.
pub mod categories {
    /// Boat freight payment (bank expense).
    pub const PEMBAYARAN_KAPAL: &str = "Pembayaran Kapal";
    /// Truck freight payment (bank expense).
    pub const PEMBAYARAN_TRUCK: &str = "Pembayaran Truck";
    /// Debt repayment (bank expense).
    pub const BAYAR_HUTANG: &str = "Bayar Hutang";
    /// Bank withdrawal that funds the cash till.
    pub const PENARIKAN_BANK: &str = "Penarikan Bank";
    /// Tapper wage payout (cash expense, COGS).
    pub const PEMBAYARAN_PENOREH: &str = "Pembayaran Penoreh";
    /// Rubber purchase (cash expense, COGS).
    pub const PEMBELIAN_KARET: &str = "Pembelian Karet";
    /// Field operations (cash expense, opex).
    pub const OPERASIONAL_LAPANGAN: &str = "Operasional Lapangan";
    /// Office operations (cash expense, opex).
    pub const OPERASIONAL_KANTOR: &str = "Operasional Kantor";
    /// Employment insurance premiums (cash expense, opex).
    pub const BPJS_KETENAGAKERJAAN: &str = "BPJS Ketenagakerjaan";
}

/// Where a manual transaction was paid from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrxSource {
    /// The physical cash till.
    Cash,
    /// The company bank account.
    Bank,
}

/// Whether a manual transaction brings money in or pays it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrxDirection {
    /// Money received.
    Income,
    /// Money paid out.
    Expense,
}

/// Unknown transaction source string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transaction source: {0}")]
pub struct ParseSourceError(pub String);

/// Unknown transaction direction string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transaction direction: {0}")]
pub struct ParseDirectionError(pub String);

impl TrxSource {
    /// Wire representation, matching the stored column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Bank => "bank",
        }
    }
}

impl FromStr for TrxSource {
    type Err = ParseSourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "bank" => Ok(Self::Bank),
            other => Err(ParseSourceError(other.to_string())),
        }
    }
}

impl TrxDirection {
    /// Wire representation, matching the stored column value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl FromStr for TrxDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// Disjoint destination buckets for manual transactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    /// Manual bank income.
    BankInManual,
    /// Manual bank expense (split into display sub-labels downstream).
    BankOutManual,
    /// Manual cash income.
    CashInManual,
    /// Cash paid to tappers (COGS, not opex).
    CashOutBayarPenoreh,
    /// Cash spent buying rubber (COGS, not opex).
    CashOutBeliKaret,
    /// Any other cash expense (opex unless excluded).
    CashOutLainnya,
}

/// One row of the rule table: `(source, direction, category)` to bucket.
///
/// `category: None` is the quadrant catch-all. Specific rows must come
/// before their quadrant's catch-all; first match wins.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    /// Transaction source this rule applies to.
    pub source: TrxSource,
    /// Transaction direction this rule applies to.
    pub direction: TrxDirection,
    /// Exact category literal, or `None` for the quadrant catch-all.
    pub category: Option<&'static str>,
    /// Destination bucket.
    pub bucket: Bucket,
}

/// The business-defined rule table.
///
/// Note the deliberate cross-ledger duplication that is NOT expressed
/// here: a bank expense categorized [`categories::PENARIKAN_BANK`] stays
/// in `BankOutManual`, and the cash ledger additionally counts the same
/// rupiah as cash-in via [`is_bank_withdrawal`]. That is how bank-to-cash
/// transfers are modeled; both ledgers are correct from their own side.
pub const CATEGORY_RULES: &[CategoryRule] = &[
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
        category: Some(categories::PEMBAYARAN_PENOREH),
        bucket: Bucket::CashOutBayarPenoreh,
    },
    CategoryRule {
        source: TrxSource::Cash,
        direction: TrxDirection::Expense,
        category: Some(categories::PEMBELIAN_KARET),
        bucket: Bucket::CashOutBeliKaret,
    },
    CategoryRule {
        source: TrxSource::Cash,
        direction: TrxDirection::Expense,
        category: None,
        bucket: Bucket::CashOutLainnya,
    },
];

/// Categories excluded from opex even though they are expenses.
///
/// Rubber purchases and tapper payouts are COGS; bank withdrawals are
/// transfers, not spending. This list must be applied identically in the
/// period and the cumulative computations.
pub const OPEX_EXCLUDED: &[&str] = &[
    categories::PEMBELIAN_KARET,
    categories::PENARIKAN_BANK,
    categories::PEMBAYARAN_PENOREH,
];

/// Classifies one manual transaction into its bucket.
#[must_use]
pub fn classify(source: TrxSource, direction: TrxDirection, category: &str) -> Bucket {
    for rule in CATEGORY_RULES {
        if rule.source == source
            && rule.direction == direction
            && rule.category.is_none_or(|c| c == category)
        {
            return rule.bucket;
        }
    }

    // A validated table always ends each quadrant with a catch-all, so
    // this fallback mirrors those catch-alls for safety.
    match (source, direction) {
        (TrxSource::Bank, TrxDirection::Income) => Bucket::BankInManual,
        (TrxSource::Bank, TrxDirection::Expense) => Bucket::BankOutManual,
        (TrxSource::Cash, TrxDirection::Income) => Bucket::CashInManual,
        (TrxSource::Cash, TrxDirection::Expense) => Bucket::CashOutLainnya,
    }
}

/// Checks a rule table for completeness and internal consistency.
///
/// Run once at startup against [`CATEGORY_RULES`]; the server refuses to
/// boot on failure so classification gaps never reach production data.
///
/// # Errors
///
/// Returns the first gap found: an uncovered quadrant, a duplicate key,
/// or a rule shadowed by an earlier catch-all.
pub fn validate_rules(rules: &[CategoryRule]) -> Result<(), ClassifyError> {
    const QUADRANTS: [(TrxSource, TrxDirection); 4] = [
        (TrxSource::Cash, TrxDirection::Income),
        (TrxSource::Cash, TrxDirection::Expense),
        (TrxSource::Bank, TrxDirection::Income),
        (TrxSource::Bank, TrxDirection::Expense),
    ];

    for (i, rule) in rules.iter().enumerate() {
        for earlier in &rules[..i] {
            if earlier.source != rule.source || earlier.direction != rule.direction {
                continue;
            }
            if earlier.category == rule.category {
                return Err(ClassifyError::DuplicateRule {
                    source: rule.source,
                    direction: rule.direction,
                    category: rule.category,
                });
            }
            if earlier.category.is_none() {
                if let Some(category) = rule.category {
                    return Err(ClassifyError::UnreachableRule {
                        source: rule.source,
                        direction: rule.direction,
                        category,
                    });
                }
            }
        }
    }

    for (source, direction) in QUADRANTS {
        let covered = rules
            .iter()
            .any(|r| r.source == source && r.direction == direction && r.category.is_none());
        if !covered {
            return Err(ClassifyError::UncoveredQuadrant { source, direction });
        }
    }

    Ok(())
}

/// True for the bank-withdrawal rows the cash ledger counts as cash-in.
///
/// Direction is deliberately ignored: the cash side matches the category
/// on any bank row, exactly as the books have always been kept.
#[must_use]
pub fn is_bank_withdrawal(source: TrxSource, category: &str) -> bool {
    source == TrxSource::Bank && category == categories::PENARIKAN_BANK
}

/// True if an expense in this category counts toward operating expenses.
#[must_use]
pub fn counts_toward_opex(direction: TrxDirection, category: &str) -> bool {
    direction == TrxDirection::Expense && !OPEX_EXCLUDED.contains(&category)
}

/// True for manual rows that count toward cost of goods sold.
///
/// Source and direction are ignored on purpose; COGS matches the
/// category alone, wherever the row was booked.
#[must_use]
pub fn is_manual_cogs(category: &str) -> bool {
    category == categories::PEMBELIAN_KARET
}
