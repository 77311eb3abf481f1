//! Advance status and settlement plan types.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Repayment status of a cash advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KasbonStatus {
    Unpaid,
    Partial,
    Paid,
}

/// Error for an unrecognized status string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown kasbon status: {0:?}")]
pub struct ParseStatusError(pub String);

impl KasbonStatus {
    /// Status string as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

impl FromStr for KasbonStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unpaid" => Ok(Self::Unpaid),
            "partial" => Ok(Self::Partial),
            "paid" => Ok(Self::Paid),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// One outstanding advance as loaded (and row-locked) by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutstandingAdvance {
    pub kasbon_id: i64,
    /// Effective date used for oldest-first ordering.
    pub effective_date: NaiveDate,
    /// Principal lent.
    pub amount: Decimal,
    /// Sum of repayments recorded so far.
    pub paid_sum: Decimal,
}

impl OutstandingAdvance {
    /// Debt still open on this advance. Negative when repayments have
    /// overshot the principal.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.amount - self.paid_sum
    }
}

/// One step of a settlement plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettlementAction {
    /// The advance was already covered; only its stale status is fixed.
    MarkPaid { kasbon_id: i64 },
    /// Record a repayment and move the advance to `new_status`.
    Pay {
        kasbon_id: i64,
        amount: Decimal,
        new_status: KasbonStatus,
    },
}

/// Deterministic settlement plan for one employee's wage deduction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettlementPlan {
    pub actions: Vec<SettlementAction>,
    /// Portion of the deduction turned into repayments.
    pub allocated: Decimal,
    /// Portion left over after every advance was covered.
    pub unallocated: Decimal,
}
