//! Payroll input and breakdown types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Attendance days assumed when the admin has not filled them in.
pub const DEFAULT_MEAL_DAYS: u32 = 26;

/// Daily meal allowance used when an employee has no rate of their own.
pub const DEFAULT_MEAL_RATE: Decimal = Decimal::from_parts(20_000, 0, 0, false, 0);

/// Whether a pay component adds to or subtracts from the payout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayComponentKind {
    #[serde(rename = "pendapatan")]
    Earning,
    #[serde(rename = "potongan")]
    Deduction,
}

impl PayComponentKind {
    /// Kind string as stored in the database.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Earning => "pendapatan",
            Self::Deduction => "potongan",
        }
    }
}

/// One line of a pay slip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayComponent {
    pub label: String,
    pub kind: PayComponentKind,
    pub amount: Decimal,
}

/// Raw figures for one employee in a payroll run.
///
/// The `include_*` switches come from the run as a whole: the admin can
/// pay a round without base salary (mid-month top-up), without meal
/// allowance, or without touching advances. Incentive has no switch; it
/// is always paid as entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInputs {
    pub base_salary: Decimal,
    pub incentive: Decimal,
    pub meal_days: u32,
    pub meal_rate: Decimal,
    pub kasbon_deduction: Decimal,
    pub include_base: bool,
    pub include_meal: bool,
    pub include_kasbon: bool,
}

impl Default for PayrollInputs {
    fn default() -> Self {
        Self {
            base_salary: Decimal::ZERO,
            incentive: Decimal::ZERO,
            meal_days: DEFAULT_MEAL_DAYS,
            meal_rate: DEFAULT_MEAL_RATE,
            kasbon_deduction: Decimal::ZERO,
            include_base: true,
            include_meal: true,
            include_kasbon: true,
        }
    }
}

/// Computed pay slip for one employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// Slip lines in display order; zero-amount lines are omitted.
    pub components: Vec<PayComponent>,
    pub total_income: Decimal,
    pub total_deduction: Decimal,
    pub net_pay: Decimal,
}

impl PayrollBreakdown {
    /// True when the run would record nothing for this employee. Such
    /// rows are skipped rather than stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_income == Decimal::ZERO && self.total_deduction == Decimal::ZERO
    }
}
