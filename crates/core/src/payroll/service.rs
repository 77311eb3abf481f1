//! Pay slip computation service.

use rust_decimal::Decimal;

use crate::kasbon::OutstandingAdvance;

use super::types::{PayComponent, PayComponentKind, PayrollBreakdown, PayrollInputs};

/// Slip line labels as they appear on the printed slip and in the items
/// table.
pub const LABEL_BASE_SALARY: &str = "Gaji Pokok";
pub const LABEL_INCENTIVE: &str = "Insentif";
pub const LABEL_KASBON: &str = "Potongan Kasbon";

/// Stateless payroll arithmetic.
pub struct PayrollService;

impl PayrollService {
    /// Builds the pay slip for one employee.
    ///
    /// Components with a zero amount are left off the slip entirely, the
    /// way the admin expects a printed slip to read. The meal line names
    /// the days and daily rate it was computed from.
    #[must_use]
    pub fn build_breakdown(inputs: &PayrollInputs) -> PayrollBreakdown {
        let base = if inputs.include_base {
            inputs.base_salary
        } else {
            Decimal::ZERO
        };
        let meal = if inputs.include_meal {
            inputs.meal_rate * Decimal::from(inputs.meal_days)
        } else {
            Decimal::ZERO
        };
        let deduction = if inputs.include_kasbon {
            inputs.kasbon_deduction
        } else {
            Decimal::ZERO
        };

        let mut components = Vec::new();
        if base > Decimal::ZERO {
            components.push(PayComponent {
                label: LABEL_BASE_SALARY.to_string(),
                kind: PayComponentKind::Earning,
                amount: base,
            });
        }
        if meal > Decimal::ZERO {
            components.push(PayComponent {
                label: format!(
                    "Uang Makan ({} hari x Rp {})",
                    inputs.meal_days,
                    group_thousands(inputs.meal_rate)
                ),
                kind: PayComponentKind::Earning,
                amount: meal,
            });
        }
        if inputs.incentive > Decimal::ZERO {
            components.push(PayComponent {
                label: LABEL_INCENTIVE.to_string(),
                kind: PayComponentKind::Earning,
                amount: inputs.incentive,
            });
        }
        if deduction > Decimal::ZERO {
            components.push(PayComponent {
                label: LABEL_KASBON.to_string(),
                kind: PayComponentKind::Deduction,
                amount: deduction,
            });
        }

        let total_income = base + meal + inputs.incentive;
        let total_deduction = deduction;

        PayrollBreakdown {
            components,
            total_income,
            total_deduction,
            net_pay: total_income - total_deduction,
        }
    }

    /// Total open debt across an employee's advances.
    ///
    /// Each advance is clamped at zero before summing, so one overshot
    /// repayment cannot hide debt still open elsewhere.
    #[must_use]
    pub fn total_outstanding(advances: &[OutstandingAdvance]) -> Decimal {
        advances
            .iter()
            .map(|adv| adv.outstanding().max(Decimal::ZERO))
            .sum()
    }

    /// Deduction the generate screen suggests: the full open debt, capped
    /// at half the base salary so no payout goes negative by default.
    #[must_use]
    pub fn suggest_deduction(outstanding: Decimal, base_salary: Decimal) -> Decimal {
        let cap = base_salary * Decimal::new(5, 1);
        outstanding.min(cap)
    }
}

/// Renders the integer part of an amount with dots for thousands, the
/// local convention for rupiah figures.
fn group_thousands(value: Decimal) -> String {
    let whole = value.trunc().to_string();
    let (sign, digits) = whole
        .strip_prefix('-')
        .map_or(("", whole.as_str()), |rest| ("-", rest));

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
