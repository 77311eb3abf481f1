//! Payroll computation.
//!
//! Builds the per-employee pay breakdown (base salary, meal allowance,
//! incentive, advance deduction) and the suggested deduction the
//! generate screen offers. Everything here is pure arithmetic; the
//! repository persists the result and runs the advance settlement.

pub mod service;
pub mod types;


pub use service::{LABEL_BASE_SALARY, LABEL_INCENTIVE, LABEL_KASBON, PayrollService};
pub use types::{
    DEFAULT_MEAL_DAYS, DEFAULT_MEAL_RATE, PayComponent, PayComponentKind, PayrollBreakdown,
    PayrollInputs,
};
