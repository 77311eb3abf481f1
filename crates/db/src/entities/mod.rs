//! `SeaORM` entity definitions for the operational ledgers.

pub mod employees;
pub mod financial_transactions;
pub mod incoming_stocks;
pub mod kasbon_payments;
pub mod kasbons;
pub mod outgoing_stocks;
pub mod payroll_items;
pub mod payrolls;
