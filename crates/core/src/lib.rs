//! Core business logic for Getah.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, classification rules, and calculations live here.
//!
//! # Modules
//!
//! - `period` - Report time-window resolution
//! - `classify` - Category-to-bucket partitioning rules
//! - `report` - Financial report aggregation over ledger snapshots
//! - `kasbon` - Cash-advance settlement planning
//! - `payroll` - Net-pay breakdown calculation

pub mod classify;
pub mod kasbon;
pub mod payroll;
pub mod period;
pub mod report;
