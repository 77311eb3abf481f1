//! Cash-advance (kasbon) settlement.
//!
//! Allocates a lump wage deduction across an employee's outstanding
//! advances oldest first, and derives advance status from the amounts
//! actually repaid. Planning is pure; the repository applies the
//! resulting actions inside the payroll transaction.

pub mod settlement;
pub mod types;


pub use settlement::{derive_status, plan_settlement};
pub use types::{
    KasbonStatus, OutstandingAdvance, ParseStatusError, SettlementAction, SettlementPlan,
};
