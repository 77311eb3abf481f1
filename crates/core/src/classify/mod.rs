//! Category-to-bucket partitioning rules.
//!
//! Every manual ledger row is classified into exactly one bucket by a
//! single declarative rule table, so the bank/cash/COGS/opex splits can
//! never drift apart between report sections. The table is validated
//! for completeness at startup; a gap refuses to boot rather than
//! silently miscounting money.

pub mod error;
pub mod rules;

#[cfg(test)]
mod tests;

pub use error::ClassifyError;
pub use rules::{
    Bucket, CATEGORY_RULES, CategoryRule, OPEX_EXCLUDED, ParseDirectionError, ParseSourceError,
    TrxDirection, TrxSource, categories, classify, counts_toward_opex, is_bank_withdrawal,
    is_manual_cogs, validate_rules,
};
