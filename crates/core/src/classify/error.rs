//! Classification rule errors.

use std::fmt;

use super::rules::{TrxDirection, TrxSource};

/// Errors raised by rule-table validation.
///
/// `Display` and `Error` are implemented by hand because thiserror would
/// treat the `source` fields (a [`TrxSource`], not a cause) as the error
/// source and require it to implement `Error`.
#[derive(Debug, PartialEq, Eq)]
pub enum ClassifyError {
    /// A (source, direction) quadrant has no catch-all rule.
    UncoveredQuadrant {
        /// Transaction source.
        source: TrxSource,
        /// Transaction direction.
        direction: TrxDirection,
    },

    /// Two rules claim the same (source, direction, category) key.
    DuplicateRule {
        /// Transaction source.
        source: TrxSource,
        /// Transaction direction.
        direction: TrxDirection,
        /// Category literal, if the rule is category-specific.
        category: Option<&'static str>,
    },

    /// A rule is listed after its quadrant's catch-all and can never match.
    UnreachableRule {
        /// Transaction source.
        source: TrxSource,
        /// Transaction direction.
        direction: TrxDirection,
        /// Category literal of the shadowed rule.
        category: &'static str,
    },
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UncoveredQuadrant { source, direction } => {
                write!(
                    f,
                    "no catch-all rule for source={source:?} direction={direction:?}"
                )
            }
            Self::DuplicateRule {
                source,
                direction,
                category,
            } => {
                write!(
                    f,
                    "duplicate rule for source={source:?} direction={direction:?} category={category:?}"
                )
            }
            Self::UnreachableRule {
                source,
                direction,
                category,
            } => {
                write!(
                    f,
                    "unreachable rule for source={source:?} direction={direction:?} category={category:?}"
                )
            }
        }
    }
}

impl std::error::Error for ClassifyError {}
