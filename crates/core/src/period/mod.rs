//! Report time-window resolution.
//!
//! Every report request carries a time-period mode plus an optional
//! month/year pair. This module turns that input into a concrete
//! [`Period`] (possibly unbounded) that all sub-reports share.

pub mod types;


pub use types::{Granularity, Period, ReportRange};
