//! Period types and resolution logic.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Requested report time window, as named by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportRange {
    /// A specific calendar month.
    SpecificMonth {
        /// Month (1-12).
        month: u32,
        /// Calendar year.
        year: i32,
    },
    /// The current calendar month.
    ThisMonth,
    /// The current calendar year.
    ThisYear,
    /// No time filter.
    AllTime,
}

/// Chart bucketing granularity derived from the range width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One bucket per calendar day.
    Day,
    /// One bucket per calendar month.
    Month,
}

/// A resolved time window. `None` bounds mean unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Inclusive upper bound.
    pub end: Option<NaiveDate>,
    /// Bucketing granularity for time series.
    pub granularity: Granularity,
}

impl ReportRange {
    /// Builds a range from raw request input.
    ///
    /// A missing mode means the current month. An unrecognized mode means
    /// no time filter. `specific-month` falls back to the current month
    /// and year for whichever part is absent.
    #[must_use]
    pub fn from_request(
        mode: Option<&str>,
        month: Option<u32>,
        year: Option<i32>,
        today: NaiveDate,
    ) -> Self {
        match mode {
            None | Some("this-month") => Self::ThisMonth,
            Some("specific-month") => Self::SpecificMonth {
                month: month.unwrap_or_else(|| today.month()),
                year: year.unwrap_or_else(|| today.year()),
            },
            Some("this-year") => Self::ThisYear,
            Some(_) => Self::AllTime,
        }
    }

    /// Resolves the range into a concrete period relative to `today`.
    ///
    /// Never fails: an out-of-range month/year yields a window that
    /// matches nothing, which downstream aggregation reports as zeros.
    #[must_use]
    pub fn resolve(&self, today: NaiveDate) -> Period {
        match *self {
            Self::SpecificMonth { month, year } => {
                month_bounds(year, month).map_or_else(Period::empty, |(start, end)| Period {
                    start: Some(start),
                    end: Some(end),
                    granularity: Granularity::Day,
                })
            }
            Self::ThisMonth => {
                month_bounds(today.year(), today.month()).map_or_else(Period::empty, |(s, e)| {
                    Period {
                        start: Some(s),
                        end: Some(e),
                        granularity: Granularity::Day,
                    }
                })
            }
            Self::ThisYear => Period {
                start: NaiveDate::from_ymd_opt(today.year(), 1, 1),
                end: NaiveDate::from_ymd_opt(today.year(), 12, 31),
                granularity: Granularity::Month,
            },
            Self::AllTime => Period::all_time(),
        }
    }

    /// Mode string as accepted on the wire.
    #[must_use]
    pub const fn mode(&self) -> &'static str {
        match self {
            Self::SpecificMonth { .. } => "specific-month",
            Self::ThisMonth => "this-month",
            Self::ThisYear => "this-year",
            Self::AllTime => "all-time",
        }
    }
}

impl Period {
    /// A fully unbounded period with monthly chart bucketing.
    #[must_use]
    pub const fn all_time() -> Self {
        Self {
            start: None,
            end: None,
            granularity: Granularity::Month,
        }
    }

    /// A period that matches no date at all.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            start: Some(NaiveDate::MAX),
            end: Some(NaiveDate::MIN),
            granularity: Granularity::Day,
        }
    }

    /// Returns true if the given date falls inside this period.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|s| date >= s) && self.end.is_none_or(|e| date <= e)
    }
}

/// First and last day of a calendar month, if the month is valid.
fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next_month.pred_opt()?))
}
