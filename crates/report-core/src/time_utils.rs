use chrono::NaiveDate;
use serde::Serialize;

use crate::error::{ReportError, Result};

/// The only date format accepted in transaction rows.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Days counted as one year in [`DurationBreakdown`].
pub const DAYS_PER_YEAR: i64 = 365;

/// Days counted as one month in [`DurationBreakdown`].
pub const DAYS_PER_MONTH: i64 = 30;

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Parse a `MM/DD/YYYY` calendar date.
///
/// Surrounding whitespace is ignored. Impossible dates such as `02/30/2010`
/// are rejected rather than rolled over into the next month.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| ReportError::DateParse(text.to_string()))
}

// ── Day arithmetic ────────────────────────────────────────────────────────────

/// Whole days from `first` to `second`; negative when `second` is earlier.
pub fn days_between_dates(first: NaiveDate, second: NaiveDate) -> i64 {
    (second - first).num_days()
}

/// Parse both dates and return the whole days from `first` to `second`.
///
/// Dates are plain calendar days, so no timezone or daylight-saving shift can
/// change the result.
pub fn days_between(first: &str, second: &str) -> Result<i64> {
    let first = parse_date(first)?;
    let second = parse_date(second)?;
    Ok(days_between_dates(first, second))
}

// ── DurationBreakdown ─────────────────────────────────────────────────────────

/// Approximate years / months / days split of a day count.
///
/// Years are 365 days and months are 30 days, so the parts do not line up with
/// the calendar: 360..=364 days come out as `0 years, 12 months` plus a day
/// remainder taken modulo 30 of the year remainder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DurationBreakdown {
    pub years: i64,
    pub months: i64,
    pub days: i64,
}

impl DurationBreakdown {
    pub fn from_days(total_days: i64) -> Self {
        let years = total_days / DAYS_PER_YEAR;
        let months = (total_days - years * DAYS_PER_YEAR) / DAYS_PER_MONTH;
        let days = (total_days % DAYS_PER_YEAR) % DAYS_PER_MONTH;
        Self {
            years,
            months,
            days,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
