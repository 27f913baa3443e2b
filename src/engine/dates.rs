//! Calendar date arithmetic.
//!
//! Dates carry no time of day. "Today" is the calendar date in a single
//! reference UTC offset, see [`Clock`].

use chrono::{FixedOffset, NaiveDate, Offset, Utc};

use crate::error::ValidationError;

/// Wire format for calendar dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date coming from a form field
pub fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Whole calendar days from `from` to `to`; negative when `to` is earlier
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// [`days_between`] on raw strings
pub fn days_between_str(from: &str, to: &str) -> Result<i64, ValidationError> {
    let from = parse_date("from", from)?;
    let to = parse_date("to", to)?;
    Ok(days_between(from, to))
}

/// Days overdue as used by the fine computation, never negative
pub fn days_overdue(due_date: NaiveDate, today: NaiveDate) -> i64 {
    days_between(due_date, today).max(0)
}

pub fn is_before(a: NaiveDate, b: NaiveDate) -> bool {
    a < b
}

pub fn is_today_or_later(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}

/// Source of the reference date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// Current date at the given UTC offset
    System(FixedOffset),
    /// Pinned date
    Fixed(NaiveDate),
}

impl Clock {
    /// Build a system clock from an offset in minutes east of UTC.
    ///
    /// Out-of-range offsets fall back to UTC.
    pub fn from_offset_minutes(minutes: i32) -> Self {
        let offset = FixedOffset::east_opt(minutes.saturating_mul(60)).unwrap_or_else(|| {
            tracing::warn!("Invalid UTC offset of {} minutes, using UTC", minutes);
            Utc.fix()
        });
        Clock::System(offset)
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System(offset) => Utc::now().with_timezone(offset).date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::from_offset_minutes(0)
    }
}
