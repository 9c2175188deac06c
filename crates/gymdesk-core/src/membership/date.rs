// ── Date normalization ──
//
// Server dates arrive as plain ISO dates or as timestamps with or without
// an offset. Everything downstream compares whole calendar days, so the
// time-of-day is dropped here, once.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The input could not be read as a date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date: {input:?}")]
pub struct InvalidDateError {
    pub input: String,
}

/// A date with day precision: no time-of-day, no time zone.
///
/// Ordered chronologically. Displays as ISO `YYYY-MM-DD`; use
/// [`short`](Self::short) for the `15-Nov-2025` table form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalendarDay(NaiveDate);

impl CalendarDay {
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn as_naive(self) -> NaiveDate {
        self.0
    }

    /// Signed whole days from `self` to `later` (negative if `later` is earlier).
    pub fn days_until(self, later: Self) -> i64 {
        (later.0 - self.0).num_days()
    }

    /// `self + days`, saturating at the last representable date.
    pub fn saturating_add_days(self, days: u64) -> Self {
        Self(self.0.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX))
    }

    /// `15-Nov-2025` form used in tables.
    pub fn short(self) -> String {
        self.0.format("%d-%b-%Y").to_string()
    }
}

impl From<NaiveDate> for CalendarDay {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDay> for NaiveDate {
    fn from(day: CalendarDay) -> Self {
        day.0
    }
}

impl fmt::Display for CalendarDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for CalendarDay {
    type Err = InvalidDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

// ── Normalizer ──────────────────────────────────────────────────────

/// Anything that can be reduced to a [`CalendarDay`].
pub trait DateValue {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError>;
}

/// Reduce a date-like value to its calendar day.
///
/// Text is accepted as `YYYY-MM-DD`, RFC 3339 (`2025-11-10T18:30:00Z`,
/// `...+05:30`), `...+0530`, or a naive `YYYY-MM-DD[T ]HH:MM:SS[.f]`.
/// Timestamps keep the day as written in their own offset. Callers
/// decide what an empty value means before calling; here it is invalid.
pub fn normalize<V: DateValue + ?Sized>(value: &V) -> Result<CalendarDay, InvalidDateError> {
    value.to_calendar_day()
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

impl DateValue for str {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        let s = self.trim();

        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(CalendarDay(date));
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(CalendarDay(dt.date_naive()));
        }
        if let Ok(dt) = DateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f%z") {
            return Ok(CalendarDay(dt.date_naive()));
        }
        for fmt in NAIVE_DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
                return Ok(CalendarDay(dt.date()));
            }
        }

        Err(InvalidDateError {
            input: self.to_owned(),
        })
    }
}

impl DateValue for String {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        self.as_str().to_calendar_day()
    }
}

impl DateValue for CalendarDay {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        Ok(*self)
    }
}

impl DateValue for NaiveDate {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        Ok(CalendarDay(*self))
    }
}

impl DateValue for NaiveDateTime {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        Ok(CalendarDay(self.date()))
    }
}

impl<Tz: TimeZone> DateValue for DateTime<Tz> {
    fn to_calendar_day(&self) -> Result<CalendarDay, InvalidDateError> {
        Ok(CalendarDay(self.date_naive()))
    }
}

/// Normalize an optional server field: absent or blank means "no date".
///
/// Only non-blank, unparsable text is an error.
pub fn normalize_optional(value: Option<&str>) -> Result<Option<CalendarDay>, InvalidDateError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => normalize(text).map(Some),
    }
}
