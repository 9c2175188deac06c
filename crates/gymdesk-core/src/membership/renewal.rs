// ── Renewal date advisor ──

use chrono::{Months, NaiveDate};

use super::date::CalendarDay;

/// Suggested end date: `start` plus `months` calendar months.
///
/// Days past the end of the target month clamp to its last day, so
/// Jan 31 + 1 month is Feb 28 (Feb 29 in leap years). Saturates at the
/// last representable date. The result is only a default; forms may
/// override it.
pub fn suggest_end_date(start: CalendarDay, months: u32) -> CalendarDay {
    start
        .as_naive()
        .checked_add_months(Months::new(months))
        .unwrap_or(NaiveDate::MAX)
        .into()
}

/// Default new end date when renewing: the plan's length counted from the
/// current end date, or from today if that has already passed.
pub fn suggest_renewal_end(
    current_end: Option<CalendarDay>,
    today: CalendarDay,
    months: u32,
) -> CalendarDay {
    let from = current_end.map_or(today, |end| end.max(today));
    suggest_end_date(from, months)
}
