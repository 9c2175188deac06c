// ── Expiry window filter ──

use super::date::CalendarDay;
use crate::model::Member;

/// Members whose membership ends within `[today, today + window_days]`.
///
/// Input order is kept. Members without an end date are skipped. A
/// negative window is treated as `0`, i.e. "ending today".
pub fn expiring_within(members: &[Member], today: CalendarDay, window_days: i64) -> Vec<&Member> {
    let window = u64::try_from(window_days).unwrap_or(0);
    let last_day = today.saturating_add_days(window);

    members
        .iter()
        .filter(|m| m.end_date.is_some_and(|end| today <= end && end <= last_day))
        .collect()
}
