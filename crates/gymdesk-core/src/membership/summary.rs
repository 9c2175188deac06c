// ── Aggregate counter ──

use serde::Serialize;

use super::date::CalendarDay;
use crate::model::{Member, Plan};

/// Headline counts for the dashboard.
///
/// `active` counts every member whose end date is today or later, so it
/// includes the critical and warning buckets. Members without an end date
/// only appear in `total_members`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Summary {
    pub total_members: usize,
    pub active_members: usize,
    pub expired_members: usize,
    pub total_plans: usize,
}

pub fn summarize(members: &[Member], plans: &[Plan], today: CalendarDay) -> Summary {
    let (active_members, expired_members) =
        members
            .iter()
            .filter_map(|m| m.end_date)
            .fold((0, 0), |(active, expired), end| {
                if end >= today {
                    (active + 1, expired)
                } else {
                    (active, expired + 1)
                }
            });

    Summary {
        total_members: members.len(),
        active_members,
        expired_members,
        total_plans: plans.len(),
    }
}
