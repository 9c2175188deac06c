// ── Snapshot ──
//
// One consistent view of the backend's members and plans. Replaced
// wholesale on refresh; never mutated in place.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::membership::{CalendarDay, Summary, expiring_within, summarize};
use crate::model::{EntityId, Member, Plan, find_plan};
use crate::search::search_members;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub members: Vec<Member>,
    pub plans: Vec<Plan>,
    /// `None` until the first successful fetch.
    pub fetched_at: Option<DateTime<Utc>>,
}

/// Summary counts plus the members ending soon.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub today: CalendarDay,
    pub window_days: i64,
    pub summary: Summary,
    pub expiring: Vec<Member>,
}

impl Snapshot {
    pub fn summary(&self, today: CalendarDay) -> Summary {
        summarize(&self.members, &self.plans, today)
    }

    pub fn dashboard(&self, today: CalendarDay, window_days: i64) -> Dashboard {
        Dashboard {
            today,
            window_days,
            summary: self.summary(today),
            expiring: expiring_within(&self.members, today, window_days)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    pub fn search(&self, query: &str) -> Vec<&Member> {
        search_members(&self.members, query)
    }

    pub fn plan(&self, id: &EntityId) -> Option<&Plan> {
        find_plan(&self.plans, id)
    }

    /// Find a member by id, or failing that by exact phone number.
    pub fn resolve_member(&self, key: &str) -> Option<&Member> {
        let key = key.trim();
        let id = EntityId::from(key);
        self.members
            .iter()
            .find(|m| m.id == id)
            .or_else(|| self.members.iter().find(|m| m.phone == key))
    }

    /// Find a plan by id, or failing that by name (ignoring case).
    pub fn resolve_plan(&self, key: &str) -> Option<&Plan> {
        let key = key.trim();
        let id = EntityId::from(key);
        self.plan(&id)
            .or_else(|| self.plans.iter().find(|p| p.name.eq_ignore_ascii_case(key)))
    }
}
