// ── Member domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;
use super::plan::Plan;
use crate::membership::{CalendarDay, MembershipStatus, classify};

/// A gym member with normalized dates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: EntityId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub plan_id: Option<EntityId>,
    pub start_date: Option<CalendarDay>,
    pub end_date: Option<CalendarDay>,
    /// Plan snapshot embedded by the backend, for display.
    pub plan: Option<Plan>,
}

impl Member {
    /// `plan_id`, or else the embedded plan's id.
    pub fn effective_plan_id(&self) -> Option<&EntityId> {
        self.plan_id
            .as_ref()
            .or_else(|| self.plan.as_ref().map(|p| &p.id))
    }

    /// Status as of `today`; `None` without an end date.
    pub fn status(&self, today: CalendarDay) -> Option<MembershipStatus> {
        self.end_date.map(|end| classify(today, end))
    }

    /// Name of the member's plan, preferring the collection over the
    /// embedded snapshot.
    pub fn plan_name<'a>(&'a self, plans: &'a [Plan]) -> Option<&'a str> {
        self.effective_plan_id()
            .and_then(|id| super::plan::find_plan(plans, id))
            .or(self.plan.as_ref())
            .map(|p| p.name.as_str())
    }
}
