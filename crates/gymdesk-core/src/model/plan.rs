// ── Plan domain type ──

use serde::{Deserialize, Serialize};

use super::entity_id::EntityId;

/// A membership plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub id: EntityId,
    pub name: String,
    /// `None` when the backend omitted it.
    pub duration_in_months: Option<u32>,
    /// Display only.
    pub price: f64,
}

impl Plan {
    /// Months used for date suggestions; unknown durations suggest nothing.
    pub fn months(&self) -> u32 {
        self.duration_in_months.unwrap_or(0)
    }

    /// `Gold - 3 months (₹2500)`.
    pub fn label(&self) -> String {
        let duration = match self.duration_in_months {
            Some(1) => "1 month".to_owned(),
            Some(n) => format!("{n} months"),
            None => "? months".to_owned(),
        };
        format!("{} - {duration} (₹{})", self.name, self.price)
    }
}

/// Look a plan up by id.
pub fn find_plan<'a>(plans: &'a [Plan], id: &EntityId) -> Option<&'a Plan> {
    plans.iter().find(|p| &p.id == id)
}
