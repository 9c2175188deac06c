// ── Wire → domain conversion ──
//
// The only place raw backend text becomes domain values. Dates are
// normalized here; anything unreadable becomes "no date" with a warning.

use gymdesk_api::{MemberResponse, PlanResponse, ProfileResponse};
use tracing::warn;

use crate::membership::{CalendarDay, normalize_optional};
use crate::model::{AdminProfile, EntityId, Member, Plan};

impl From<PlanResponse> for Plan {
    fn from(p: PlanResponse) -> Self {
        Self {
            id: EntityId::from(p.id),
            name: p.plan_name.unwrap_or_default(),
            duration_in_months: p.duration_in_months,
            price: p.price.unwrap_or(0.0),
        }
    }
}

impl From<MemberResponse> for Member {
    fn from(m: MemberResponse) -> Self {
        let id = EntityId::from(m.id);
        let start_date = member_date(&id, "startDate", m.start_date.as_deref());
        let end_date = member_date(&id, "endDate", m.end_date.as_deref());

        Self {
            start_date,
            end_date,
            name: m.name.unwrap_or_default(),
            phone: m.phone.unwrap_or_default(),
            email: m.email.filter(|e| !e.trim().is_empty()),
            plan_id: m.plan_id.map(EntityId::from),
            plan: m.plan.map(Plan::from),
            id,
        }
    }
}

impl From<ProfileResponse> for AdminProfile {
    fn from(p: ProfileResponse) -> Self {
        Self {
            admin_name: p.admin_name,
            email: p.email,
            phone: p.phone,
            gym_name: p.gym_name,
            gym_address: p.gym_address,
            gym_contact_number: p.gym_contact_number,
        }
    }
}

fn member_date(id: &EntityId, field: &str, raw: Option<&str>) -> Option<CalendarDay> {
    match normalize_optional(raw) {
        Ok(day) => day,
        Err(e) => {
            warn!(member_id = %id, field, error = %e, "dropping unreadable date");
            None
        }
    }
}
