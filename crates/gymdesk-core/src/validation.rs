// ── Form validation ──
//
// Drafts are what a user typed; validating one yields the wire payload
// or the first rule it breaks. "Today" is passed in, never read here.

use std::path::Path;

use gymdesk_api::{MemberPayload, PlanPayload, RenewPayload, ResourceId};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use crate::membership::{CalendarDay, suggest_end_date, suggest_renewal_end};
use crate::model::{EntityId, Member, Plan, find_plan};

/// A rule a draft failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },

    #[error("Start date cannot be in the past")]
    StartInPast,

    #[error("End date cannot be before start date")]
    EndBeforeStart,

    #[error("New end date cannot be before current end date ({current_end})")]
    RenewalBeforeCurrentEnd { current_end: CalendarDay },

    #[error("Duration must be at least 1 month")]
    InvalidDuration,

    #[error("Price must be a non-negative number")]
    InvalidPrice,

    #[error("Please enter email/phone and password")]
    MissingCredentials,

    #[error("Please select a CSV file: {path}")]
    NotCsv { path: String },
}

/// Whether a member form creates a new member or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

// ── Members ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberDraft {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub plan_id: Option<EntityId>,
    pub start_date: Option<CalendarDay>,
    pub end_date: Option<CalendarDay>,
}

impl MemberDraft {
    /// Prefill an edit form from an existing member.
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            phone: member.phone.clone(),
            email: member.email.clone(),
            plan_id: member.effective_plan_id().cloned(),
            start_date: member.start_date,
            end_date: member.end_date,
        }
    }

    /// Fill a missing end date from the plan length when plan and start
    /// date are both known. Leaves an explicit end date alone.
    pub fn fill_suggested_end_date(&mut self, plans: &[Plan]) {
        if self.end_date.is_some() {
            return;
        }
        let (Some(start), Some(plan_id)) = (self.start_date, self.plan_id.as_ref()) else {
            return;
        };
        if let Some(plan) = find_plan(plans, plan_id) {
            self.end_date = Some(suggest_end_date(start, plan.months()));
        }
    }

    pub fn validate(
        &self,
        mode: FormMode,
        today: CalendarDay,
    ) -> Result<MemberPayload, ValidationError> {
        let name = required_text(&self.name, "Name")?;
        let phone = required_text(&self.phone, "Phone")?;
        let plan_id = self
            .plan_id
            .as_ref()
            .ok_or(ValidationError::MissingField { field: "Plan" })?;
        let start = self
            .start_date
            .ok_or(ValidationError::MissingField { field: "Start date" })?;
        let end = self
            .end_date
            .ok_or(ValidationError::MissingField { field: "End date" })?;

        if mode == FormMode::Create && start < today {
            return Err(ValidationError::StartInPast);
        }
        if end < start {
            return Err(ValidationError::EndBeforeStart);
        }

        Ok(MemberPayload {
            name,
            phone,
            email: self
                .email
                .as_deref()
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_owned),
            plan_id: ResourceId::from(plan_id),
            start_date: start.as_naive(),
            end_date: end.as_naive(),
        })
    }
}

// ── Renewals ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenewalDraft {
    pub plan_id: Option<EntityId>,
    pub new_end_date: Option<CalendarDay>,
}

impl RenewalDraft {
    /// Start a renewal for `member`, defaulting the plan to the member's
    /// current one and the end date to the plan's length from the later
    /// of the current end date and today.
    pub fn for_member(
        member: &Member,
        plan_id: Option<EntityId>,
        plans: &[Plan],
        today: CalendarDay,
    ) -> Self {
        let plan_id = plan_id.or_else(|| member.effective_plan_id().cloned());
        let new_end_date = plan_id
            .as_ref()
            .and_then(|id| find_plan(plans, id))
            .map(|plan| suggest_renewal_end(member.end_date, today, plan.months()));
        Self {
            plan_id,
            new_end_date,
        }
    }

    pub fn validate(
        &self,
        current_end: Option<CalendarDay>,
    ) -> Result<RenewPayload, ValidationError> {
        let plan_id = self
            .plan_id
            .as_ref()
            .ok_or(ValidationError::MissingField { field: "Plan" })?;
        let new_end = self
            .new_end_date
            .ok_or(ValidationError::MissingField { field: "New end date" })?;

        if let Some(current_end) = current_end {
            if new_end < current_end {
                return Err(ValidationError::RenewalBeforeCurrentEnd { current_end });
            }
        }

        Ok(RenewPayload {
            plan_id: ResourceId::from(plan_id),
            new_end_date: new_end.as_naive(),
        })
    }
}

// ── Plans ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanDraft {
    pub plan_name: String,
    pub duration_in_months: u32,
    pub price: f64,
}

impl PlanDraft {
    pub fn from_plan(plan: &Plan) -> Self {
        Self {
            plan_name: plan.name.clone(),
            duration_in_months: plan.months(),
            price: plan.price,
        }
    }

    pub fn validate(&self) -> Result<PlanPayload, ValidationError> {
        let plan_name = required_text(&self.plan_name, "Plan name")?;
        if self.duration_in_months == 0 {
            return Err(ValidationError::InvalidDuration);
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(ValidationError::InvalidPrice);
        }
        Ok(PlanPayload {
            plan_name,
            duration_in_months: self.duration_in_months,
            price: self.price,
        })
    }
}

// ── Login and import ────────────────────────────────────────────────

/// Trimmed login identifier, or an error if either credential is blank.
pub fn validate_login(
    identifier: &str,
    password: &SecretString,
) -> Result<String, ValidationError> {
    let identifier = identifier.trim();
    if identifier.is_empty() || password.expose_secret().is_empty() {
        return Err(ValidationError::MissingCredentials);
    }
    Ok(identifier.to_owned())
}

/// Only `.csv` files (any case) may be uploaded.
pub fn check_import_path(path: &Path) -> Result<(), ValidationError> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if is_csv {
        Ok(())
    } else {
        Err(ValidationError::NotCsv {
            path: path.display().to_string(),
        })
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(trimmed.to_owned())
    }
}
