// Wire types for the membership backend.
//
// Response types are lenient: most fields are optional and a few carry
// aliases for older backend field names. Request types are strict and
// serialize exactly what the backend expects.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Identifiers ─────────────────────────────────────────────────────

/// Backend-assigned identifier: numeric on most deployments, text on some.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for ResourceId {
    /// Numeric text becomes `Number` so request bodies keep the backend's type.
    fn from(s: &str) -> Self {
        let trimmed = s.trim();
        trimmed
            .parse::<i64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number)
    }
}

// ── Responses ───────────────────────────────────────────────────────

/// A membership plan as returned by `GET /plans`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub id: ResourceId,
    #[serde(default, alias = "plan_name", alias = "name")]
    pub plan_name: Option<String>,
    #[serde(default, alias = "duration")]
    pub duration_in_months: Option<u32>,
    #[serde(default)]
    pub price: Option<f64>,
}

/// A member as returned by `GET /members`.
///
/// Dates are kept as raw text here; `gymdesk-core` normalizes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: ResourceId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub plan_id: Option<ResourceId>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    /// Denormalized plan snapshot, when the backend embeds one.
    #[serde(default)]
    pub plan: Option<PlanResponse>,
}

/// Admin and organization details from `GET /auth/profile`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    #[serde(default)]
    pub admin_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub gym_name: Option<String>,
    #[serde(default)]
    pub gym_address: Option<String>,
    #[serde(default)]
    pub gym_contact_number: Option<String>,
}

// ── Requests ────────────────────────────────────────────────────────

/// Body for `POST /members` and `PUT /members/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberPayload {
    pub name: String,
    pub phone: String,
    /// Serialized as `null` when absent.
    pub email: Option<String>,
    pub plan_id: ResourceId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Body for `POST /plans` and `PUT /plans/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanPayload {
    pub plan_name: String,
    pub duration_in_months: u32,
    pub price: f64,
}

/// Body for `PUT /members/{id}/renew`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewPayload {
    pub plan_id: ResourceId,
    pub new_end_date: NaiveDate,
}
