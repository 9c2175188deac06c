// ── Status classifier ──

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::date::CalendarDay;

/// Highest `days_left` still classed as [`Bucket::Critical`].
pub const CRITICAL_MAX_DAYS: i64 = 3;
/// Highest `days_left` still classed as [`Bucket::Warning`].
pub const WARNING_MAX_DAYS: i64 = 7;

/// Urgency of a membership relative to today.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Bucket {
    Expired,
    Critical,
    Warning,
    Active,
}

impl Bucket {
    fn from_days_left(days_left: i64) -> Self {
        match days_left {
            d if d < 0 => Self::Expired,
            d if d <= CRITICAL_MAX_DAYS => Self::Critical,
            d if d <= WARNING_MAX_DAYS => Self::Warning,
            _ => Self::Active,
        }
    }
}

/// Derived status of one membership. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipStatus {
    pub days_left: i64,
    pub bucket: Bucket,
}

impl MembershipStatus {
    /// `Expired` or `N days`.
    pub fn label(&self) -> String {
        if self.days_left < 0 {
            "Expired".to_owned()
        } else {
            format!("{} days", self.days_left)
        }
    }
}

/// Classify a membership ending on `end_date` as seen on `today`.
///
/// A membership ending today has zero days left and is critical.
pub fn classify(today: CalendarDay, end_date: CalendarDay) -> MembershipStatus {
    let days_left = today.days_until(end_date);
    MembershipStatus {
        days_left,
        bucket: Bucket::from_days_left(days_left),
    }
}
