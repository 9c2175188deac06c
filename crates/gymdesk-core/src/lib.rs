//! Domain layer between `gymdesk-api` and the CLI.
//!
//! - **[`membership`]**: the membership status engine. Pure functions that
//!   normalize dates, classify memberships into urgency buckets, filter the
//!   ones ending soon, count totals and suggest renewal end dates. Nothing
//!   in it performs I/O; "today" is always an argument.
//!
//! - **[`GymDesk`]**: facade over the API client. Fetches members and
//!   plans concurrently into an atomically swapped [`Snapshot`] and
//!   re-fetches after every change.
//!
//! - **Domain model** ([`model`]): [`Member`], [`Plan`] and [`AdminProfile`]
//!   with normalized [`CalendarDay`] dates and [`EntityId`] identifiers.
//!
//! - Form [`validation`], member [`search`], CSV [`export`] and
//!   [`import`] result handling.

pub mod config;
pub mod convert;
pub mod desk;
pub mod error;
pub mod export;
pub mod import;
pub mod membership;
pub mod model;
pub mod search;
pub mod snapshot;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DeskConfig, TlsVerification};
pub use desk::GymDesk;
pub use error::CoreError;
pub use export::{default_export_file_name, export_members_csv};
pub use import::{ImportOutcome, ImportReport, MAX_ROW_ERRORS_SHOWN, truncate_row_errors};
pub use membership::{
    Bucket, CalendarDay, InvalidDateError, MembershipStatus, Summary, classify, expiring_within,
    normalize, suggest_end_date, summarize,
};
pub use model::{AdminProfile, EntityId, Member, Plan};
pub use search::search_members;
pub use snapshot::{Dashboard, Snapshot};
pub use validation::{FormMode, MemberDraft, PlanDraft, RenewalDraft, ValidationError};

pub use gymdesk_api::{AuthContext, DEFAULT_BASE_URL, LoginSession};
