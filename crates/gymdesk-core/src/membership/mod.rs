//! Membership status engine.
//!
//! Pure functions over the domain model. Nothing here reads the clock or
//! touches the network: "today" is always passed in.

pub mod date;
pub mod renewal;
pub mod status;
pub mod summary;
pub mod window;

pub use date::{CalendarDay, DateValue, InvalidDateError, normalize, normalize_optional};
pub use renewal::{suggest_end_date, suggest_renewal_end};
pub use status::{Bucket, CRITICAL_MAX_DAYS, MembershipStatus, WARNING_MAX_DAYS, classify};
pub use summary::{Summary, summarize};
pub use window::expiring_within;
