// ── Domain model ──

pub mod entity_id;
pub mod member;
pub mod plan;
pub mod profile;

pub use entity_id::EntityId;
pub use member::Member;
pub use plan::{Plan, find_plan};
pub use profile::AdminProfile;
