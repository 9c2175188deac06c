// gymdesk-api: Async Rust client for the gymdesk membership backend

pub mod auth;
pub mod client;
pub mod error;
mod members;
mod plans;
mod session;
pub mod transport;
pub mod types;

pub use auth::{AuthContext, LoginSession, parse_login_response};
pub use client::{DEFAULT_BASE_URL, GymClient};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use types::{
    MemberPayload, MemberResponse, PlanPayload, PlanResponse, ProfileResponse, RenewPayload,
    ResourceId,
};
