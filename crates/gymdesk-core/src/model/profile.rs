use serde::{Deserialize, Serialize};

/// Logged-in admin and gym details. All fields are display text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub admin_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub gym_name: Option<String>,
    pub gym_address: Option<String>,
    pub gym_contact_number: Option<String>,
}
