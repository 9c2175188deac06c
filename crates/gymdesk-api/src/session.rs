// Session endpoints
//
// Token login and the admin profile. There is no server-side logout:
// ending a session means dropping the token from the `AuthContext`.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use tracing::{debug, info};

use crate::auth::{LoginSession, parse_login_response};
use crate::client::{GymClient, error_message};
use crate::error::Error;
use crate::types::ProfileResponse;

impl GymClient {
    /// Authenticate with an email address or phone number and a password.
    ///
    /// On success the token is stored in the shared [`AuthContext`](crate::AuthContext)
    /// and the full [`LoginSession`] is returned so callers can persist it.
    pub async fn login(
        &self,
        email_or_phone: &str,
        password: &SecretString,
    ) -> Result<LoginSession, Error> {
        let url = self.url("auth/login")?;
        debug!("logging in at {url}");

        let body = json!({
            "emailOrPhone": email_or_phone.trim(),
            "password": password.expose_secret(),
        });

        let resp = self.http().post(url).json(&body).send().await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            let message = if text.trim().is_empty() {
                "Invalid username or password".to_owned()
            } else {
                error_message(status, &text)
            };
            return Err(Error::Authentication { message });
        }

        let session = parse_login_response(&text)?;
        self.auth().set_token(session.token.clone());
        info!("login successful");
        Ok(session)
    }

    /// Drop the current token. Returns `true` if a session was active.
    pub fn logout(&self) -> bool {
        self.auth().clear()
    }

    /// Fetch the logged-in admin's profile and gym details.
    pub async fn profile(&self) -> Result<ProfileResponse, Error> {
        self.get("auth/profile").await
    }
}
