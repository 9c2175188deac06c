// Authentication context and login response schema.
//
// The bearer token lives in exactly one place: the `AuthContext` shared
// by the client. Login stores it, logout and any 401 clear it.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;

// ── AuthContext ─────────────────────────────────────────────────────

/// Holder for the bearer token used on every authenticated request.
///
/// Shared between the client and its owner via `Arc`. Nothing else in
/// the workspace keeps a copy of the live token.
#[derive(Debug, Default)]
pub struct AuthContext {
    token: RwLock<Option<SecretString>>,
}

impl AuthContext {
    /// An empty (logged-out) context.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context pre-seeded with a token restored from storage.
    pub fn with_token(token: SecretString) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }

    /// Replace the current token.
    pub fn set_token(&self, token: SecretString) {
        debug!("storing bearer token");
        *self.token.write().expect("auth lock poisoned") = Some(token);
    }

    /// Forget the current token. Returns `true` if one was present.
    pub fn clear(&self) -> bool {
        let had = self.token.write().expect("auth lock poisoned").take();
        if had.is_some() {
            debug!("bearer token cleared");
        }
        had.is_some()
    }

    /// Whether a token is currently held.
    pub fn is_authenticated(&self) -> bool {
        self.token.read().expect("auth lock poisoned").is_some()
    }

    /// Clone of the current token, if any.
    pub fn token(&self) -> Option<SecretString> {
        self.token.read().expect("auth lock poisoned").clone()
    }

    /// The `Authorization` header value for the current token.
    pub(crate) fn bearer_header(&self) -> Result<reqwest::header::HeaderValue, Error> {
        let guard = self.token.read().expect("auth lock poisoned");
        let token = guard.as_ref().ok_or(Error::NotAuthenticated)?;
        let mut value =
            reqwest::header::HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
                .map_err(|e| Error::Authentication {
                    message: format!("token is not a valid header value: {e}"),
                })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

// ── Login response schema ───────────────────────────────────────────

/// The outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: SecretString,
    pub admin_name: Option<String>,
    pub email: Option<String>,
}

/// Accepted login response shapes: a bare JSON string, or an object
/// carrying the token under one of [`TokenEnvelope`]'s fields.
#[derive(Deserialize)]
#[serde(untagged)]
enum LoginResponse {
    Bare(String),
    Envelope(TokenEnvelope),
}

/// Object form of a login response. Backends disagree on the token's
/// name and some send several, so each is its own field; the first
/// non-empty string in declaration order wins. `data` may also hold a
/// user object, which is ignored.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenEnvelope {
    #[serde(default)]
    token: Option<Value>,
    #[serde(default)]
    access_token: Option<Value>,
    #[serde(default, rename = "access_token")]
    access_token_snake: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    admin_name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl TokenEnvelope {
    fn token(&self) -> Option<&str> {
        [
            &self.token,
            &self.access_token,
            &self.access_token_snake,
            &self.data,
        ]
        .into_iter()
        .filter_map(|v| v.as_ref().and_then(Value::as_str))
        .find(|t| !t.trim().is_empty())
    }
}

/// Decode a login response body against the declared schema.
///
/// Some backends send the token as `text/plain`; a body that is not JSON
/// at all is therefore accepted as a bare token when it is a single
/// non-empty line without whitespace.
pub fn parse_login_response(body: &str) -> Result<LoginSession, Error> {
    let parsed = match serde_json::from_str::<LoginResponse>(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            let trimmed = body.trim();
            let looks_like_token = !trimmed.is_empty()
                && !trimmed.starts_with(['{', '[', '"'])
                && !trimmed.contains(char::is_whitespace);
            if looks_like_token {
                LoginResponse::Bare(trimmed.to_owned())
            } else {
                return Err(Error::InvalidLoginResponse {
                    message: format!("{e} (expected a token string or {{\"token\": ...}})"),
                });
            }
        }
    };

    let session = match parsed {
        LoginResponse::Bare(token) => LoginSession {
            token: SecretString::from(token),
            admin_name: None,
            email: None,
        },
        LoginResponse::Envelope(env) => {
            let token = env.token().ok_or_else(|| Error::InvalidLoginResponse {
                message: "no string token under token, accessToken, access_token or data"
                    .into(),
            })?;
            LoginSession {
                token: SecretString::from(token.to_owned()),
                admin_name: env.admin_name,
                email: env.email,
            }
        }
    };

    if session.token.expose_secret().trim().is_empty() {
        return Err(Error::InvalidLoginResponse {
            message: "token is empty".into(),
        });
    }

    Ok(session)
}
