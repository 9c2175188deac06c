// ── Core error types ──
//
// User-facing errors from gymdesk-core. Consumers never see raw HTTP
// status codes or JSON parse failures: `From<gymdesk_api::Error>`
// translates transport-layer errors into these variants.

use thiserror::Error;

use crate::validation::ValidationError;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    Timeout,

    // ── Session errors ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Session expired -- please log in again")]
    SessionExpired,

    #[error("Not logged in")]
    NotLoggedIn,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    // ── Backend errors (wrapped, not exposed raw) ────────────────────
    #[error("{message}")]
    Api { message: String, status: Option<u16> },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<gymdesk_api::Error> for CoreError {
    fn from(err: gymdesk_api::Error) -> Self {
        use gymdesk_api::Error as ApiError;

        match err {
            ApiError::Authentication { message } => CoreError::AuthenticationFailed { message },
            ApiError::InvalidLoginResponse { message } => CoreError::AuthenticationFailed {
                message: format!("unexpected login response: {message}"),
            },
            ApiError::SessionExpired => CoreError::SessionExpired,
            ApiError::NotAuthenticated => CoreError::NotLoggedIn,
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Api { status: 404, message } => CoreError::NotFound {
                entity_type: "Resource".into(),
                identifier: message,
            },
            ApiError::Api { status, message } => CoreError::Api {
                message,
                status: Some(status),
            },
            ApiError::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
            ApiError::Io(e) => CoreError::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_errors_map_to_login_hint() {
        assert!(matches!(
            CoreError::from(gymdesk_api::Error::SessionExpired),
            CoreError::SessionExpired
        ));
        assert!(matches!(
            CoreError::from(gymdesk_api::Error::NotAuthenticated),
            CoreError::NotLoggedIn
        ));
    }

    #[test]
    fn backend_message_is_shown_verbatim() {
        let err = CoreError::from(gymdesk_api::Error::Api {
            status: 400,
            message: "Phone already registered".into(),
        });
        assert_eq!(err.to_string(), "Phone already registered");
    }

    #[test]
    fn not_found_keeps_backend_text() {
        let err = CoreError::from(gymdesk_api::Error::Api {
            status: 404,
            message: "Member not found".into(),
        });
        assert!(matches!(
            err,
            CoreError::NotFound { ref identifier, .. } if identifier == "Member not found"
        ));
    }
}
