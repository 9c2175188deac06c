use thiserror::Error;

/// Top-level error type for the `gymdesk-api` crate.
///
/// Covers authentication, transport, backend-reported failures and
/// response decoding. `gymdesk-core` maps these into user-facing errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Login rejected (wrong identifier or password, account disabled, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// The backend answered 401 on an authenticated call. The stored
    /// token has already been cleared when this is returned.
    #[error("Session expired -- please log in again")]
    SessionExpired,

    /// An authenticated endpoint was called with no token in the context.
    #[error("Not logged in")]
    NotAuthenticated,

    /// The login response did not match the declared token schema.
    #[error("Unexpected login response: {message}")]
    InvalidLoginResponse { message: String },

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS configuration or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    // ── Backend ─────────────────────────────────────────────────────
    /// Non-success response from the backend, with its best-effort message.
    #[error("Backend error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    /// Local file access failed (CSV upload).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
