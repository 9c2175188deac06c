// ── Runtime connection configuration ──
//
// Describes how to reach the backend. Carries the session token and
// transport tuning but never touches disk: the CLI builds a `DeskConfig`
// from its profile and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use gymdesk_api::{TlsMode, TransportConfig};
use secrecy::SecretString;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    #[default]
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed development backends).
    DangerAcceptInvalid,
}

impl From<&TlsVerification> for TlsMode {
    fn from(tls: &TlsVerification) -> Self {
        match tls {
            TlsVerification::SystemDefaults => Self::System,
            TlsVerification::CustomCa(path) => Self::CustomCa(path.clone()),
            TlsVerification::DangerAcceptInvalid => Self::DangerAcceptInvalid,
        }
    }
}

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct DeskConfig {
    /// API root, e.g. `http://localhost:8080/api`.
    pub url: Url,
    pub tls: TlsVerification,
    pub timeout: Duration,
    /// Token from a previous login, if any.
    pub token: Option<SecretString>,
}

impl DeskConfig {
    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            tls: TlsMode::from(&self.tls),
            timeout: self.timeout,
        }
    }
}
