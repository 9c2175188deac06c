//! Shared configuration for gymdesk.
//!
//! TOML profiles, session token storage (env + keyring + plaintext), and
//! translation to `gymdesk_core::DeskConfig`. The CLI layers its global
//! flag overrides on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use gymdesk_core::{DEFAULT_BASE_URL, DeskConfig, TlsVerification};

/// Environment variable holding a session token; beats every stored one.
pub const TOKEN_ENV: &str = "GYMDESK_TOKEN";

const KEYRING_SERVICE: &str = "gymdesk";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String },

    #[error("credential store error: {0}")]
    Keyring(#[from] keyring::Error),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named backend profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// Dashboard "expiring soon" window in days.
    #[serde(default = "default_expiry_window")]
    pub expiry_window_days: i64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: default_timeout(),
            expiry_window_days: default_expiry_window(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}
fn default_expiry_window() -> i64 {
    7
}

/// A named backend profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// API root (e.g. "http://localhost:8080/api").
    #[serde(default = "default_server")]
    pub server: String,

    /// Email or phone used to log in.
    pub username: Option<String>,

    /// Session token (plaintext, prefer keyring or env var).
    pub token: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout.
    pub timeout: Option<u64>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            server: default_server(),
            username: None,
            token: None,
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }
}

fn default_server() -> String {
    DEFAULT_BASE_URL.into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "gymdesk", "gymdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("gymdesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from `path` (missing file is fine) + `GYMDESK_` environment.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("GYMDESK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if loading fails.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Session token storage ───────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, keyring::Error> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/token"))
}

/// Resolve a stored session token: env var, then keyring, then plaintext.
pub fn resolve_token(profile: &Profile, profile_name: &str) -> Option<SecretString> {
    let from_env = std::env::var(TOKEN_ENV).ok();
    let from_keyring = || {
        keyring_entry(profile_name)
            .and_then(|entry| entry.get_password())
            .map_err(|e| debug!(profile = profile_name, error = %e, "no token in keyring"))
            .ok()
    };
    pick_token(from_env, from_keyring, profile.token.as_deref())
}

fn pick_token(
    from_env: Option<String>,
    from_keyring: impl FnOnce() -> Option<String>,
    plaintext: Option<&str>,
) -> Option<SecretString> {
    from_env
        .filter(|t| !t.trim().is_empty())
        .or_else(from_keyring)
        .or_else(|| plaintext.map(str::to_owned))
        .filter(|t| !t.trim().is_empty())
        .map(SecretString::from)
}

/// Persist a session token in the system keyring.
pub fn store_token(profile_name: &str, token: &SecretString) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?.set_password(token.expose_secret())?;
    Ok(())
}

/// Remove the keyring token. Returns `true` if one was stored.
pub fn clear_token(profile_name: &str) -> Result<bool, ConfigError> {
    match keyring_entry(profile_name)?.delete_credential() {
        Ok(()) => Ok(true),
        Err(keyring::Error::NoEntry) => Ok(false),
        Err(e) => Err(e.into()),
    }
}

// ── Translation to core ─────────────────────────────────────────────

/// Parse and check a server URL.
pub fn parse_server_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.trim().parse().map_err(|_| ConfigError::Validation {
        field: "server".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation {
            field: "server".into(),
            reason: format!("expected an http(s) URL, got '{raw}'"),
        });
    }
    Ok(url)
}

/// Build a `DeskConfig` from a profile and global defaults.
///
/// The token is passed in so callers with an explicit one never touch the
/// keyring; see [`resolve_token`] for the stored lookup.
pub fn profile_to_desk_config(
    profile: &Profile,
    defaults: &Defaults,
    token: Option<SecretString>,
) -> Result<DeskConfig, ConfigError> {
    let url = parse_server_url(&profile.server)?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(DeskConfig {
        url,
        tls,
        timeout,
        token,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn loads_profiles_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "front-desk"

[defaults]
timeout = 10

[profiles.front-desk]
server = "https://gym.example.com/api"
username = "admin@gym.in"
"#,
        )
        .expect("write");

        let cfg = load_config_from(&path).expect("load");
        assert_eq!(cfg.default_profile.as_deref(), Some("front-desk"));
        assert_eq!(cfg.defaults.timeout, 10);
        assert_eq!(cfg.defaults.expiry_window_days, 7);
        let profile = &cfg.profiles["front-desk"];
        assert_eq!(profile.server, "https://gym.example.com/api");
        assert_eq!(profile.username.as_deref(), Some("admin@gym.in"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg = load_config_from(&dir.path().join("absent.toml")).expect("load");
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.output, "table");
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                server: "http://10.0.0.5:8080/api".into(),
                insecure: Some(true),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).expect("save");

        let loaded = load_config_from(&path).expect("load");
        assert_eq!(loaded.profiles["default"].server, "http://10.0.0.5:8080/api");
        assert_eq!(loaded.profiles["default"].insecure, Some(true));
    }

    #[test]
    fn token_precedence() {
        let token = |t: Option<SecretString>| t.map(|s| s.expose_secret().to_owned());

        assert_eq!(
            token(pick_token(Some("env".into()), || Some("ring".into()), Some("plain"))),
            Some("env".into())
        );
        assert_eq!(
            token(pick_token(None, || Some("ring".into()), Some("plain"))),
            Some("ring".into())
        );
        assert_eq!(
            token(pick_token(Some(" ".into()), || None, Some("plain"))),
            Some("plain".into())
        );
        assert_eq!(token(pick_token(None, || None, None)), None);
    }

    #[test]
    fn desk_config_from_profile() {
        let defaults = Defaults::default();
        let profile = Profile {
            server: "https://gym.example.com/api".into(),
            ca_cert: Some(PathBuf::from("/etc/gym-ca.pem")),
            timeout: Some(5),
            ..Profile::default()
        };
        let cfg = profile_to_desk_config(&profile, &defaults, None).expect("config");
        assert_eq!(cfg.url.as_str(), "https://gym.example.com/api");
        assert_eq!(cfg.tls, TlsVerification::CustomCa(PathBuf::from("/etc/gym-ca.pem")));
        assert_eq!(cfg.timeout, Duration::from_secs(5));

        let insecure = Profile {
            insecure: Some(true),
            ..profile
        };
        let token = Some(SecretString::from("tok".to_owned()));
        let cfg = profile_to_desk_config(&insecure, &defaults, token).expect("config");
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(
            cfg.token.as_ref().map(|t| t.expose_secret().to_owned()),
            Some("tok".into())
        );
    }

    #[test]
    fn rejects_bad_server_urls() {
        assert!(parse_server_url("not a url").is_err());
        assert!(parse_server_url("ftp://gym.example.com").is_err());
        assert!(parse_server_url(" http://localhost:8080/api ").is_ok());
    }
}
