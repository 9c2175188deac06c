//! CLI configuration: thin layer over `gymdesk_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--server, --token, --insecure, --timeout).

use secrecy::SecretString;

use gymdesk_core::DeskConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use gymdesk_config::{
    Config, Profile, config_path, load_config, load_config_or_default, save_config,
};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// The active profile with flag overrides applied.
///
/// A profile named with `--profile` must exist. Otherwise a missing
/// profile falls back to built-in defaults, so a fresh install talks to
/// the local backend without any setup.
pub fn effective_profile(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<Profile, CliError> {
    let mut profile = match config.profiles.get(profile_name) {
        Some(p) => p.clone(),
        None if global.profile.is_some() => {
            let mut names: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
            names.sort_unstable();
            return Err(CliError::ProfileNotFound {
                name: profile_name.to_owned(),
                available: if names.is_empty() {
                    "(none)".into()
                } else {
                    names.join(", ")
                },
            });
        }
        None => Profile::default(),
    };

    if let Some(ref server) = global.server {
        profile.server.clone_from(server);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    Ok(profile)
}

/// Build the runtime `DeskConfig`: flags over profile over defaults.
///
/// Token order: `--token`/`GYMDESK_TOKEN`, then keyring, then the
/// profile's plaintext token.
pub fn resolve_desk_config(
    global: &GlobalOpts,
    config: &Config,
    profile_name: &str,
) -> Result<DeskConfig, CliError> {
    let profile = effective_profile(global, config, profile_name)?;
    let token = match global.token.as_deref().map(str::trim) {
        Some(t) if !t.is_empty() => Some(SecretString::from(t.to_owned())),
        _ => gymdesk_config::resolve_token(&profile, profile_name),
    };
    Ok(gymdesk_config::profile_to_desk_config(
        &profile,
        &config.defaults,
        token,
    )?)
}
