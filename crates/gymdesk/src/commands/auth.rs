//! Session commands: login, logout, profile.

use std::io::{self, BufRead, IsTerminal};

use secrecy::{ExposeSecret, SecretString};
use tracing::warn;

use gymdesk_core::{AdminProfile, GymDesk};

use crate::cli::{GlobalOpts, LoginArgs};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::{Ctx, util};

// ── Login ───────────────────────────────────────────────────────────

pub async fn login(
    desk: &GymDesk,
    args: LoginArgs,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let identifier = match args.username.or_else(|| ctx.username.clone()) {
        Some(u) => u,
        None => prompt_identifier()?,
    };
    let password = if args.password_stdin {
        read_password_line(&mut io::stdin().lock())?
    } else {
        SecretString::from(rpassword::prompt_password("Password: ")?)
    };

    let session =
        output::with_spinner("Logging in", global.quiet, desk.login(&identifier, &password))
            .await?;

    if args.print_token {
        output::print_output(session.token.expose_secret(), false);
    } else {
        persist_token(&ctx.profile_name, &session.token, global)?;
    }

    let who = session.admin_name.as_deref().unwrap_or(identifier.trim());
    util::note(global, &format!("Logged in as {who} (profile '{}')", ctx.profile_name));
    Ok(())
}

fn prompt_identifier() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::Validation {
            field: "username".into(),
            reason: "pass --username when not running interactively".into(),
        });
    }
    dialoguer::Input::<String>::new()
        .with_prompt("Email or phone")
        .interact_text()
        .map_err(|e| CliError::Io(io::Error::other(e)))
}

/// First line of `reader`, without the line ending.
fn read_password_line(reader: &mut impl BufRead) -> Result<SecretString, CliError> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    let password = line.trim_end_matches(['\r', '\n']).to_owned();
    Ok(SecretString::from(password))
}

/// Keyring first; a headless machine without one gets the token in the
/// profile instead.
fn persist_token(
    profile_name: &str,
    token: &SecretString,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match gymdesk_config::store_token(profile_name, token) {
        Ok(()) => Ok(()),
        Err(e) => {
            warn!(error = %e, "keyring unavailable, storing token in config file");
            let mut cfg = config::load_config_or_default();
            cfg.profiles
                .entry(profile_name.to_owned())
                .or_default()
                .token = Some(token.expose_secret().to_owned());
            config::save_config(&cfg)?;
            util::note(
                global,
                &format!(
                    "No system keyring; token saved in plaintext to {}",
                    config::config_path().display()
                ),
            );
            Ok(())
        }
    }
}

// ── Logout ──────────────────────────────────────────────────────────

pub fn logout(desk: &GymDesk, global: &GlobalOpts, ctx: &Ctx) -> Result<(), CliError> {
    let had_session = desk.logout();
    let had_stored = forget_stored_token(&ctx.profile_name)?;

    if had_session || had_stored {
        util::note(global, &format!("Logged out of profile '{}'", ctx.profile_name));
    } else {
        util::note(global, "No stored session");
    }
    Ok(())
}

/// Remove the profile's saved token from the keyring and the config
/// file. Returns `true` if either held one.
pub fn forget_stored_token(profile_name: &str) -> Result<bool, CliError> {
    let from_keyring = gymdesk_config::clear_token(profile_name).unwrap_or_else(|e| {
        warn!(error = %e, "could not clear keyring token");
        false
    });

    let mut cfg = config::load_config_or_default();
    let from_file = cfg
        .profiles
        .get_mut(profile_name)
        .and_then(|p| p.token.take())
        .is_some();
    if from_file {
        config::save_config(&cfg)?;
    }

    Ok(from_keyring || from_file)
}

// ── Profile ─────────────────────────────────────────────────────────

fn detail(p: &AdminProfile) -> String {
    let field = |v: Option<&str>| v.unwrap_or("-").to_owned();
    [
        format!("Admin:     {}", field(p.admin_name.as_deref())),
        format!("Email:     {}", field(p.email.as_deref())),
        format!("Phone:     {}", field(p.phone.as_deref())),
        format!("Gym:       {}", field(p.gym_name.as_deref())),
        format!("Address:   {}", field(p.gym_address.as_deref())),
        format!("Contact:   {}", field(p.gym_contact_number.as_deref())),
    ]
    .join("\n")
}

pub async fn profile(desk: &GymDesk, global: &GlobalOpts, ctx: &Ctx) -> Result<(), CliError> {
    if !desk.is_logged_in() {
        return Err(CliError::NotLoggedIn {
            profile: ctx.profile_name.clone(),
        });
    }
    let profile = output::with_spinner("Loading profile", global.quiet, desk.profile())
        .await
        .map_err(|e| util::session_error(e, ctx))?;
    let out = output::render_single(&global.output, &profile, detail, |p| {
        p.email.clone().or_else(|| p.admin_name.clone()).unwrap_or_default()
    });
    output::print_output(&out, global.quiet);
    Ok(())
}
