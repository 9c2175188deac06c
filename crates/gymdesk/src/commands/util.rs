//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::sync::Arc;

use gymdesk_core::{CalendarDay, CoreError, GymDesk, Member, Plan, Snapshot};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::Ctx;

/// Fetch members and plans, mapping a missing token to a login hint for
/// the active profile.
pub async fn load(
    desk: &GymDesk,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<Arc<Snapshot>, CliError> {
    if !desk.is_logged_in() {
        return Err(not_logged_in(ctx));
    }
    output::with_spinner("Loading members and plans", global.quiet, desk.refresh())
        .await
        .map_err(|e| session_error(e, ctx))
}

/// `CoreError` → `CliError`, naming the active profile on `NotLoggedIn`.
pub fn session_error(err: CoreError, ctx: &Ctx) -> CliError {
    match err {
        CoreError::NotLoggedIn => not_logged_in(ctx),
        other => other.into(),
    }
}

fn not_logged_in(ctx: &Ctx) -> CliError {
    CliError::NotLoggedIn {
        profile: ctx.profile_name.clone(),
    }
}

/// Find a member by id or phone.
pub fn resolve_member<'a>(snap: &'a Snapshot, key: &str) -> Result<&'a Member, CliError> {
    snap.resolve_member(key).ok_or_else(|| CliError::NotFound {
        resource_type: "member".into(),
        identifier: key.into(),
        list_command: "members list".into(),
    })
}

/// Find a plan by id or name.
pub fn resolve_plan<'a>(snap: &'a Snapshot, key: &str) -> Result<&'a Plan, CliError> {
    snap.resolve_plan(key).ok_or_else(|| CliError::NotFound {
        resource_type: "plan".into(),
        identifier: key.into(),
        list_command: "plans list".into(),
    })
}

/// Parse a date flag.
pub fn parse_date(field: &str, raw: &str) -> Result<CalendarDay, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

/// Parse an optional date flag.
pub fn parse_optional_date(
    field: &str,
    raw: Option<&str>,
) -> Result<Option<CalendarDay>, CliError> {
    raw.map(|r| parse_date(field, r)).transpose()
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
///
/// Without a terminal there is nobody to ask, so the action is refused.
pub fn confirm(message: &str, action: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: action.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(io::Error::other(e)))?;
    Ok(confirmed)
}

/// Informational message on stderr, unless `--quiet`.
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
