//! Command handlers.

pub mod auth;
pub mod config_cmd;
pub mod dashboard;
pub mod members;
pub mod plans;
pub mod util;

use gymdesk_core::{CalendarDay, GymDesk};
use tracing::{debug, warn};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Per-invocation facts every handler may need.
pub struct Ctx {
    pub profile_name: String,
    /// Read once at startup (or taken from `--as-of`).
    pub today: CalendarDay,
    pub color: bool,
    pub expiry_window_days: i64,
    /// Profile username, the default for `login`.
    pub username: Option<String>,
}

/// Dispatch a backend command.
///
/// A rejected session also drops the token saved for the profile, so the
/// next run asks for a fresh login instead of replaying it.
pub async fn dispatch(
    cmd: Command,
    desk: &GymDesk,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    let result = run_command(cmd, desk, global, ctx).await;
    if matches!(result, Err(CliError::SessionExpired)) {
        match auth::forget_stored_token(&ctx.profile_name) {
            Ok(true) => debug!(profile = %ctx.profile_name, "dropped rejected session token"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not drop rejected session token"),
        }
    }
    result
}

async fn run_command(
    cmd: Command,
    desk: &GymDesk,
    global: &GlobalOpts,
    ctx: &Ctx,
) -> Result<(), CliError> {
    match cmd {
        Command::Login(args) => auth::login(desk, args, global, ctx).await,
        Command::Logout => auth::logout(desk, global, ctx),
        Command::Profile => auth::profile(desk, global, ctx).await,
        Command::Dashboard(args) => dashboard::handle(desk, &args, global, ctx).await,
        Command::Plans(args) => plans::handle(desk, args, global, ctx).await,
        Command::Members(args) => members::handle(desk, args, global, ctx).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "command does not need a backend connection".into(),
        )),
    }
}
