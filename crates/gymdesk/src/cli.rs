//! Clap derive structures for the `gymdesk` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Kept
//! free of workspace crates so `build.rs` can include it for man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gymdesk -- membership front desk for your gym
#[derive(Debug, Parser)]
#[command(
    name = "gymdesk",
    version,
    about = "Track gym members, plans and renewals from the command line",
    long_about = "Front-desk CLI for a gym membership backend.\n\n\
        Shows who is about to expire, manages members and plans, renews\n\
        memberships and moves rosters in and out as CSV.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Configuration profile to use
    #[arg(long, short = 'p', env = "GYMDESK_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Backend API root, e.g. http://localhost:8080/api (overrides profile)
    #[arg(long, env = "GYMDESK_SERVER", global = true)]
    pub server: Option<String>,

    /// Session token (overrides the stored one)
    #[arg(long, env = "GYMDESK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "GYMDESK_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "GYMDESK_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "GYMDESK_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Evaluate memberships as of this date (YYYY-MM-DD) instead of today
    #[arg(long, value_name = "DATE", global = true)]
    pub as_of: Option<String>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Membership urgency, as used by `members list --status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusFilter {
    /// End date has passed
    Expired,
    /// Ends within 3 days
    Critical,
    /// Ends within 4 to 7 days
    Warning,
    /// Ends in more than a week
    Active,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session token
    Login(LoginArgs),

    /// Forget the stored session token
    Logout,

    /// Show the logged-in admin and gym details
    #[command(alias = "whoami")]
    Profile,

    /// Membership totals and who is expiring soon
    #[command(alias = "dash")]
    Dashboard(DashboardArgs),

    /// Manage membership plans
    #[command(alias = "plan")]
    Plans(PlansArgs),

    /// Manage members, renewals, import and export
    #[command(alias = "m")]
    Members(MembersArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SESSION
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Email address or phone number (defaults to the profile's username)
    #[arg(long, short = 'u')]
    pub username: Option<String>,

    /// Read the password from stdin instead of prompting
    #[arg(long)]
    pub password_stdin: bool,

    /// Print the token instead of storing it in the system keyring
    #[arg(long)]
    pub print_token: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DASHBOARD
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DashboardArgs {
    /// Expiring-soon window in days (default from config, usually 7)
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    pub days: Option<i64>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  PLANS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PlansArgs {
    #[command(subcommand)]
    pub command: PlansCommand,
}

#[derive(Debug, Subcommand)]
pub enum PlansCommand {
    /// List plans
    #[command(alias = "ls")]
    List,

    /// Create a plan
    Create {
        /// Plan name
        #[arg(long)]
        name: String,

        /// Duration in months
        #[arg(long, short = 'm')]
        months: u32,

        /// Price
        #[arg(long)]
        price: f64,
    },

    /// Update a plan
    Update {
        /// Plan ID or name
        plan: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New duration in months
        #[arg(long, short = 'm')]
        months: Option<u32>,

        /// New price
        #[arg(long)]
        price: Option<f64>,
    },

    /// Delete a plan
    #[command(alias = "rm")]
    Delete {
        /// Plan ID or name
        plan: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MEMBERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MembersArgs {
    #[command(subcommand)]
    pub command: MembersCommand,
}

#[derive(Debug, Subcommand)]
pub enum MembersCommand {
    /// List members
    #[command(alias = "ls")]
    List(MemberListArgs),

    /// Show one member
    Get {
        /// Member ID or phone number
        member: String,
    },

    /// Add a member
    Create(MemberFields),

    /// Edit a member (unset fields keep their current value)
    Update {
        /// Member ID or phone number
        member: String,

        #[command(flatten)]
        fields: MemberUpdateFields,
    },

    /// Delete a member
    #[command(alias = "rm")]
    Delete {
        /// Member ID or phone number
        member: String,
    },

    /// Renew a membership
    Renew {
        /// Member ID or phone number
        member: String,

        /// Plan ID or name (defaults to the current plan)
        #[arg(long)]
        plan: Option<String>,

        /// New end date, YYYY-MM-DD (defaults to the plan length from the
        /// current end date, or from today if already expired)
        #[arg(long)]
        end: Option<String>,
    },

    /// Upload a CSV roster to the backend
    Import {
        /// CSV file (Name,Phone,Email,PlanId,StartDate,EndDate)
        file: PathBuf,
    },

    /// Write members to a CSV file
    Export {
        /// Output file (default: members_<today>.csv, "-" for stdout)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Only export members matching this text
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct MemberListArgs {
    /// Filter by name, phone or email (case-insensitive)
    #[arg(long)]
    pub search: Option<String>,

    /// Filter by membership status
    #[arg(long)]
    pub status: Option<StatusFilter>,

    /// Only members ending within this many days from today
    #[arg(long, value_name = "DAYS", allow_negative_numbers = true)]
    pub expiring: Option<i64>,
}

#[derive(Debug, Args)]
pub struct MemberFields {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Phone number
    #[arg(long)]
    pub phone: String,

    /// Email address
    #[arg(long)]
    pub email: Option<String>,

    /// Plan ID or name
    #[arg(long)]
    pub plan: String,

    /// Start date, YYYY-MM-DD (default: today)
    #[arg(long)]
    pub start: Option<String>,

    /// End date, YYYY-MM-DD (default: start plus the plan length)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Debug, Args)]
pub struct MemberUpdateFields {
    /// Full name
    #[arg(long)]
    pub name: Option<String>,

    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address ("" to clear)
    #[arg(long)]
    pub email: Option<String>,

    /// Plan ID or name
    #[arg(long)]
    pub plan: Option<String>,

    /// Start date, YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// End date, YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display current configuration (secrets masked)
    Show,

    /// Set a value on the active profile
    Set {
        /// Key: server, username, insecure, timeout, ca_cert
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
