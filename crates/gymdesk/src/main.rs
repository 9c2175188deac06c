mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use gymdesk_core::{CalendarDay, GymDesk};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::commands::Ctx;
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        // Config commands don't need a backend connection
        Command::Config(args) => commands::config_cmd::handle(args, &cli.global),

        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "gymdesk", &mut std::io::stdout());
            Ok(())
        }

        cmd => {
            let cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(&cli.global, &cfg);
            let desk_config = config::resolve_desk_config(&cli.global, &cfg, &profile_name)?;
            let desk = GymDesk::new(&desk_config)?;

            let ctx = Ctx {
                today: today(&cli.global)?,
                color: output::should_color(&cli.global.color),
                expiry_window_days: cfg.defaults.expiry_window_days,
                username: cfg
                    .profiles
                    .get(&profile_name)
                    .and_then(|p| p.username.clone()),
                profile_name,
            };

            tracing::debug!(command = ?cmd, server = %desk.base_url(), "dispatching command");
            commands::dispatch(cmd, &desk, &cli.global, &ctx).await
        }
    }
}

/// The local calendar day, read once per invocation, or `--as-of`.
fn today(global: &GlobalOpts) -> Result<CalendarDay, CliError> {
    match global.as_of.as_deref() {
        Some(raw) => commands::util::parse_date("as-of", raw),
        None => Ok(CalendarDay::from(chrono::Local::now().date_naive())),
    }
}
