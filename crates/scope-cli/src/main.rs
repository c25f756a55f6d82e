//! scopecfg CLI
//!
//! Reads and writes the system, user and repository configuration of a
//! git-style tool.

mod cli;
mod commands;
mod context;
mod error;

use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cli::{Cli, Commands};
use commands::Outcome;
use context::ConfigContext;
use error::Result;

fn main() -> ExitCode {
    match run() {
        Ok(Outcome::Skipped) => {
            eprintln!(
                "{}: the system config is not writable; nothing was changed",
                "warning".yellow().bold()
            );
            Outcome::Skipped.into()
        }
        Ok(outcome) => outcome.into(),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        println!("{} layered configuration", "scopecfg".green().bold());
        println!();
        println!("Run {} for available commands.", "scopecfg --help".cyan());
        return Ok(Outcome::Success);
    };

    if let Commands::Completions { shell } = command {
        clap_complete::generate(shell, &mut Cli::command(), "scopecfg", &mut io::stdout());
        return Ok(Outcome::Success);
    }

    let cwd = match cli.directory {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    tracing::debug!(cwd = %cwd.display(), tool = %cli.tool, "Running command");
    let ctx = ConfigContext::detect(&cli.tool, &cwd)?;
    execute_command(&ctx, command)
}

fn init_tracing(verbose: bool) {
    // Logs go to stderr so stdout stays parseable
    let result = if verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };
    if result.is_ok() {
        tracing::debug!(verbose, "Tracing initialised");
    }
}

fn execute_command(ctx: &ConfigContext, cmd: Commands) -> Result<Outcome> {
    tracing::debug!(
        tool = ctx.tool(),
        local = %ctx.layout().local().display(),
        "Executing command"
    );
    let mut stdout = io::stdout().lock();

    match cmd {
        Commands::Get {
            key,
            all,
            show_scope,
            scope,
        } => commands::run_get(ctx, &key, all, show_scope, scope.selected(), &mut stdout),
        Commands::Set { key, value, scope } => {
            commands::run_set(ctx, &key, &value, scope.write_target())
        }
        Commands::Add { key, value, scope } => {
            commands::run_add(ctx, &key, &value, scope.write_target())
        }
        Commands::Unset { key, scope } => commands::run_unset(ctx, &key, scope.write_target()),
        Commands::List {
            json,
            show_scope,
            scope,
        } => commands::run_list(ctx, json, show_scope, scope.selected(), &mut stdout),
        Commands::Completions { .. } => Ok(Outcome::Success),
    }
}
