//! # rulepath CLI entry point
//!
//! Parses command-line arguments, installs logging and dispatches to the
//! subcommand handlers.
//!
//! Exit status: 0 success, 1 document failed validation, 2 hard error.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rulepath_cli::config::CliConfig;
use rulepath_cli::handlers::{run_handlers, HandlersArgs};
use rulepath_cli::rules::{run_rules, RulesArgs};
use rulepath_cli::validate::{run_validate, ValidateArgs};

/// Exit status for errors that prevented validation from running.
const EXIT_HARD_ERROR: u8 = 2;

/// rulepath: validate documents against rules declared on type descriptions.
#[derive(Parser, Debug)]
#[command(name = "rulepath", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a document against a type descriptor.
    Validate(ValidateArgs),

    /// Print the rule map extracted from a type descriptor.
    Rules(RulesArgs),

    /// List the available rule names.
    Handlers(HandlersArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("rulepath CLI starting");

    let result = CliConfig::resolve(cli.config.as_deref()).and_then(|config| {
        let mut stdout = std::io::stdout().lock();
        match &cli.command {
            Commands::Validate(args) => run_validate(args, &config, &mut stdout),
            Commands::Rules(args) => run_rules(args, &config, &mut stdout),
            Commands::Handlers(args) => run_handlers(args, &config, &mut stdout),
        }
    });

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_HARD_ERROR)
        }
    }
}
