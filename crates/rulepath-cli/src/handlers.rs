//! # Handlers Subcommand
//!
//! Lists the rule names a document may use.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use rulepath_core::OPTIONAL;
use rulepath_engine::HandlerRegistry;

use crate::config::{CliConfig, OutputFormat};

/// Arguments for the handlers subcommand.
#[derive(Args, Debug)]
pub struct HandlersArgs {
    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,
}

/// Execute the handlers subcommand.
pub fn run_handlers(args: &HandlersArgs, config: &CliConfig, out: &mut impl Write) -> Result<u8> {
    let registry = HandlerRegistry::with_builtins();
    let mut names = registry.names();
    // Never dispatched, but valid in any rule list.
    names.push(OPTIONAL);
    names.sort_unstable();

    match args.format.unwrap_or(config.format) {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &names)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for name in names {
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(0)
}
