//! # Rules Subcommand
//!
//! Prints the rule map extracted from a type descriptor, one path per line
//! or as a JSON object. Useful for checking what a descriptor actually
//! declares before validating documents against it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rulepath_schema::{RuleSchema, TypeSchema};

use crate::config::{CliConfig, OutputFormat};

/// Arguments for the rules subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Type descriptor (YAML or JSON).
    #[arg(long)]
    pub schema: PathBuf,

    /// Annotation key to read rules from.
    #[arg(long)]
    pub tag_key: Option<String>,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Skip build-time schema checks.
    #[arg(long)]
    pub no_check: bool,
}

/// Load a descriptor and extract its rules under `config`.
pub fn compile_schema(path: &Path, config: &CliConfig) -> Result<RuleSchema> {
    let types = TypeSchema::load(path)?;
    let schema = if config.check {
        RuleSchema::build(&types, &config.tag_key)
            .with_context(|| format!("schema check failed: {}", path.display()))?
    } else {
        RuleSchema::unchecked(&types, &config.tag_key)
    };
    tracing::info!(
        schema = %path.display(),
        tag_key = %config.tag_key,
        paths = schema.len(),
        "compiled rule schema"
    );
    Ok(schema)
}

/// Execute the rules subcommand.
pub fn run_rules(args: &RulesArgs, config: &CliConfig, out: &mut impl Write) -> Result<u8> {
    let config = config.with_overrides(args.tag_key.as_deref(), args.format, args.no_check);
    let schema = compile_schema(&args.schema, &config)?;

    match config.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, schema.rules())?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for (path, tokens) in schema.iter() {
                let joined: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
                writeln!(out, "{path}: {}", joined.join(" | "))?;
            }
        }
    }
    Ok(0)
}
