//! # Validate Subcommand
//!
//! Validates one JSON or YAML document against the rules of a type
//! descriptor.
//!
//! Exit status: 0 when the document passes, 1 when it has failures. Hard
//! errors (unreadable files, inconsistent descriptors, unknown rules) are
//! returned as errors and mapped to 2 by the entry point.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use rulepath_engine::{ValidationErrors, Validator};
use serde_json::{json, Value};

use crate::config::{CliConfig, OutputFormat};
use crate::rules::compile_schema;

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Document to validate (YAML or JSON).
    pub document: PathBuf,

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

/// Read a document. `.yaml`/`.yml` files are YAML, everything else JSON.
pub fn load_document(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read document: {}", path.display()))?;
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let value: Value = match ext {
        "yaml" | "yml" => serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML: {}", path.display()))?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON: {}", path.display()))?,
    };
    Ok(value)
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs, config: &CliConfig, out: &mut impl Write) -> Result<u8> {
    let config = config.with_overrides(args.tag_key.as_deref(), args.format, args.no_check);
    let schema = compile_schema(&args.schema, &config)?;
    let document = load_document(&args.document)?;

    let validator = Validator::new().with_tag_key(config.tag_key.as_str());
    let outcome = validator
        .validate_value(&document, &schema)
        .with_context(|| format!("cannot validate {}", args.document.display()))?;

    report(&args.document, outcome.as_ref(), config.format, out)?;
    Ok(if outcome.is_some() { 1 } else { 0 })
}

fn report(
    document: &Path,
    errors: Option<&ValidationErrors>,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let body = match errors {
                Some(errors) => json!({ "valid": false, "errors": errors }),
                None => json!({ "valid": true }),
            };
            serde_json::to_writer_pretty(&mut *out, &body)?;
            writeln!(out)?;
        }
        OutputFormat::Text => match errors {
            Some(errors) => {
                write!(out, "{errors}")?;
                writeln!(
                    out,
                    "{}: {} field(s) failed validation",
                    document.display(),
                    errors.len()
                )?;
            }
            None => writeln!(out, "{}: valid", document.display())?,
        },
    }
    Ok(())
}
