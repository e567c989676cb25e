//! # CLI Configuration
//!
//! Optional YAML file passed with `--config`. Every key has a default, and
//! command-line flags override whatever the file says.
//!
//! ```yaml
//! tag_key: validate
//! format: json
//! check: true
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use rulepath_engine::DEFAULT_TAG_KEY;
use serde::Deserialize;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// A single JSON document.
    Json,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Annotation key rules are read from.
    pub tag_key: String,
    /// Output format.
    pub format: OutputFormat,
    /// Run build-time schema checks before extracting rules.
    pub check: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            format: OutputFormat::Text,
            check: true,
        }
    }
}

impl CliConfig {
    /// Read a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("invalid config file: {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// The file's settings when a path is given, defaults otherwise.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line overrides.
    pub fn with_overrides(
        &self,
        tag_key: Option<&str>,
        format: Option<OutputFormat>,
        no_check: bool,
    ) -> Self {
        Self {
            tag_key: tag_key.map_or_else(|| self.tag_key.clone(), str::to_string),
            format: format.unwrap_or(self.format),
            check: self.check && !no_check,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let config = CliConfig::resolve(None).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.tag_key, "validate");
        assert!(config.check);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "format: json").unwrap();
        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.tag_key, "validate");
        assert!(config.check);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "tagkey: other").unwrap();
        let err = CliConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("invalid config file"));
    }

    #[test]
    fn missing_file_names_path() {
        let err = CliConfig::load(Path::new("/nonexistent/rulepath.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rulepath.yaml"));
    }

    #[test]
    fn flags_override_file() {
        let file = CliConfig {
            tag_key: "strict".into(),
            format: OutputFormat::Json,
            check: true,
        };
        let merged = file.with_overrides(Some("loose"), Some(OutputFormat::Text), true);
        assert_eq!(merged.tag_key, "loose");
        assert_eq!(merged.format, OutputFormat::Text);
        assert!(!merged.check);

        assert_eq!(file.with_overrides(None, None, false), file);
    }
}
