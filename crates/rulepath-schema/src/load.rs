//! # Descriptor Loading
//!
//! Reads a [`TypeSchema`] from YAML or JSON. The file format is chosen by
//! extension: `.yaml`/`.yml` are YAML, everything else is JSON.

use std::path::Path;

use crate::error::SchemaError;
use crate::types::TypeSchema;

/// Path reported for descriptors parsed from memory.
const INLINE: &str = "<inline>";

impl TypeSchema {
    /// Parse a YAML descriptor.
    pub fn from_yaml_str(content: &str) -> Result<Self, SchemaError> {
        parse_yaml(content, INLINE)
    }

    /// Parse a JSON descriptor.
    pub fn from_json_str(content: &str) -> Result<Self, SchemaError> {
        parse_json(content, INLINE)
    }

    /// Read a descriptor file.
    pub fn load(path: &Path) -> Result<Self, SchemaError> {
        let shown = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| SchemaError::Load {
            path: shown.clone(),
            reason: format!("cannot read file: {e}"),
        })?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let schema = match ext {
            "yaml" | "yml" => parse_yaml(&content, &shown)?,
            _ => parse_json(&content, &shown)?,
        };
        tracing::debug!(path = %shown, types = schema.types.len(), "loaded type schema");
        Ok(schema)
    }
}

fn parse_yaml(content: &str, path: &str) -> Result<TypeSchema, SchemaError> {
    serde_yaml::from_str(content).map_err(|e| SchemaError::Load {
        path: path.to_string(),
        reason: format!("invalid YAML: {e}"),
    })
}

fn parse_json(content: &str, path: &str) -> Result<TypeSchema, SchemaError> {
    serde_json::from_str(content).map_err(|e| SchemaError::Load {
        path: path.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}
