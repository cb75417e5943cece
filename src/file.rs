//! Reading and parsing config source files.
//!
//! The format is chosen from the file extension alone: `.json` is JSON,
//! `.yml` and `.yaml` are YAML. Any other extension (or none) is rejected
//! before the file is opened. YAML is parsed with `serde_yaml`, which builds
//! plain data only and never constructs arbitrary objects from tags.
//!
//! A source must hold a mapping at its root. An empty document (`null`, or a
//! YAML stream with no documents) is accepted and contributes nothing. Only
//! the first document of a multi-document YAML stream is read.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::SchemafigError;
use crate::types::Format;

/// Pick the format for `path` from its extension.
pub fn format_for(path: &Path) -> Result<Format, SchemafigError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    Format::from_extension(ext).ok_or_else(|| SchemafigError::UnsupportedFormat {
        extension: if ext.is_empty() {
            String::new()
        } else {
            format!(".{ext}")
        },
    })
}

/// Read and parse a config file. Returns `None` for an empty document.
pub fn load(path: &Path) -> Result<Option<Map<String, Value>>, SchemafigError> {
    let format = format_for(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| SchemafigError::IoError {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content, format, &path.display().to_string())
}

/// Parse source text into a mapping tree. `origin` names the source in errors.
pub fn parse(
    content: &str,
    format: Format,
    origin: &str,
) -> Result<Option<Map<String, Value>>, SchemafigError> {
    let parse_error = |reason: String| SchemafigError::ParseError {
        origin: origin.to_string(),
        format,
        reason,
    };

    let value: Value = match format {
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?,
        Format::Yaml => match serde_yaml::Deserializer::from_str(content).next() {
            Some(document) => {
                Value::deserialize(document).map_err(|e| parse_error(e.to_string()))?
            }
            None => Value::Null,
        },
    };

    match value {
        Value::Object(map) => Ok(Some(map)),
        Value::Null => Ok(None),
        other => Err(parse_error(format!(
            "expected a mapping at the document root, found {}",
            root_kind(&other)
        ))),
    }
}

fn root_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "a list",
        Value::String(_) => "a string",
        Value::Number(_) => "a number",
        Value::Bool(_) => "a boolean",
        Value::Null | Value::Object(_) => "an unexpected value",
    }
}
