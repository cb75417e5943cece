//! Inspection operations: listing resolved values, looking up one key, and
//! describing a schema. Each returns a [`ConfigResult`] for the caller to
//! display.

use std::fmt;

use serde_json::Value;

use crate::config::Config;
use crate::error::SchemafigError;
use crate::flatten::flatten;
use crate::option::{ConfigOption, FieldType, Resolved};
use crate::schema::Schema;
use crate::types::KeyPath;

/// Result of an inspection operation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's resolved value and its option's help text.
    KeyValue {
        key: String,
        value: String,
        doc: String,
    },
    /// All resolved configuration key-value pairs.
    Listing { entries: Vec<(String, String)> },
    /// Help text for every option in a schema.
    Help { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value, doc } => {
                writeln!(f, "# {doc}")?;
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => write_lines(f, entries, " = "),
            ConfigResult::Help { entries } => write_lines(f, entries, ": "),
        }
    }
}

fn write_lines(f: &mut fmt::Formatter<'_>, entries: &[(String, String)], sep: &str) -> fmt::Result {
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(f)?;
        }
        write!(f, "{key}{sep}{value}")?;
    }
    Ok(())
}

/// List every resolved value as flattened dotted pairs, in key order.
///
/// Resolves the whole tree, so the first invalid or missing value fails the
/// listing just as [`Config::validate`] would.
pub fn list_values(config: &Config) -> Result<ConfigResult, SchemafigError> {
    let tree = config.to_value()?;
    let entries = flatten(&tree)
        .into_iter()
        .map(|(key, value)| (key, format_value(&value)))
        .collect();
    Ok(ConfigResult::Listing { entries })
}

/// Resolve one dotted key and pair it with its option's help text.
///
/// A key naming a nested section shows the whole resolved section.
pub fn get_value(config: &Config, key: &str) -> Result<ConfigResult, SchemafigError> {
    let value = match config.get_path(key)? {
        Resolved::Value(value) => value,
        Resolved::Section(section) => {
            Value::Object(section.to_value().map_err(|e| prefix_path(e, key))?)
        }
    };
    let doc = lookup_option(config.schema(), &KeyPath::from(key))
        .map(ToString::to_string)
        .unwrap_or_default();
    Ok(ConfigResult::KeyValue {
        key: key.to_string(),
        value: format_value(&value),
        doc,
    })
}

/// Help text for every option in `schema`, nested options under dotted keys.
pub fn describe(schema: &Schema) -> ConfigResult {
    ConfigResult::Help {
        entries: schema.describe(),
    }
}

fn prefix_path(err: SchemafigError, dotted: &str) -> SchemafigError {
    dotted
        .rsplit('.')
        .fold(err, |err, segment| err.with_key(segment))
}

/// Walk nested schemas to find the option at a dotted path.
fn lookup_option<'a>(schema: &'a Schema, path: &KeyPath) -> Option<&'a ConfigOption> {
    let (first, rest) = path.segments().split_first()?;
    let option = schema.option(first)?;
    if rest.is_empty() {
        return Some(option);
    }
    match option.field_type() {
        FieldType::Nested(nested) => lookup_option(nested, &KeyPath::new(rest.to_vec())),
        FieldType::Value(_) => None,
    }
}

/// Format a resolved value for display: strings bare, everything else as JSON.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
