//! Dotted-key overrides: parse `key=value` tokens and write values into a
//! nested mapping tree.

use serde_json::{Map, Value};

use crate::error::SchemafigError;
use crate::types::KeyPath;

/// Parse a `key=value` override token.
///
/// The token must contain exactly one `=`. The value is kept as a raw string;
/// it is converted when the option is resolved.
pub fn parse_override(token: &str) -> Result<(String, String), SchemafigError> {
    let mut parts = token.split('=');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Ok((key.to_string(), value.to_string())),
        _ => Err(SchemafigError::MalformedOverride {
            token: token.to_string(),
        }),
    }
}

/// Write `value` at `path` inside `table`, creating intermediate mappings.
///
/// `["database", "url"]` with `"pg://"` turns `{}` into `{database = {url = "pg://"}}`.
/// An intermediate key that already holds a non-mapping is a
/// [`MergeConflict`](SchemafigError::MergeConflict). An empty path is a no-op.
pub fn set_nested(
    table: &mut Map<String, Value>,
    path: &KeyPath,
    value: Value,
) -> Result<(), SchemafigError> {
    let Some((leaf, parents)) = path.segments().split_last() else {
        return Ok(());
    };

    let mut current = table;
    let mut walked = KeyPath::default();
    for segment in parents {
        walked = walked.child(segment);
        current = match current
            .entry(segment.as_str())
            .or_insert_with(|| Value::Object(Map::new()))
        {
            Value::Object(next) => next,
            _ => return Err(SchemafigError::MergeConflict { path: walked }),
        };
    }

    current.insert(leaf.to_string(), value);
    Ok(())
}
