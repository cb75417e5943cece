//! A single schema field and the resolution algorithm that reads it.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::config::Config;
use crate::convert::Converter;
use crate::error::SchemafigError;
use crate::schema::Schema;
use crate::types::KeyPath;

/// How an option's raw value is turned into a resolved one.
#[derive(Debug, Clone)]
pub enum FieldType {
    /// Convert a scalar or sequence with a [`Converter`].
    Value(Converter),
    /// The value is a mapping that is itself described by a schema.
    Nested(Arc<Schema>),
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Value(conv) => write!(f, "{conv}"),
            FieldType::Nested(schema) => write!(f, "{}", schema.name()),
        }
    }
}

/// The outcome of resolving one option.
#[derive(Debug, Clone)]
pub enum Resolved {
    Value(Value),
    Section(Config),
}

/// A named, typed, optionally-defaulted schema field.
///
/// ```ignore
/// let port = ConfigOption::new("port", "Port to listen on")
///     .with_type(Converter::Int)
///     .with_default(8080);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigOption {
    name: String,
    description: String,
    default: Option<Value>,
    field_type: FieldType,
}

impl ConfigOption {
    /// A required, untyped option. Chain `with_type`, `nested` and
    /// `with_default` to refine it.
    pub fn new(name: &str, description: &str) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            default: None,
            field_type: FieldType::Value(Converter::Any),
        }
    }

    pub fn with_type(mut self, converter: Converter) -> Self {
        self.field_type = FieldType::Value(converter);
        self
    }

    pub fn nested(mut self, schema: Arc<Schema>) -> Self {
        self.field_type = FieldType::Nested(schema);
        self
    }

    /// Set the default. `Value::Null` is a real default, distinct from having none.
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn field_type(&self) -> &FieldType {
        &self.field_type
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.field_type, FieldType::Nested(_))
    }

    /// Resolve this option against `data`, the raw mapping of the config that
    /// owns it.
    ///
    /// 1. Take `data[name]`, else the default, else (for nested options only)
    ///    an empty mapping; otherwise the value is missing.
    /// 2. Convert it. Nested options become a [`Config`] over the mapping
    ///    (`null` counts as empty); their own fields are resolved later, on
    ///    access.
    ///
    /// Errors carry a path of just `[name]`; callers further up prefix their
    /// own keys.
    pub fn resolve(&self, data: &Map<String, Value>) -> Result<Resolved, SchemafigError> {
        let raw = match (data.get(&self.name), &self.default) {
            (Some(raw), _) => raw.clone(),
            (None, Some(default)) => default.clone(),
            // A nested config reports its own missing fields, one by one.
            (None, None) if self.is_nested() => Value::Object(Map::new()),
            (None, None) => {
                return Err(SchemafigError::MissingValue {
                    path: KeyPath::key(&self.name),
                });
            }
        };
        tracing::trace!(option = %self.name, raw = %raw, "resolving config option");

        match &self.field_type {
            FieldType::Value(conv) => conv.convert(&raw).map(Resolved::Value).map_err(|e| {
                SchemafigError::InvalidValue {
                    path: KeyPath::key(&self.name),
                    raw,
                    reason: e.to_string(),
                }
            }),
            FieldType::Nested(schema) => match raw {
                Value::Object(map) => Ok(Resolved::Section(Config::with_data(schema.clone(), map))),
                // `section:` with every child commented out parses as null.
                Value::Null => Ok(Resolved::Section(Config::new(schema.clone()))),
                other => Err(SchemafigError::InvalidValue {
                    path: KeyPath::key(&self.name),
                    raw: other,
                    reason: format!("expected a mapping for {}", schema.name()),
                }),
            },
        }
    }
}

/// One-line help text: `description, default: X, type: T`.
impl fmt::Display for ConfigOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description)?;
        if let Some(default) = &self.default {
            write!(f, ", default: {default}")?;
        }
        if !matches!(self.field_type, FieldType::Value(Converter::Any)) {
            write!(f, ", type: {}", self.field_type)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::a_schema;
    use serde_json::json;

    fn data(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected an object, got {other}"),
        }
    }

    fn resolved_value(resolved: Resolved) -> Value {
        match resolved {
            Resolved::Value(v) => v,
            Resolved::Section(_) => panic!("expected a value"),
        }
    }

    #[test]
    fn default_used_when_key_absent() {
        let opt = ConfigOption::new("z", "z").with_type(Converter::Int).with_default(20);
        let v = resolved_value(opt.resolve(&Map::new()).unwrap());
        assert_eq!(v, json!(20));
    }

    #[test]
    fn supplied_key_overrides_default() {
        let opt = ConfigOption::new("z", "z").with_type(Converter::Int).with_default(20);
        let v = resolved_value(opt.resolve(&data(json!({"z": "25"}))).unwrap());
        assert_eq!(v, json!(25));
    }

    #[test]
    fn null_default_is_a_real_default() {
        let opt = ConfigOption::new("o", "o")
            .with_type(Converter::optional(Converter::Int))
            .with_default(Value::Null);
        let v = resolved_value(opt.resolve(&Map::new()).unwrap());
        assert_eq!(v, Value::Null);
    }

    #[test]
    fn missing_required_value() {
        let opt = ConfigOption::new("x", "x").with_type(Converter::Int);
        let err = opt.resolve(&Map::new()).unwrap_err();
        match err {
            SchemafigError::MissingValue { path } => assert_eq!(path.to_string(), "x"),
            other => panic!("expected MissingValue, got {other:?}"),
        }
    }

    #[test]
    fn conversion_failure_becomes_invalid_value() {
        let opt = ConfigOption::new("x", "x").with_type(Converter::Int);
        let err = opt.resolve(&data(json!({"x": "ten"}))).unwrap_err();
        match err {
            SchemafigError::InvalidValue { path, raw, .. } => {
                assert_eq!(path.to_string(), "x");
                assert_eq!(raw, json!("ten"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn nested_without_value_or_default_gets_empty_mapping() {
        let opt = ConfigOption::new("a", "a").nested(a_schema());
        match opt.resolve(&Map::new()).unwrap() {
            Resolved::Section(section) => {
                assert!(section.raw().is_empty());
                assert_eq!(section.get_value("z").unwrap(), json!(20));
            }
            Resolved::Value(v) => panic!("expected a section, got {v}"),
        }
    }

    #[test]
    fn nested_null_is_an_empty_section() {
        let opt = ConfigOption::new("a", "a").nested(a_schema());
        match opt.resolve(&data(json!({"a": null}))).unwrap() {
            Resolved::Section(section) => {
                assert!(section.raw().is_empty());
                assert_eq!(section.get_value("z").unwrap(), json!(20));
            }
            Resolved::Value(v) => panic!("expected a section, got {v}"),
        }
    }

    #[test]
    fn nested_scalar_is_invalid() {
        let opt = ConfigOption::new("a", "a").nested(a_schema());
        let err = opt.resolve(&data(json!({"a": 5}))).unwrap_err();
        assert!(matches!(err, SchemafigError::InvalidValue { .. }));
    }

    #[test]
    fn help_text() {
        let opt = ConfigOption::new("level", "log level")
            .with_type(Converter::LogLevel)
            .with_default("INFO");
        assert_eq!(opt.to_string(), "log level, default: \"INFO\", type: log_level");

        let untyped = ConfigOption::new("x", "anything");
        assert_eq!(untyped.to_string(), "anything");

        let nested = ConfigOption::new("a", "sub").nested(a_schema());
        assert_eq!(nested.to_string(), "sub, type: AConfig");
    }
}
