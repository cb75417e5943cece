//! Value converters: coerce a raw configuration value into a typed one.
//!
//! Raw values come from YAML/JSON files (already typed, roughly) and from
//! `-o key=value` overrides (always strings), so every converter that targets a
//! scalar type also parses strings. Converters are a closed set; new behaviors
//! are added as new [`Converter`] variants.

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;
use tracing::level_filters::LevelFilter;

/// Severity returned by [`Converter::LogLevel`] for a name it does not know.
pub const LOG_LEVEL_UNKNOWN: i64 = -1;

const LOG_LEVELS: &[(&str, i64)] = &[
    ("CRITICAL", 50),
    ("FATAL", 50),
    ("ERROR", 40),
    ("WARNING", 30),
    ("WARN", 30),
    ("INFO", 20),
    ("DEBUG", 10),
    ("TRACE", 5),
    ("NOTSET", 0),
];

/// Why a converter rejected a value. Wrapped into
/// [`SchemafigError::InvalidValue`](crate::SchemafigError::InvalidValue) by
/// option resolution, which adds the key path and the raw value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConvertError(pub String);

impl ConvertError {
    fn expected(what: &str, raw: &Value) -> Self {
        ConvertError(format!("expected {what}, got {}", kind_name(raw)))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Converter {
    /// Pass the raw value through unchanged.
    Any,
    Bool,
    Int,
    Float,
    Str,
    /// A comma-delimited string or a sequence, each element converted.
    List(Box<Converter>),
    /// `null` passes through; anything else goes to the inner converter.
    Optional(Box<Converter>),
    /// The value must equal one of the listed values.
    Choice(Vec<Value>),
    /// A level name (`"INFO"`) or a number, converted to a numeric severity.
    LogLevel,
}

impl Converter {
    pub fn list(inner: Converter) -> Self {
        Converter::List(Box::new(inner))
    }

    pub fn optional(inner: Converter) -> Self {
        Converter::Optional(Box::new(inner))
    }

    pub fn choice<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Converter::Choice(values.into_iter().map(Into::into).collect())
    }

    pub fn convert(&self, raw: &Value) -> Result<Value, ConvertError> {
        match self {
            Converter::Any => Ok(raw.clone()),
            Converter::Bool => to_bool(raw).map(Value::Bool),
            Converter::Int => to_int(raw).map(Value::from),
            Converter::Float => to_float(raw),
            Converter::Str => to_str(raw).map(Value::String),
            Converter::List(inner) => to_list(inner, raw),
            Converter::Optional(inner) => match raw {
                Value::Null => Ok(Value::Null),
                other => inner.convert(other),
            },
            Converter::Choice(allowed) => {
                if allowed.contains(raw) {
                    Ok(raw.clone())
                } else {
                    Err(ConvertError(format!("must be one of {}", list_display(allowed))))
                }
            }
            Converter::LogLevel => to_log_level(raw).map(Value::from),
        }
    }
}

impl fmt::Display for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Converter::Any => write!(f, "any"),
            Converter::Bool => write!(f, "bool"),
            Converter::Int => write!(f, "int"),
            Converter::Float => write!(f, "float"),
            Converter::Str => write!(f, "str"),
            Converter::List(inner) => write!(f, "list[{inner}]"),
            Converter::Optional(inner) => write!(f, "optional[{inner}]"),
            Converter::Choice(allowed) => write!(f, "choice{}", list_display(allowed)),
            Converter::LogLevel => write!(f, "log_level"),
        }
    }
}

/// Map a numeric severity (as produced by [`Converter::LogLevel`]) to a
/// `tracing` level filter. Returns `None` for [`LOG_LEVEL_UNKNOWN`] and other
/// negative severities.
pub fn level_filter(severity: i64) -> Option<LevelFilter> {
    match severity {
        s if s >= 40 => Some(LevelFilter::ERROR),
        s if s >= 30 => Some(LevelFilter::WARN),
        s if s >= 20 => Some(LevelFilter::INFO),
        s if s >= 10 => Some(LevelFilter::DEBUG),
        s if s >= 0 => Some(LevelFilter::TRACE),
        _ => None,
    }
}

fn to_bool(raw: &Value) -> Result<bool, ConvertError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(ConvertError::expected("a boolean", raw)),
        },
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(ConvertError(format!("cannot parse {s:?} as a boolean"))),
        },
        _ => Err(ConvertError::expected("a boolean", raw)),
    }
}

fn to_int(raw: &Value) -> Result<i64, ConvertError> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            match n.as_f64() {
                Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                    Ok(f as i64)
                }
                _ => Err(ConvertError(format!("{n} is not an integer"))),
            }
        }
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|e| ConvertError(format!("cannot parse {s:?} as an integer: {e}"))),
        _ => Err(ConvertError::expected("an integer", raw)),
    }
}

fn to_float(raw: &Value) -> Result<Value, ConvertError> {
    let f = match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ConvertError(format!("{n} is not a float")))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| ConvertError(format!("cannot parse {s:?} as a float: {e}")))?,
        _ => return Err(ConvertError::expected("a float", raw)),
    };
    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| ConvertError(format!("{f} is not a finite float")))
}

fn to_str(raw: &Value) -> Result<String, ConvertError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ConvertError::expected("a string", raw)),
    }
}

fn to_list(inner: &Converter, raw: &Value) -> Result<Value, ConvertError> {
    let items: Vec<Value> = match raw {
        Value::String(s) if s.is_empty() => Vec::new(),
        Value::String(s) => s.split(',').map(|part| Value::String(part.to_string())).collect(),
        Value::Array(items) => items.clone(),
        _ => return Err(ConvertError::expected("a list or comma-separated string", raw)),
    };
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            inner
                .convert(item)
                .map_err(|e| ConvertError(format!("element {i}: {e}")))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}

fn to_log_level(raw: &Value) -> Result<i64, ConvertError> {
    match raw {
        Value::Number(n) => n
            .as_i64()
            .ok_or_else(|| ConvertError(format!("{n} is not a log level"))),
        Value::String(s) => {
            let name = s.trim();
            if let Ok(level) = name.parse::<i64>() {
                return Ok(level);
            }
            let upper = name.to_ascii_uppercase();
            Ok(LOG_LEVELS
                .iter()
                .find(|(known, _)| *known == upper)
                .map(|(_, level)| *level)
                .unwrap_or(LOG_LEVEL_UNKNOWN))
        }
        _ => Err(ConvertError::expected("a log level name or number", raw)),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

fn list_display(values: &[Value]) -> String {
    let parts: Vec<String> = values
        .iter()
        .map(|v| match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
        .collect();
    format!("[{}]", parts.join(", "))
}
