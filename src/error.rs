use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use crate::types::{Format, KeyPath};

#[derive(Debug, Error)]
#[cfg_attr(feature = "rich-errors", derive(miette::Diagnostic))]
pub enum SchemafigError {
    #[error("Unsupported file type '{extension}' (expected .json, .yml or .yaml)")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::unsupported_format)))]
    UnsupportedFormat { extension: String },

    #[error("Config option {path}: missing value")]
    #[cfg_attr(
        feature = "rich-errors",
        diagnostic(
            code(schemafig::missing_value),
            help("set it in a config file or pass -o {path}=<value>")
        )
    )]
    MissingValue { path: KeyPath },

    #[error("Config option {path}: invalid value {raw} ({reason})")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::invalid_value)))]
    InvalidValue {
        path: KeyPath,
        raw: Value,
        reason: String,
    },

    #[error("Cannot merge a mapping and a scalar at '{path}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::merge_conflict)))]
    MergeConflict { path: KeyPath },

    #[error("Expected an option in key=value format, got '{token}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::malformed_override)))]
    MalformedOverride { token: String },

    #[error("Unknown config option '{path}'")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::unknown_option)))]
    UnknownOption { path: KeyPath },

    #[error("Config option {path} is a nested section, not a value")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::expected_value)))]
    ExpectedValue { path: KeyPath },

    #[error("Config option {path} is a value, not a nested section")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::expected_section)))]
    ExpectedSection { path: KeyPath },

    #[error("Failed to parse {format} from {origin}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::parse_error)))]
    ParseError {
        origin: String,
        format: Format,
        reason: String,
    },

    #[error("Failed to serialize config as {format}: {reason}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::serialize_error)))]
    SerializeError { format: Format, reason: String },

    #[error("Failed to read {path}: {source}")]
    #[cfg_attr(feature = "rich-errors", diagnostic(code(schemafig::io_error)))]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl SchemafigError {
    /// Prefix `key` onto the path of a path-carrying error.
    ///
    /// Used at each nesting level so that the caller sees one error naming the
    /// full dotted path (`a.b.z`). Errors without a path are returned as-is.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            Self::MissingValue { path } => Self::MissingValue {
                path: path.prefixed(key),
            },
            Self::InvalidValue { path, raw, reason } => Self::InvalidValue {
                path: path.prefixed(key),
                raw,
                reason,
            },
            Self::MergeConflict { path } => Self::MergeConflict {
                path: path.prefixed(key),
            },
            Self::UnknownOption { path } => Self::UnknownOption {
                path: path.prefixed(key),
            },
            Self::ExpectedValue { path } => Self::ExpectedValue {
                path: path.prefixed(key),
            },
            Self::ExpectedSection { path } => Self::ExpectedSection {
                path: path.prefixed(key),
            },
            other => other,
        }
    }

    /// The dotted path this error refers to, if any.
    pub fn path(&self) -> Option<&KeyPath> {
        match self {
            Self::MissingValue { path }
            | Self::InvalidValue { path, .. }
            | Self::MergeConflict { path }
            | Self::UnknownOption { path }
            | Self::ExpectedValue { path }
            | Self::ExpectedSection { path } => Some(path),
            _ => None,
        }
    }
}
