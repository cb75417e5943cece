//! Declarative, typed configuration schemas with layered YAML/JSON loading.
//!
//! Schemafig lets an application declare its configuration as a tree of
//! schemas (named options with types and defaults) and then load raw data
//! from YAML/JSON files and `key=value` overrides on top of it. Values are
//! converted and checked when they are read, and every error names the full
//! dotted path of the field that caused it.
//!
//! ```ignore
//! let logging = Schema::builder("LoggingConfig")
//!     .option(ConfigOption::new("level", "log level").with_type(Converter::LogLevel).with_default("INFO"))
//!     .build();
//! let app = Schema::builder("AppConfig")
//!     .option(ConfigOption::new("port", "port to listen on").with_type(Converter::Int).with_default(8080))
//!     .option(ConfigOption::new("logging", "logging settings").nested(logging))
//!     .build();
//!
//! let config = Schemafig::loader(app)
//!     .file("app.yaml")
//!     .override_token("logging.level=DEBUG")?
//!     .load()?;
//! config.validate()?;
//! let port: u16 = config.get_as("port")?;
//! ```
//!
//! # Schemas
//!
//! A [`Schema`] is an ordered list of [`ConfigOption`]s built with
//! [`SchemaBuilder`]. Each option has a name, a description, an optional
//! default, and a type: either a [`Converter`] for scalar and sequence values,
//! or another schema for a nested section. [`SchemaBuilder::extend`] inherits
//! every option of a base schema; re-declaring a name replaces the inherited
//! option.
//!
//! An option with no default is required, except a nested one. A nested
//! option that is missing from the data resolves over an empty mapping, so its
//! own fields fall back to their own defaults and report their own missing
//! values.
//!
//! # Layer precedence
//!
//! ```text
//! Schema defaults       ConfigOption::with_default
//!        ↑ overridden by
//! Config files          in the order given, later files win
//!        ↑ overridden by
//! Overrides             -o key=value, in the order given, later ones win
//! ```
//!
//! Sources are **deep-merged**: a later source that sets one nested key leaves
//! the sibling keys from earlier sources intact. A source that puts a scalar
//! where an earlier one had a mapping (or the reverse) is a
//! [`MergeConflict`](SchemafigError::MergeConflict): the sources disagree
//! about the shape of the tree and nothing sensible can be merged.
//!
//! # Resolution
//!
//! [`Config`] holds the merged raw tree and resolves options on every access;
//! nothing is cached. Resolution picks the raw value (or the default),
//! converts it, and for nested options wraps the sub-mapping in a new
//! [`Config`]. Overrides are stored as strings and converted here, so
//! `-o port=8080` and `port: 8080` in YAML resolve to the same integer.
//!
//! [`Config::validate`] resolves the entire tree once and stops at the first
//! error, in declaration order. [`Config::to_value`] resolves the entire tree
//! into plain nested mappings that can be serialized or loaded again.
//!
//! # Converters
//!
//! | Converter | Accepts | Produces |
//! |-----------|---------|----------|
//! | `Int`, `Float`, `Bool`, `Str` | native values and strings | the primitive |
//! | `List(T)` | a sequence, or a comma-separated string | a sequence of `T` |
//! | `Optional(T)` | `null` or a `T` | `null` or `T` |
//! | `Choice(..)` | one of the listed values | the same value |
//! | `LogLevel` | `"INFO"`, `"debug"`, `20`, ... | a numeric severity |
//!
//! An unknown level name resolves to [`LOG_LEVEL_UNKNOWN`]; use
//! [`level_filter`] to turn a severity into a `tracing` level filter.
//!
//! # Clap adapter
//!
//! With the `clap` feature (on by default), [`ConfigSourceArgs`] adds
//! `-c/--config FILE` and `-o/--option KEY=VALUE` to any clap parser and turns
//! them into a [`ConfigLoader`].
//!
//! # Error handling
//!
//! All fallible operations return [`SchemafigError`]. Path-carrying errors
//! accumulate their path one nesting level at a time via
//! [`SchemafigError::with_key`]. Enable the `rich-errors` feature for
//! `miette` diagnostics.

pub mod convert;
pub mod error;
pub mod types;

#[cfg(feature = "clap")]
mod cli;
mod config;
mod file;
mod flatten;
mod loader;
pub(crate) mod merge;
mod ops;
mod option;
mod overrides;
mod schema;

#[cfg(test)]
mod fixtures;

#[cfg(feature = "clap")]
pub use cli::ConfigSourceArgs;
pub use config::Config;
pub use convert::{ConvertError, Converter, LOG_LEVEL_UNKNOWN, level_filter};
pub use error::SchemafigError;
pub use loader::{ConfigLoader, Schemafig};
pub use merge::deep_merge;
pub use ops::{ConfigResult, describe, get_value, list_values};
pub use option::{ConfigOption, FieldType, Resolved};
pub use overrides::parse_override;
pub use schema::{Schema, SchemaBuilder};
pub use types::{Format, KeyPath};
