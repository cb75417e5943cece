//! A configuration instance: a raw data tree bound to a [`Schema`].
//!
//! Values are never cached. Every accessor resolves from the live raw tree, so
//! a `set` or an ingestion call is visible to the very next read. Nested
//! sections returned by [`Config::section`] are built on demand over a copy of
//! the sub-mapping; writing to one does not write back to its parent. Use
//! dotted paths on the parent instead (`config.set("a.z", 30)`).

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::SchemafigError;
use crate::file;
use crate::merge::deep_merge;
use crate::option::Resolved;
use crate::overrides;
use crate::schema::Schema;
use crate::types::{Format, KeyPath};

#[derive(Debug, Clone)]
pub struct Config {
    schema: Arc<Schema>,
    data: Map<String, Value>,
}

impl Config {
    /// An empty instance: every option resolves to its default.
    pub fn new(schema: Arc<Schema>) -> Self {
        Self::with_data(schema, Map::new())
    }

    pub fn with_data(schema: Arc<Schema>, data: Map<String, Value>) -> Self {
        Self { schema, data }
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// The raw, unconverted data tree.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.data
    }

    // -- resolution ----------------------------------------------------------

    /// Resolve the option `name` from the current raw tree.
    pub fn get(&self, name: &str) -> Result<Resolved, SchemafigError> {
        let option = self
            .schema
            .option(name)
            .ok_or_else(|| SchemafigError::UnknownOption {
                path: KeyPath::key(name),
            })?;
        option.resolve(&self.data)
    }

    /// Resolve a value option. Fails with `ExpectedValue` for nested options.
    pub fn get_value(&self, name: &str) -> Result<Value, SchemafigError> {
        match self.get(name)? {
            Resolved::Value(value) => Ok(value),
            Resolved::Section(_) => Err(SchemafigError::ExpectedValue {
                path: KeyPath::key(name),
            }),
        }
    }

    /// Resolve a nested option into its own [`Config`].
    pub fn section(&self, name: &str) -> Result<Config, SchemafigError> {
        match self.get(name)? {
            Resolved::Section(section) => Ok(section),
            Resolved::Value(_) => Err(SchemafigError::ExpectedSection {
                path: KeyPath::key(name),
            }),
        }
    }

    /// Resolve a value option and deserialize it into `T`.
    ///
    /// ```ignore
    /// let port: u16 = config.get_as("port")?;
    /// let ts: Vec<i64> = config.get_as("ts")?;
    /// ```
    pub fn get_as<T: DeserializeOwned>(&self, name: &str) -> Result<T, SchemafigError> {
        let value = self.get_value(name)?;
        serde_json::from_value(value.clone()).map_err(|e| SchemafigError::InvalidValue {
            path: KeyPath::key(name),
            raw: value,
            reason: e.to_string(),
        })
    }

    /// Resolve an option by dotted path, descending through nested sections.
    /// Errors name the full path from this config down.
    pub fn get_path(&self, path: impl Into<KeyPath>) -> Result<Resolved, SchemafigError> {
        let path = path.into();
        self.get_segments(path.segments())
    }

    fn get_segments(&self, segments: &[String]) -> Result<Resolved, SchemafigError> {
        let Some((first, rest)) = segments.split_first() else {
            return Err(SchemafigError::UnknownOption {
                path: KeyPath::default(),
            });
        };
        let resolved = self.get(first)?;
        if rest.is_empty() {
            return Ok(resolved);
        }
        match resolved {
            Resolved::Section(section) => section.get_segments(rest).map_err(|e| e.with_key(first)),
            Resolved::Value(_) => Err(SchemafigError::ExpectedSection {
                path: KeyPath::key(first),
            }),
        }
    }

    // -- mutation ------------------------------------------------------------

    /// Write `value` at a dotted path, creating intermediate mappings.
    ///
    /// No conversion happens here; the value is checked when it is resolved.
    pub fn set(
        &mut self,
        path: impl Into<KeyPath>,
        value: impl Into<Value>,
    ) -> Result<(), SchemafigError> {
        overrides::set_nested(&mut self.data, &path.into(), value.into())
    }

    // -- whole-tree walks ----------------------------------------------------

    /// Resolve every option, descending into nested sections, and return the
    /// first error in declaration order.
    pub fn validate(&self) -> Result<(), SchemafigError> {
        for option in self.schema.options() {
            if let Resolved::Section(section) = option.resolve(&self.data)? {
                section.validate().map_err(|e| e.with_key(option.name()))?;
            }
        }
        Ok(())
    }

    /// Resolve the whole tree into plain nested mappings.
    ///
    /// The result contains converted values only and can be fed back through
    /// [`from_mapping`](Self::from_mapping) or serialized as YAML/JSON.
    pub fn to_value(&self) -> Result<Map<String, Value>, SchemafigError> {
        let mut out = Map::new();
        for option in self.schema.options() {
            let value = match option.resolve(&self.data)? {
                Resolved::Value(value) => value,
                Resolved::Section(section) => {
                    Value::Object(section.to_value().map_err(|e| e.with_key(option.name()))?)
                }
            };
            out.insert(option.name().to_string(), value);
        }
        Ok(out)
    }

    pub fn to_yaml_string(&self) -> Result<String, SchemafigError> {
        let tree = Value::Object(self.to_value()?);
        serde_yaml::to_string(&tree).map_err(|e| SchemafigError::SerializeError {
            format: Format::Yaml,
            reason: e.to_string(),
        })
    }

    pub fn to_json_string(&self) -> Result<String, SchemafigError> {
        let tree = Value::Object(self.to_value()?);
        serde_json::to_string_pretty(&tree).map_err(|e| SchemafigError::SerializeError {
            format: Format::Json,
            reason: e.to_string(),
        })
    }

    // -- ingestion -----------------------------------------------------------

    /// Deep-merge `mapping` into the raw tree. Later calls win, key by key.
    pub fn from_mapping(&mut self, mapping: Map<String, Value>) -> Result<(), SchemafigError> {
        deep_merge(&mut self.data, mapping)
    }

    pub fn from_yaml(&mut self, text: &str) -> Result<(), SchemafigError> {
        self.ingest(file::parse(text, Format::Yaml, "<yaml string>")?)
    }

    pub fn from_json(&mut self, text: &str) -> Result<(), SchemafigError> {
        self.ingest(file::parse(text, Format::Json, "<json string>")?)
    }

    /// Load a `.json`, `.yml` or `.yaml` file and merge it in.
    pub fn from_file(&mut self, path: impl AsRef<Path>) -> Result<(), SchemafigError> {
        let path = path.as_ref();
        let parsed = file::load(path)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        self.ingest(parsed)
    }

    fn ingest(&mut self, parsed: Option<Map<String, Value>>) -> Result<(), SchemafigError> {
        match parsed {
            Some(mapping) => self.from_mapping(mapping),
            None => Ok(()),
        }
    }
}
