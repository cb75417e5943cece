use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;

use crate::config::Config;
use crate::error::SchemafigError;
use crate::overrides::parse_override;
use crate::schema::Schema;

/// Entry point for loading a configuration from files and overrides.
pub struct Schemafig;

impl Schemafig {
    pub fn loader(schema: Arc<Schema>) -> ConfigLoader {
        ConfigLoader::new(schema)
    }
}

/// Collects config sources and applies them, in order, onto one [`Config`].
///
/// Precedence, lowest to highest:
///
/// ```text
/// Schema defaults
///        ↑ overridden by
/// Config files          in the order added, later files win
///        ↑ overridden by
/// Overrides             key=value, in the order added, later overrides win
/// ```
///
/// Files are deep-merged, so a later file overriding one nested key leaves
/// its siblings from earlier files intact. Override values are stored as raw
/// strings and converted when the option is resolved.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schema: Arc<Schema>,
    files: Vec<PathBuf>,
    overrides: Vec<(String, String)>,
}

impl ConfigLoader {
    pub fn new(schema: Arc<Schema>) -> Self {
        Self {
            schema,
            files: Vec::new(),
            overrides: Vec::new(),
        }
    }

    /// Add a config file (`.json`, `.yml` or `.yaml`).
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.files.push(path.into());
        self
    }

    pub fn files<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.files.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Add an override for a dotted key.
    pub fn override_value(mut self, key: &str, value: &str) -> Self {
        self.overrides.push((key.to_string(), value.to_string()));
        self
    }

    pub fn overrides<I>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.overrides.extend(pairs);
        self
    }

    /// Add an override from a `key=value` token.
    pub fn override_token(self, token: &str) -> Result<Self, SchemafigError> {
        let (key, value) = parse_override(token)?;
        Ok(self.override_value(&key, &value))
    }

    /// Build the config: files first, then overrides, each in the order added.
    ///
    /// The result is not validated; call [`Config::validate`] once all
    /// sources are in.
    pub fn load(&self) -> Result<Config, SchemafigError> {
        let mut config = Config::new(self.schema.clone());
        for path in &self.files {
            config.from_file(path)?;
        }
        for (key, value) in &self.overrides {
            tracing::debug!(key = %key, value = %value, "applying config override");
            config.set(key.as_str(), Value::String(value.clone()))?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::app_schema;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn defaults_only() {
        let config = Schemafig::loader(app_schema()).load().unwrap();
        assert_eq!(config.get_value("x").unwrap(), json!(0));
        assert!(config.raw().is_empty());
    }

    #[test]
    fn later_file_overrides_earlier() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("first.yaml");
        let second = dir.path().join("second.json");
        fs::write(&first, "x: 1\ny: 1\ns1:\n  foo: 1\n  bar: 1\n").unwrap();
        fs::write(&second, r#"{"x": 2, "s1": {"bar": 2}}"#).unwrap();

        let config = Schemafig::loader(app_schema())
            .files([&first, &second])
            .load()
            .unwrap();
        assert_eq!(config.get_value("x").unwrap(), json!(2));
        assert_eq!(config.get_value("y").unwrap(), json!(1));
        let s1 = config.section("s1").unwrap();
        assert_eq!(s1.get_value("foo").unwrap(), json!(1));
        assert_eq!(s1.get_value("bar").unwrap(), json!(2));
    }

    #[test]
    fn overrides_beat_files_and_later_overrides_win() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("app.yml");
        fs::write(&file, "x: 1\nlogging:\n  level: ERROR\n").unwrap();

        let config = Schemafig::loader(app_schema())
            .file(&file)
            .override_value("x", "5")
            .override_token("logging.level=DEBUG")
            .unwrap()
            .override_value("x", "7")
            .load()
            .unwrap();
        assert_eq!(config.get_value("x").unwrap(), json!(7));
        assert_eq!(config.raw()["x"], json!("7"));
        let logging = config.section("logging").unwrap();
        assert_eq!(logging.get_value("level").unwrap(), json!(10));
        config.validate().unwrap();
    }

    #[test]
    fn malformed_token_is_rejected() {
        let result = Schemafig::loader(app_schema()).override_token("x");
        assert!(matches!(
            result,
            Err(SchemafigError::MalformedOverride { .. })
        ));
    }

    #[test]
    fn unsupported_file_fails_load() {
        let err = Schemafig::loader(app_schema())
            .file("config.toml")
            .load()
            .unwrap_err();
        assert!(matches!(err, SchemafigError::UnsupportedFormat { .. }));
    }

    #[test]
    fn bad_override_value_surfaces_at_validate() {
        let config = Schemafig::loader(app_schema())
            .override_value("s2.foo", "many")
            .load()
            .unwrap();
        match config.validate().unwrap_err() {
            SchemafigError::InvalidValue { path, raw, .. } => {
                assert_eq!(path.to_string(), "s2.foo");
                assert_eq!(raw, json!("many"));
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }
}
