//! Schema declaration: an ordered, named set of [`ConfigOption`]s.
//!
//! Schemas are assembled with [`SchemaBuilder`] and shared as `Arc<Schema>`,
//! since nested options and every [`Config`](crate::Config) built from a
//! schema hold a reference to it.
//!
//! ```ignore
//! let logging = Schema::builder("LoggingConfig")
//!     .option(ConfigOption::new("level", "log level").with_type(Converter::LogLevel).with_default("INFO"))
//!     .build();
//!
//! let app = Schema::builder("AppConfig")
//!     .option(ConfigOption::new("port", "port").with_type(Converter::Int).with_default(8080))
//!     .option(ConfigOption::new("logging", "logging settings").nested(logging))
//!     .build();
//! ```
//!
//! Inheritance is explicit: [`SchemaBuilder::extend`] copies every option of a
//! base schema, and a later option with the same name replaces the inherited
//! one in place.

use std::sync::Arc;

use crate::option::{ConfigOption, FieldType};

#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    options: Vec<ConfigOption>,
}

impl Schema {
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            name: name.to_string(),
            options: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Options in declaration order (inherited options first).
    pub fn options(&self) -> &[ConfigOption] {
        &self.options
    }

    pub fn option(&self, name: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|opt| opt.name() == name)
    }

    /// Help text for every option, nested ones under dotted keys.
    ///
    /// Returns `(dotted_key, help)` pairs in declaration order, e.g.
    /// `("logging.level", "log level, default: \"INFO\", type: log_level")`.
    pub fn describe(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        self.describe_into("", &mut out);
        out
    }

    fn describe_into(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        for opt in &self.options {
            let dotted = if prefix.is_empty() {
                opt.name().to_string()
            } else {
                format!("{prefix}.{}", opt.name())
            };
            out.push((dotted.clone(), opt.to_string()));
            if let FieldType::Nested(nested) = opt.field_type() {
                nested.describe_into(&dotted, out);
            }
        }
    }
}

pub struct SchemaBuilder {
    name: String,
    options: Vec<ConfigOption>,
}

impl SchemaBuilder {
    /// Add an option, or replace an existing one with the same name.
    pub fn option(mut self, option: ConfigOption) -> Self {
        self.push(option);
        self
    }

    /// Inherit every option of `base`. Options added afterwards with the same
    /// name override the inherited ones.
    pub fn extend(mut self, base: &Schema) -> Self {
        for option in &base.options {
            self.push(option.clone());
        }
        self
    }

    pub fn build(self) -> Arc<Schema> {
        Arc::new(Schema {
            name: self.name,
            options: self.options,
        })
    }

    fn push(&mut self, option: ConfigOption) {
        match self.options.iter_mut().find(|o| o.name() == option.name()) {
            Some(slot) => *slot = option,
            None => self.options.push(option),
        }
    }
}
