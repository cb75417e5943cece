//! Schemas for the schemafig demo application.
//!
//! The root [`app_schema`] mixes every converter kind with three nested
//! sections: two instances of [`sub_schema`] and one [`logging_schema`].
//!
//! # Key mapping
//!
//! | Override                      | Resolves to                  |
//! |-------------------------------|------------------------------|
//! | `-o x=3`                      | `x: 3`                       |
//! | `-o ts=1,2,3`                 | `ts: [1, 2, 3]`              |
//! | `-o o=7`                      | `o: 7` (`null` by default)   |
//! | `-o s1.foo=5`                 | `s1.foo: 5`                  |
//! | `-o logging.level=DEBUG`      | `logging.level: 10`          |
//! | `-o logging.mode=syslog`      | `logging.mode: syslog`       |

use std::sync::Arc;

use serde_json::Value;

use schemafig::{ConfigOption, Converter, Schema};

/// Logging settings. `level` drives the demo's tracing subscriber.
pub fn logging_schema() -> Arc<Schema> {
    Schema::builder("LoggingConfig")
        .option(
            ConfigOption::new("level", "log level")
                .with_type(Converter::LogLevel)
                .with_default("INFO"),
        )
        .option(
            ConfigOption::new("mode", "log mode")
                .with_type(Converter::choice(["file", "syslog"]))
                .with_default("file"),
        )
        .build()
}

pub fn sub_schema() -> Arc<Schema> {
    Schema::builder("SubConfig")
        .option(ConfigOption::new("foo", "foo").with_type(Converter::Int).with_default(0))
        .option(ConfigOption::new("bar", "bar").with_type(Converter::Int).with_default(0))
        .build()
}

pub fn app_schema() -> Arc<Schema> {
    Schema::builder("AppConfig")
        .option(ConfigOption::new("x", "x").with_type(Converter::Int).with_default(0))
        .option(ConfigOption::new("y", "y").with_type(Converter::Int).with_default(0))
        .option(
            ConfigOption::new("ts", "ts")
                .with_type(Converter::list(Converter::Int))
                .with_default(Vec::<i64>::new()),
        )
        .option(
            ConfigOption::new("o", "o")
                .with_type(Converter::optional(Converter::Int))
                .with_default(Value::Null),
        )
        .option(ConfigOption::new("s1", "s1").nested(sub_schema()))
        .option(ConfigOption::new("s2", "s2").nested(sub_schema()))
        .option(ConfigOption::new("logging", "logging").nested(logging_schema()))
        .build()
}
