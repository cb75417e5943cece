#[cfg(test)]
pub mod test {
    use std::sync::Arc;

    use crate::convert::Converter;
    use crate::option::ConfigOption;
    use crate::schema::Schema;

    /// `z: int = 20`
    pub fn a_schema() -> Arc<Schema> {
        Schema::builder("AConfig")
            .option(ConfigOption::new("z", "z").with_type(Converter::Int).with_default(20))
            .build()
    }

    /// `a: AConfig`, `x: int = 1`, `y: str = "foo"`
    pub fn some_schema() -> Arc<Schema> {
        Schema::builder("SomeConfig")
            .option(ConfigOption::new("a", "a").nested(a_schema()))
            .option(ConfigOption::new("x", "x").with_type(Converter::Int).with_default(1))
            .option(ConfigOption::new("y", "y").with_type(Converter::Str).with_default("foo"))
            .build()
    }

    /// `a: { z: int }` with `z` required, plus a required top-level `name`
    /// declared after it.
    pub fn required_schema() -> Arc<Schema> {
        let inner = Schema::builder("RequiredInner")
            .option(ConfigOption::new("z", "z").with_type(Converter::Int))
            .build();
        let middle = Schema::builder("RequiredMiddle")
            .option(ConfigOption::new("b", "b").nested(inner.clone()))
            .build();
        Schema::builder("RequiredConfig")
            .option(ConfigOption::new("a", "a").nested(inner))
            .option(ConfigOption::new("deep", "deep").nested(middle))
            .option(ConfigOption::new("name", "name").with_type(Converter::Str))
            .build()
    }

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

    /// Every converter kind plus two instances of the same nested schema.
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
                    .with_default(serde_json::Value::Null),
            )
            .option(ConfigOption::new("s1", "s1").nested(sub_schema()))
            .option(ConfigOption::new("s2", "s2").nested(sub_schema()))
            .option(ConfigOption::new("logging", "logging").nested(logging_schema()))
            .build()
    }
}
