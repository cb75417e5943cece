//! Clap adapter for schemafig.
//!
//! This module is the **optional integration layer** between schemafig's
//! framework-agnostic core and the [clap](https://docs.rs/clap) CLI parser.
//! It is compiled only when the `clap` Cargo feature is enabled (on by
//! default).
//!
//! [`ConfigSourceArgs`] adds two repeatable arguments to any clap parser:
//!
//! - `-c, --config FILE` — a `.json`, `.yml` or `.yaml` file to merge in.
//! - `-o, --option KEY=VALUE` — an override for a dotted key.
//!
//! The only bridge to the core is [`ConfigSourceArgs::into_loader()`], which
//! hands the collected sources to a [`ConfigLoader`] in the order they were
//! given on the command line.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use crate::loader::ConfigLoader;
use crate::overrides::parse_override;
use crate::schema::Schema;

/// Clap-derived config source arguments.
///
/// Flatten this into your app's clap derive:
/// ```ignore
/// #[derive(Parser)]
/// struct Cli {
///     #[command(flatten)]
///     config: ConfigSourceArgs,
/// }
/// ```
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigSourceArgs {
    /// Config file to load (.json, .yml, .yaml). Later files win.
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Override a config value, e.g. `-o logging.level=DEBUG`. Later overrides win.
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE", value_parser = parse_override)]
    pub option: Vec<(String, String)>,
}

impl ConfigSourceArgs {
    /// Build a loader for `schema` from the parsed arguments.
    pub fn into_loader(self, schema: Arc<Schema>) -> ConfigLoader {
        ConfigLoader::new(schema)
            .files(self.config)
            .overrides(self.option)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::app_schema;
    use clap::Parser;
    use serde_json::json;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        config: ConfigSourceArgs,
    }

    fn parse(args: &[&str]) -> ConfigSourceArgs {
        TestCli::try_parse_from(args).unwrap().config
    }

    #[test]
    fn no_sources() {
        let args = parse(&["test"]);
        assert!(args.config.is_empty());
        assert!(args.option.is_empty());
    }

    #[test]
    fn repeated_files_keep_order() {
        let args = parse(&["test", "-c", "base.yaml", "--config", "local.json"]);
        assert_eq!(
            args.config,
            vec![PathBuf::from("base.yaml"), PathBuf::from("local.json")]
        );
    }

    #[test]
    fn options_parse_key_value() {
        let args = parse(&["test", "-o", "x=1", "--option", "logging.level=DEBUG"]);
        assert_eq!(
            args.option,
            vec![
                ("x".to_string(), "1".to_string()),
                ("logging.level".to_string(), "DEBUG".to_string()),
            ]
        );
    }

    #[test]
    fn malformed_option_is_rejected() {
        assert!(TestCli::try_parse_from(["test", "-o", "novalue"]).is_err());
        assert!(TestCli::try_parse_from(["test", "-o", "a=b=c"]).is_err());
    }

    #[test]
    fn into_loader_applies_overrides_in_order() {
        let args = parse(&["test", "-o", "x=1", "-o", "x=2", "-o", "ts=3,4"]);
        let config = args.into_loader(app_schema()).load().unwrap();
        assert_eq!(config.get_value("x").unwrap(), json!(2));
        assert_eq!(config.get_value("ts").unwrap(), json!([3, 4]));
    }
}
