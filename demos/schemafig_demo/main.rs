//! # schemafig demo application
//!
//! A sample CLI tool showing how to wire [schemafig](https://docs.rs/schemafig)
//! into an application. It exists to demonstrate and manually verify the
//! library's features.
//!
//! ## Running
//!
//! ```sh
//! cargo run --example schemafig_demo -- dump
//! cargo run --example schemafig_demo -- -c app.yaml -o logging.level=DEBUG list
//! ```
//!
//! ## Features demonstrated
//!
//! | Feature                 | How to exercise it                                                   |
//! |-------------------------|----------------------------------------------------------------------|
//! | Schema defaults         | `cargo run --example schemafig_demo -- dump`                         |
//! | Config files            | `... -- -c base.yaml -c local.json dump` (later file wins)           |
//! | Overrides               | `... -- -o x=3 -o s1.foo=5 dump`                                     |
//! | List converter          | `... -- -o ts=1,2,3 dump`                                            |
//! | Choice validation       | `... -- -o logging.mode=stdout dump` (fails with a dotted path)      |
//! | Log level → tracing     | `... -- -o logging.level=DEBUG dump` (debug events on stderr)        |
//! | Single key lookup       | `... -- get logging.level`                                           |
//! | Flattened listing       | `... -- list`                                                        |
//! | Option help             | `... -- help-options`                                                |

mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use schemafig::{ConfigSourceArgs, SchemafigError, level_filter};

/// schemafig demo: load, validate and print a layered configuration.
#[derive(Parser, Debug)]
#[command(name = "schemafig-demo")]
struct Cli {
    #[command(flatten)]
    sources: ConfigSourceArgs,

    /// Dump format for the `dump` command.
    #[arg(long, global = true, default_value = "yaml", value_parser = ["yaml", "json"])]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the whole resolved configuration.
    Dump,
    /// Print every resolved key as `key = value`.
    List,
    /// Print one resolved key and its documentation.
    Get {
        /// Dotted key path (e.g. "logging.level").
        key: String,
    },
    /// Print the help text of every option.
    HelpOptions,
}

fn init_tracing(config: &schemafig::Config) {
    let severity = config
        .section("logging")
        .and_then(|logging| logging.get_as::<i64>("level"))
        .unwrap_or(20);
    let level = level_filter(severity).unwrap_or(tracing::level_filters::LevelFilter::INFO);
    // RUST_LOG wins over logging.level when set.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), SchemafigError> {
    let schema = config::app_schema();

    if let Commands::HelpOptions = cli.command {
        println!("{}", schemafig::describe(&schema));
        return Ok(());
    }

    let config = cli.sources.into_loader(schema).load()?;
    config.validate()?;
    init_tracing(&config);
    tracing::debug!("configuration loaded and validated");

    match cli.command {
        Commands::Dump => {
            let text = match cli.format.as_str() {
                "json" => config.to_json_string()?,
                _ => config.to_yaml_string()?,
            };
            print!("{text}");
            if !text.ends_with('\n') {
                println!();
            }
        }
        Commands::List => println!("{}", schemafig::list_values(&config)?),
        Commands::Get { key } => println!("{}", schemafig::get_value(&config, &key)?),
        Commands::HelpOptions => {}
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Config error:\n{e}");
        std::process::exit(1);
    }
}
