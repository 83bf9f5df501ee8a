#![allow(clippy::doc_markdown)]
//! `qparams` - read and write typed URL query parameters
//!
//! Usage:
//!   `qparams get "http://shop.test/?page=2&q=shoes" page q`
//!   `qparams set "http://shop.test/?page=2" page=3 sort=price`
//!   `qparams set "http://shop.test/?page=2" q=boots --replace`

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand};
use queryparams_core::value::to_json_object;
use queryparams_core::{
    cast, MemoryNavigator, ParamValue, ParameterSet, QueryParams, QueryParamsConfig, QueryParamsProvider,
    SetOptions,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "qparams")]
#[command(author, version, about = "qparams - typed URL query parameters")]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "QUERYPARAMS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the cast values of KEYs in URL as JSON
    Get {
        /// URL to read from
        url: String,

        /// Keys to read
        #[arg(required = true)]
        keys: Vec<String>,
    },

    /// Write KEY=VALUE pairs into URL and print the result
    Set {
        /// URL to write into
        url: String,

        /// Assignments; values are cast like query values (`n=1` is a number)
        #[arg(required = true)]
        assignments: Vec<String>,

        /// Drop the existing query string instead of merging into it
        #[arg(long)]
        replace: bool,

        /// Write onto this URL's base instead of URL's (the query still comes from URL)
        #[arg(long)]
        target: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    init_logging(&config, cli.verbose);

    let navigator = match &cli.command {
        Commands::Get { url, .. } | Commands::Set { url, .. } => {
            Rc::new(MemoryNavigator::new(url.as_str()))
        }
    };
    let store = QueryParams::builder()
        .navigator(navigator)
        .provider(Rc::new(QueryParamsProvider::new()))
        .config(config.write)
        .build()?;

    match cli.command {
        Commands::Get { keys, .. } => {
            let found = store.get(&keys);
            let json = serde_json::Value::Object(to_json_object(&found));
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        Commands::Set {
            assignments,
            replace,
            target,
            ..
        } => {
            let params = parse_assignments(&assignments)?;
            let options = SetOptions {
                replace: replace.then_some(true),
                url: target,
            };
            let url = store.set(&params, &options)?;
            println!("{url}");
        }
    }

    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<QueryParamsConfig> {
    let config = match path {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            QueryParamsConfig::load_from_path(path)
        }
        None => QueryParamsConfig::load(),
    }
    .context("failed to load configuration")?;

    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`, which wins over
/// the configured level.
fn init_logging(config: &QueryParamsConfig, verbose: u8) {
    let level = match verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if config.logging.format == "compact" {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn parse_assignments(assignments: &[String]) -> anyhow::Result<ParameterSet> {
    let mut params = ParameterSet::new();
    for assignment in assignments {
        let Some((key, value)) = assignment.split_once('=') else {
            bail!("expected KEY=VALUE, got `{assignment}`");
        };
        if key.is_empty() {
            bail!("empty key in `{assignment}`");
        }
        // Blank text would cast to 0; keep it as the string the user typed.
        let value = if value.trim().is_empty() {
            ParamValue::String(value.to_string())
        } else {
            cast(value)
        };
        params.insert(key.to_string(), value);
    }
    Ok(params)
}
