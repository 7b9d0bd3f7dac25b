//! Resolve a parameter schema against the process and print the result.
//!
//! The schema path is read from `PARAMSTACK_SCHEMA`, an optional
//! configuration file from `PARAMSTACK_CONFIG`, and the output format
//! (`json` or `text`) from `PARAMSTACK_FORMAT`. Logging is controlled with
//! `RUST_LOG` and written to standard error.

mod error;

use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use paramstack::{ArgvSource, EnvSource, FileSource, OutputFormat, ParamSpecSet, Resolution, Resolver};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{DemoError, Result};

const SCHEMA_VAR: &str = "PARAMSTACK_SCHEMA";
const CONFIG_VAR: &str = "PARAMSTACK_CONFIG";
const FORMAT_VAR: &str = "PARAMSTACK_FORMAT";

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_logging();
    run().map_err(color_eyre::eyre::Report::from)
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("paramstack=warn"));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn run() -> Result<()> {
    let schema_path = env::var_os(SCHEMA_VAR)
        .map(PathBuf::from)
        .ok_or(DemoError::MissingSchema(SCHEMA_VAR))?;
    let specs = ParamSpecSet::from_path(&schema_path)?;
    let format = match env::var(FORMAT_VAR) {
        Ok(name) => name.parse::<OutputFormat>()?,
        Err(_) => OutputFormat::default(),
    };
    let file = match env::var_os(CONFIG_VAR).map(PathBuf::from) {
        Some(path) => {
            info!(config = %path.display(), "reading configuration file");
            FileSource::Path(path)
        }
        None => FileSource::None,
    };

    let outcome = Resolver::new(&specs)
        .argv(ArgvSource::Process)
        .env(EnvSource::Process)
        .file(file)
        .resolve()?;

    let mut stdout = io::stdout().lock();
    match outcome {
        Resolution::HelpRequested(text) => stdout.write_all(text.as_bytes())?,
        Resolution::Resolved(params) => {
            let rendered = params.render(format)?;
            stdout.write_all(rendered.as_bytes())?;
            if !rendered.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    stdout.flush()?;
    Ok(())
}
