//! Command-line interface converting OSM changesets into SQL.
#![forbid(unsafe_code)]

use clap::Parser;
use env_logger::Env;
use log::debug;

mod config;
mod convert;
mod error;

pub use error::CliError;

use config::{ConvertArgs, ConvertConfig};

const ARG_INPUT: &str = "input";
const ARG_OUTPUT: &str = "output";
const ARG_RADIUS: &str = "radius";
const ARG_FACTOR: &str = "factor";
const ARG_QUOTE_STYLE: &str = "quote-style";
const ARG_ID_POLICY: &str = "id-policy";
const ENV_INPUT: &str = "OSC2SQL_CMDS_CONVERT_INPUT";

const DEFAULT_RADIUS: u32 = 8;
const DEFAULT_FACTOR: u32 = 32;

/// Run the osc2sql CLI with the current process arguments and environment.
///
/// # Errors
/// Returns [`CliError`] for usage errors (including `--help`), missing or
/// unreadable input, unparseable changesets, and output failures.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = resolve_convert_config(cli.convert)?;
    init_logging(config.verbose);
    convert::execute(&config)?;
    Ok(())
}

fn resolve_convert_config(args: ConvertArgs) -> Result<ConvertConfig, CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    Ok(config)
}

/// Diagnostics go to standard error so they never mix with SQL on
/// standard output. `RUST_LOG` overrides the level chosen here.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    if env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .try_init()
        .is_err()
    {
        debug!("logger already installed; keeping the existing one");
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "osc2sql",
    about = "Convert an OpenStreetMap osmChange file into SQL statements",
    version
)]
struct Cli {
    #[command(flatten)]
    convert: ConvertArgs,
}

#[cfg(test)]
mod tests;
