//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use osc2sql_cli::{CliError, run};

fn main() {
    match run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => {
            eprint!("{err}");
            std::process::exit(1);
        }
        Err(err) => {
            eprintln!("osc2sql: {err}");
            std::process::exit(1);
        }
    }
}
