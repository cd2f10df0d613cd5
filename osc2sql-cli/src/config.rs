//! Layered configuration for the `osc2sql` command.

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use osc2sql_core::{EmitOptions, IdPolicy, QuoteStyle};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_FACTOR, ARG_ID_POLICY, ARG_INPUT, ARG_OUTPUT, ARG_QUOTE_STYLE, ARG_RADIUS, CliError,
    DEFAULT_FACTOR, DEFAULT_RADIUS, ENV_INPUT,
};

/// Conversion arguments. Values may also come from a configuration file or
/// `OSC2SQL_CMDS_CONVERT_*` environment variables.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(name = "convert")]
#[ortho_config(prefix = "OSC2SQL")]
pub(crate) struct ConvertArgs {
    /// Path to the osmChange document (plain or `.bz2`).
    #[arg(short = 'i', long = ARG_INPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) input: Option<Utf8PathBuf>,
    /// Write SQL to this file instead of standard output.
    #[arg(short = 'o', long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
    /// Reserved; accepted for compatibility and otherwise ignored.
    #[arg(short = 'r', long = ARG_RADIUS, value_name = "int")]
    #[serde(default)]
    pub(crate) radius: Option<u32>,
    /// Reserved; accepted for compatibility and otherwise ignored.
    #[arg(short = 'f', long = ARG_FACTOR, value_name = "int")]
    #[serde(default)]
    pub(crate) factor: Option<u32>,
    /// Log per-operation detail to standard error.
    #[arg(short = 'v', long)]
    #[serde(default)]
    pub(crate) verbose: bool,
    /// Literal delimiter: `double` or `single`.
    #[arg(long = ARG_QUOTE_STYLE, value_name = "style")]
    #[serde(default)]
    pub(crate) quote_style: Option<QuoteStyle>,
    /// Identifier handling: `strict` skips malformed ids, `lenient` coerces
    /// them like C `atoi`.
    #[arg(long = ARG_ID_POLICY, value_name = "policy")]
    #[serde(default)]
    pub(crate) id_policy: Option<IdPolicy>,
}

impl ConvertArgs {
    pub(crate) fn into_config(self) -> Result<ConvertConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        ConvertConfig::try_from(merged)
    }
}

/// Resolved conversion configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ConvertConfig {
    /// Changeset to read.
    pub(crate) input: Utf8PathBuf,
    /// Destination file; standard output when absent.
    pub(crate) output: Option<Utf8PathBuf>,
    pub(crate) radius: u32,
    pub(crate) factor: u32,
    pub(crate) verbose: bool,
    pub(crate) options: EmitOptions,
}

impl ConvertConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        Self::require_existing(&self.input, ARG_INPUT)
    }

    fn require_existing(path: &Utf8Path, field: &'static str) -> Result<(), CliError> {
        match osc2sql_fs::file_is_file(path) {
            Ok(true) => Ok(()),
            Ok(false) => Err(CliError::SourcePathNotFile {
                field,
                path: path.to_path_buf(),
            }),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(CliError::MissingSourceFile {
                    field,
                    path: path.to_path_buf(),
                })
            }
            Err(source) => Err(CliError::InspectSourcePath {
                field,
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

impl TryFrom<ConvertArgs> for ConvertConfig {
    type Error = CliError;

    fn try_from(args: ConvertArgs) -> Result<Self, Self::Error> {
        let input = args.input.ok_or(CliError::MissingArgument {
            field: ARG_INPUT,
            env: ENV_INPUT,
        })?;
        Ok(Self {
            input,
            output: args.output,
            radius: args.radius.unwrap_or(DEFAULT_RADIUS),
            factor: args.factor.unwrap_or(DEFAULT_FACTOR),
            verbose: args.verbose,
            options: EmitOptions {
                quote_style: args.quote_style.unwrap_or_default(),
                id_policy: args.id_policy.unwrap_or_default(),
            },
        })
    }
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<ConvertConfig, CliError> {
    let merged = ConvertArgs::merge_from_layers(layers).map_err(CliError::from)?;
    ConvertConfig::try_from(merged)
}
