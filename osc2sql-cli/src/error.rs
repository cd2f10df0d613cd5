//! Error types emitted by the osc2sql CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use osc2sql_core::SessionError;
use osc2sql_data::ChangesetParseError;
use thiserror::Error;

/// Errors emitted by the osc2sql CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation, or help was requested.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the changeset failed.
    #[error("failed to open changeset at {path:?}: {source}")]
    OpenInput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The changeset could not be parsed.
    #[error("failed to parse changeset at {path:?}: {source}")]
    ParseInput {
        path: Utf8PathBuf,
        #[source]
        source: Box<ChangesetParseError>,
    },
    /// Creating the output file failed.
    #[error("failed to create output file {path:?}: {source}")]
    OpenOutput {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Writing SQL failed part way through.
    #[error("failed to write SQL to {destination}: {source}")]
    WriteOutput {
        destination: String,
        #[source]
        source: SessionError,
    },
}
