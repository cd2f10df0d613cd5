//! The conversion pipeline: open the changeset, parse it, write SQL.

use std::io::{self, BufRead, BufReader, BufWriter, Write};

use bzip2::read::MultiBzDecoder;
use camino::Utf8Path;
use log::{debug, info};
use osc2sql_core::{ConversionReport, Session};
use osc2sql_data::parse_changeset;
use osc2sql_fs::{create_utf8_file, open_utf8_file};

use crate::{CliError, config::ConvertConfig};

const STDOUT_DESTINATION: &str = "standard output";

/// Returns true when `path` carries a `.bz2` extension, ignoring case.
pub(crate) fn is_bz2(path: &Utf8Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension.eq_ignore_ascii_case("bz2"))
}

/// Open the changeset, decompressing `.bz2` input on the fly.
pub(crate) fn open_input(path: &Utf8Path) -> Result<Box<dyn BufRead>, CliError> {
    let file = open_utf8_file(path).map_err(|source| CliError::OpenInput {
        path: path.to_path_buf(),
        source,
    })?;
    if is_bz2(path) {
        Ok(Box::new(BufReader::new(MultiBzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Run one conversion described by `config`.
pub(crate) fn execute(config: &ConvertConfig) -> Result<ConversionReport, CliError> {
    debug!(
        "radius {} and factor {} are accepted but do not affect emission",
        config.radius, config.factor
    );
    let input = open_input(&config.input)?;
    let document = parse_changeset(input).map_err(|source| CliError::ParseInput {
        path: config.input.clone(),
        source: Box::new(source),
    })?;

    let report = match &config.output {
        Some(path) => {
            let file = create_utf8_file(path).map_err(|source| CliError::OpenOutput {
                path: path.clone(),
                source,
            })?;
            write_sql(&document, BufWriter::new(file), config, path.as_str())?
        }
        None => write_sql(
            &document,
            BufWriter::new(io::stdout().lock()),
            config,
            STDOUT_DESTINATION,
        )?,
    };

    let summary = report.summary;
    info!(
        "converted {} operations ({} nodes, {} ways, {} skipped) into {} statements",
        summary.operations, summary.nodes, summary.ways, summary.skipped, summary.statements
    );
    Ok(report)
}

fn write_sql<W: Write>(
    document: &osc2sql_core::ChangesetDocument,
    output: W,
    config: &ConvertConfig,
    destination: &str,
) -> Result<ConversionReport, CliError> {
    Session::new(output, config.options)
        .convert(document)
        .map_err(|source| CliError::WriteOutput {
            destination: destination.to_owned(),
            source,
        })
}
