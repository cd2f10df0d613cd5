//! One conversion run: framing, walk, flush.

use std::{
    fmt,
    io::{self, Write},
};

use log::warn;
use thiserror::Error;

use crate::{
    dispatch::Dispatcher,
    document::ChangesetDocument,
    options::EmitOptions,
    report::ConversionReport,
    sql::SqlWriter,
    walk::walk,
};

/// Written before the first statement.
pub const PREAMBLE: &str = "set character set utf8;\nSET AUTOCOMMIT=0;\n";

/// Written after the last statement.
pub const POSTAMBLE: &str = "COMMIT;\n";

/// Point in a session at which output failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStage {
    /// Writing the transaction preamble.
    Preamble,
    /// Emitting statements during the walk.
    Statements,
    /// Writing the transaction postamble.
    Postamble,
    /// Flushing the output stream.
    Flush,
}

impl fmt::Display for SessionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preamble => "preamble",
            Self::Statements => "statements",
            Self::Postamble => "postamble",
            Self::Flush => "flush",
        })
    }
}

/// Errors raised by [`Session::convert`].
#[derive(Debug, Error)]
pub enum SessionError {
    /// The output stream rejected a write.
    #[error("failed to write SQL {stage}")]
    Write {
        /// What was being written.
        stage: SessionStage,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl SessionError {
    const fn at(stage: SessionStage, source: io::Error) -> Self {
        Self::Write { stage, source }
    }
}

/// Converts a document into SQL on one output stream.
///
/// # Examples
/// ```
/// use osc2sql_core::{ChangesetDocument, EmitOptions, Session, POSTAMBLE, PREAMBLE};
///
/// let mut sql = Vec::new();
/// let report = Session::new(&mut sql, EmitOptions::default())
///     .convert(&ChangesetDocument::default())
///     .expect("in-memory output never fails");
/// assert_eq!(String::from_utf8_lossy(&sql), format!("{PREAMBLE}{POSTAMBLE}"));
/// assert_eq!(report.summary.statements, 0);
/// ```
#[derive(Debug)]
pub struct Session<W> {
    writer: SqlWriter<W>,
    options: EmitOptions,
}

impl<W: Write> Session<W> {
    /// Prepare a session writing to `output`.
    #[must_use]
    pub const fn new(output: W, options: EmitOptions) -> Self {
        Self {
            writer: SqlWriter::new(output, options.quote_style),
            options,
        }
    }

    /// Emit the whole document wrapped in one transaction.
    ///
    /// Diagnostics are logged at `warn` level once the walk has finished
    /// and are also returned in the report.
    ///
    /// # Errors
    /// Returns [`SessionError::Write`] when the output stream fails. Output
    /// already written stays written and the postamble is not emitted.
    pub fn convert(
        mut self,
        document: &ChangesetDocument,
    ) -> Result<ConversionReport, SessionError> {
        self.writer
            .raw(PREAMBLE)
            .map_err(|source| SessionError::at(SessionStage::Preamble, source))?;

        let mut dispatcher = Dispatcher::new(&mut self.writer, self.options.id_policy);
        walk(document, &mut dispatcher)
            .map_err(|source| SessionError::at(SessionStage::Statements, source))?;
        let report = dispatcher.finish();

        self.writer
            .raw(POSTAMBLE)
            .map_err(|source| SessionError::at(SessionStage::Postamble, source))?;
        self.writer
            .flush()
            .map_err(|source| SessionError::at(SessionStage::Flush, source))?;

        for diagnostic in &report.diagnostics {
            warn!("{diagnostic}");
        }
        Ok(report)
    }
}

/// Convert `document` to `output` in one call.
///
/// # Errors
/// See [`Session::convert`].
pub fn convert_document<W: Write>(
    document: &ChangesetDocument,
    output: W,
    options: EmitOptions,
) -> Result<ConversionReport, SessionError> {
    Session::new(output, options).convert(document)
}
