//! Facade crate for the osc2sql changeset converter.
//!
//! This crate re-exports the core document model and SQL emitter, and
//! exposes the osmChange XML reader behind the `reader` feature.

#![forbid(unsafe_code)]

pub use osc2sql_core::{
    ChangesetDocument, ConversionReport, ConversionSummary, Diagnostic, EmitOptions, EntityKind,
    IdPolicy, Operation, OperationKind, OperationVisitor, QuoteStyle, Session, SessionError,
    convert_document, walk,
};

#[cfg(feature = "reader")]
pub use osc2sql_data::{ChangesetParseError, parse_changeset, parse_changeset_str};
