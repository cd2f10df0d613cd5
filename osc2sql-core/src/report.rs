//! Outcome of a conversion: counts plus recoverable diagnostics.

use std::fmt;

use crate::document::{EntityKind, OperationKind, RawId};

/// Counts gathered while converting one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Operation containers visited, including empty ones.
    pub operations: u64,
    /// Nodes that produced statements.
    pub nodes: u64,
    /// Ways that produced statements.
    pub ways: u64,
    /// Entities skipped because their id was rejected.
    pub skipped: u64,
    /// Terminated SQL statements written, excluding the transaction framing.
    pub statements: u64,
}

impl ConversionSummary {
    pub(crate) const fn record_operation(&mut self) {
        self.operations += 1;
    }

    pub(crate) const fn record_entity(&mut self, kind: EntityKind) {
        match kind {
            EntityKind::Node => self.nodes += 1,
            EntityKind::Way => self.ways += 1,
        }
    }

    pub(crate) const fn record_skipped(&mut self) {
        self.skipped += 1;
    }
}

/// A recoverable finding. The offending element contributes no output and
/// the walk continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// An operation container had no children.
    EmptyOperation {
        /// The empty operation.
        operation: OperationKind,
    },
    /// An operation child was neither a node nor a way.
    UnknownObject {
        /// The enclosing operation.
        operation: OperationKind,
        /// Local name of the unrecognised element.
        name: String,
    },
    /// An id was rejected; the entity was skipped.
    InvalidId {
        /// The enclosing operation.
        operation: OperationKind,
        /// The skipped entity's kind.
        entity: EntityKind,
        /// The rejected text.
        raw: RawId,
    },
    /// An id was coerced; the entity was emitted with `id`.
    CoercedId {
        /// The enclosing operation.
        operation: OperationKind,
        /// The entity's kind.
        entity: EntityKind,
        /// The original text.
        raw: RawId,
        /// The value used instead.
        id: i64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyOperation { operation } => {
                write!(f, "<{operation}> operation has no children")
            }
            Self::UnknownObject { operation, name } => {
                write!(f, "found unknown object <{name}> inside <{operation}>")
            }
            Self::InvalidId {
                operation,
                entity,
                raw,
            } => write!(
                f,
                "skipped {entity} in <{operation}>: id {raw} is not an integer"
            ),
            Self::CoercedId {
                operation,
                entity,
                raw,
                id,
            } => write!(
                f,
                "{entity} in <{operation}>: id {raw} coerced to {id}"
            ),
        }
    }
}

/// Everything a finished conversion reports back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Element and statement counts.
    pub summary: ConversionSummary,
    /// Recoverable findings in document order.
    pub diagnostics: Vec<Diagnostic>,
}
