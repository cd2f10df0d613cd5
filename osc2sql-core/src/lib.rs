//! Core conversion engine for osc2sql.
//!
//! The crate turns a typed `osmChange` document into SQL statements that
//! replay its create, modify and delete operations against a relational
//! mirror of OpenStreetMap nodes and ways. Reading XML lives in
//! `osc2sql-data`; this crate only borrows an already built
//! [`ChangesetDocument`] and writes text to any [`std::io::Write`].
//!
//! ```
//! use osc2sql_core::{
//!     ChangesetDocument, Container, Element, EmitOptions, Node, Operation, OperationKind,
//!     convert_document,
//! };
//!
//! let create = Operation::new(OperationKind::Create)
//!     .with_entity(Node::new("5").with_coordinates("1.0", "2.0").into());
//! let root = Container::new("osmChange").with_child(Element::Operation(create));
//! let document = ChangesetDocument::new(vec![Element::Container(root)]);
//!
//! let mut sql = Vec::new();
//! let report = convert_document(&document, &mut sql, EmitOptions::default())
//!     .expect("in-memory output never fails");
//! assert_eq!(report.summary.nodes, 1);
//! assert!(String::from_utf8_lossy(&sql).contains("INSERT INTO nodes"));
//! ```

#![forbid(unsafe_code)]

mod dispatch;
mod document;
mod emit;
mod escape;
mod options;
mod report;
mod session;
mod sql;
mod walk;

pub use document::{
    ChangesetDocument, Container, Element, Entity, EntityKind, EntityMeta, Node, NodeRef,
    Operation, OperationChild, OperationKind, RawId, Tag, Way,
};
pub use escape::{QUOTE_ENTITY, escape_text};
pub use options::{EmitOptions, IdPolicy, IdResolution, OptionParseError, QuoteStyle};
pub use report::{ConversionReport, ConversionSummary, Diagnostic};
pub use session::{POSTAMBLE, PREAMBLE, Session, SessionError, SessionStage, convert_document};
pub use walk::{OperationVisitor, walk};
