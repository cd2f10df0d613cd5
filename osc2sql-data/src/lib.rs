//! Reading `osmChange` documents for osc2sql.
//!
//! The reader streams XML with `quick-xml` and builds the typed
//! [`osc2sql_core::ChangesetDocument`] consumed by the conversion engine.
//! Decompression and file handling stay with the caller: anything that
//! implements [`std::io::BufRead`] can be parsed.
#![forbid(unsafe_code)]

mod error;
mod reader;

pub use error::ChangesetParseError;
pub use reader::{parse_changeset, parse_changeset_str};
