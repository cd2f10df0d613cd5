//! Entity emitters: one function per table-level effect of a node or way.
//!
//! Every emitter takes an already resolved identifier; policy decisions
//! about malformed ids happen in the dispatcher before anything is written.

mod delete;
mod node;
mod way;

pub(crate) use delete::{delete_node, delete_way};
pub(crate) use node::insert_node;
pub(crate) use way::insert_way;

#[cfg(test)]
pub(crate) mod test_support {
    use std::io;

    use crate::{QuoteStyle, sql::SqlWriter};

    /// Run `emit` against an in-memory writer and return the text produced.
    pub(crate) fn render<F>(style: QuoteStyle, emit: F) -> String
    where
        F: FnOnce(&mut SqlWriter<&mut Vec<u8>>) -> io::Result<()>,
    {
        let mut buffer = Vec::new();
        let mut writer = SqlWriter::new(&mut buffer, style);
        if let Err(err) = emit(&mut writer) {
            panic!("in-memory emission failed: {err}");
        }
        String::from_utf8(buffer).unwrap_or_else(|err| panic!("emitted invalid UTF-8: {err}"))
    }
}
