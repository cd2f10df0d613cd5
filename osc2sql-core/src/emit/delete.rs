use std::io::{self, Write};

use crate::sql::SqlWriter;

/// Remove a node row and its tags.
pub(crate) fn delete_node<W: Write>(out: &mut SqlWriter<W>, id: i64) -> io::Result<()> {
    let literal = out.literals().integer(id);
    out.statement(&format!("DELETE FROM nodes WHERE id={literal}"))?;
    out.statement(&format!("DELETE FROM node_tags WHERE id={literal}"))
}

/// Remove a way row, its member association rows and its tags.
///
/// The association delete targets `way_nodes`, matching the table name the
/// reference output has always used for deletes.
pub(crate) fn delete_way<W: Write>(out: &mut SqlWriter<W>, id: i64) -> io::Result<()> {
    let literal = out.literals().integer(id);
    out.statement(&format!("DELETE FROM ways WHERE id={literal}"))?;
    out.statement(&format!("DELETE FROM way_nodes WHERE wayid={literal}"))?;
    out.statement(&format!("DELETE FROM way_tags WHERE id={literal}"))
}
