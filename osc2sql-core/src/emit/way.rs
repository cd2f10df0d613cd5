use std::io::{self, Write};

use crate::{
    document::Way,
    sql::{NULL, SqlWriter, ValuesBatch},
};

const WAYS_NODES_PREFIX: &str = "INSERT INTO ways_nodes (nodeid, wayid, sequence) VALUES ";
const WAY_TAGS_PREFIX: &str = "INSERT INTO way_tags (id, k, v) VALUES ";

/// Insert the way row, then its member batch, then its tag batch.
///
/// Members and tags are separate passes, so their relative order in the
/// document never affects the output.
pub(crate) fn insert_way<W: Write>(out: &mut SqlWriter<W>, way: &Way, id: i64) -> io::Result<()> {
    let literals = out.literals();
    let row = format!(
        "INSERT INTO ways (id, visible, user, timestamp) VALUES ({}, {NULL}, {}, {})",
        literals.integer(id),
        literals.optional_text(way.meta.user.as_deref()),
        literals.optional_text(way.meta.timestamp.as_deref()),
    );
    out.statement(&row)?;

    let mut members = ValuesBatch::new(WAYS_NODES_PREFIX);
    for node_ref in &way.node_refs {
        members.push_node_ref(node_ref, id, literals);
    }
    out.batch(members)?;

    let mut tags = ValuesBatch::new(WAY_TAGS_PREFIX);
    for tag in &way.meta.tags {
        tags.push_tag(tag, id, literals);
    }
    out.batch(tags)
}
