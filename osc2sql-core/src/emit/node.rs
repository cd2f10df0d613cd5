use std::io::{self, Write};

use crate::{
    document::Node,
    sql::{NULL, SqlWriter, ValuesBatch},
};

const NODE_TAGS_PREFIX: &str = "INSERT INTO node_tags (id, k, v) VALUES ";

/// Insert the node row and, when the node carries tags, one `node_tags` batch.
pub(crate) fn insert_node<W: Write>(out: &mut SqlWriter<W>, node: &Node, id: i64) -> io::Result<()> {
    let literals = out.literals();
    let row = format!(
        "INSERT INTO nodes (id, lat, lon, visible, user, timestamp) VALUES ({}, {}, {}, {NULL}, {}, {})",
        literals.integer(id),
        literals.optional_text(node.lat.as_deref()),
        literals.optional_text(node.lon.as_deref()),
        literals.optional_text(node.meta.user.as_deref()),
        literals.optional_text(node.meta.timestamp.as_deref()),
    );
    out.statement(&row)?;

    let mut tags = ValuesBatch::new(NODE_TAGS_PREFIX);
    for tag in &node.meta.tags {
        tags.push_tag(tag, id, literals);
    }
    out.batch(tags)
}
