//! Batched `INSERT … VALUES` statements and the tuple emitters feeding them.
//!
//! Tuple emitters follow a counter contract: they receive how many tuples
//! the batch already holds, write a `, ` separator unless that count is zero,
//! and return 1 for the caller to accumulate. Whether a batch is terminated
//! depends only on [`ValuesBatch::is_empty`], never on a reused counter.

use crate::document::{NodeRef, Tag};

use super::Literals;

const SEPARATOR: &str = ", ";

/// One `INSERT … VALUES` statement under construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ValuesBatch {
    prefix: &'static str,
    values: String,
    emitted: usize,
}

impl ValuesBatch {
    /// Start a batch; `prefix` ends with `VALUES `.
    pub(crate) const fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            values: String::new(),
            emitted: 0,
        }
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.emitted == 0
    }

    pub(crate) fn push_tag(&mut self, tag: &Tag, owner: i64, literals: Literals) {
        self.emitted += push_tag_tuple(&mut self.values, tag, owner, self.emitted, literals);
    }

    /// Append a member reference; its sequence number is its position in
    /// this batch.
    pub(crate) fn push_node_ref(&mut self, node_ref: &NodeRef, way: i64, literals: Literals) {
        self.emitted += push_node_ref_tuple(&mut self.values, node_ref, way, self.emitted, literals);
    }

    /// Statement body without terminator, or `None` for an empty batch.
    pub(crate) fn into_statement(self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let mut body = String::with_capacity(self.prefix.len() + self.values.len());
        body.push_str(self.prefix);
        body.push_str(&self.values);
        Some(body)
    }
}

/// Append `(owner, key, value)` to `values`.
pub(crate) fn push_tag_tuple(
    values: &mut String,
    tag: &Tag,
    owner: i64,
    emitted: usize,
    literals: Literals,
) -> usize {
    if emitted > 0 {
        values.push_str(SEPARATOR);
    }
    values.push('(');
    values.push_str(&literals.integer(owner));
    values.push_str(SEPARATOR);
    values.push_str(&literals.text(&tag.key));
    values.push_str(SEPARATOR);
    values.push_str(&literals.text(&tag.value));
    values.push(')');
    1
}

/// Append `(ref, way, sequence)` to `values`.
pub(crate) fn push_node_ref_tuple(
    values: &mut String,
    node_ref: &NodeRef,
    way: i64,
    sequence: usize,
    literals: Literals,
) -> usize {
    if sequence > 0 {
        values.push_str(SEPARATOR);
    }
    values.push('(');
    values.push_str(&literals.text(&node_ref.node_ref));
    values.push_str(SEPARATOR);
    values.push_str(&literals.integer(way));
    values.push_str(SEPARATOR);
    values.push_str(&literals.integer(sequence));
    values.push(')');
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuoteStyle;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn literals() -> Literals {
        Literals::new(QuoteStyle::Double)
    }

    #[rstest]
    fn first_tag_tuple_has_no_separator(literals: Literals) {
        let mut values = String::new();
        let count = push_tag_tuple(&mut values, &Tag::new("k", "v"), 5, 0, literals);
        assert_eq!(count, 1);
        assert_eq!(values, r#"("5", "k", "v")"#);
    }

    #[rstest]
    fn later_tag_tuples_are_separated(literals: Literals) {
        let mut values = String::from("(x)");
        push_tag_tuple(&mut values, &Tag::new("name", "A \"B\""), 5, 1, literals);
        assert_eq!(values, r#"(x), ("5", "name", "A &quot;B&quot;")"#);
    }

    #[rstest]
    fn node_ref_tuple_carries_sequence(literals: Literals) {
        let mut values = String::new();
        push_node_ref_tuple(&mut values, &NodeRef::new("11"), 9, 0, literals);
        push_node_ref_tuple(&mut values, &NodeRef::new("12"), 9, 1, literals);
        assert_eq!(values, r#"("11", "9", "0"), ("12", "9", "1")"#);
    }

    #[rstest]
    fn single_tuple_batch_is_still_terminated(literals: Literals) {
        let mut batch = ValuesBatch::new("INSERT INTO way_tags (id, k, v) VALUES ");
        batch.push_tag(&Tag::new("highway", "residential"), 9, literals);
        assert!(!batch.is_empty());
        assert_eq!(
            batch.into_statement().as_deref(),
            Some(r#"INSERT INTO way_tags (id, k, v) VALUES ("9", "highway", "residential")"#)
        );
    }

    #[rstest]
    fn empty_batch_has_no_statement() {
        let batch = ValuesBatch::new("INSERT INTO node_tags (id, k, v) VALUES ");
        assert!(batch.is_empty());
        assert_eq!(batch.into_statement(), None);
    }

    proptest! {
        #[test]
        fn sequences_count_up_without_gaps(refs in proptest::collection::vec("[0-9]{1,6}", 1..20)) {
            let literals = Literals::new(QuoteStyle::Single);
            let mut batch = ValuesBatch::new("V ");
            for node_ref in &refs {
                batch.push_node_ref(&NodeRef::new(node_ref.clone()), 1, literals);
            }
            let body = batch.into_statement().unwrap_or_default();
            for (sequence, node_ref) in refs.iter().enumerate() {
                let tuple = format!("('{node_ref}', '1', '{sequence}')");
                prop_assert!(body.contains(&tuple), "missing {} in {}", tuple, body);
            }
            prop_assert_eq!(body.matches("), (").count(), refs.len() - 1);
        }
    }
}
