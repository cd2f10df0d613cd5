//! Document traversal.
//!
//! [`walk`] visits the tree in document order and hands every operation
//! container to an [`OperationVisitor`]. After an operation has been
//! visited, its non-entity children are descended, so an operation nested
//! in another operation (or in an unknown object inside one) is still
//! visited. Entities are leaves and are never descended.

use crate::document::{ChangesetDocument, Element, Operation};

/// Receives each operation of a document during [`walk`].
pub trait OperationVisitor<'doc> {
    /// Error that stops the walk.
    type Error;

    /// Handle one operation container.
    ///
    /// # Errors
    /// Returning an error aborts the walk; later operations are not visited.
    fn visit_operation(&mut self, operation: &'doc Operation) -> Result<(), Self::Error>;
}

/// Visit every operation in `document`, depth first, in document order.
///
/// # Errors
/// Propagates the first error returned by the visitor.
///
/// # Examples
/// ```
/// use std::convert::Infallible;
/// use osc2sql_core::{
///     ChangesetDocument, Container, Element, Operation, OperationKind, OperationVisitor, walk,
/// };
///
/// struct Kinds(Vec<OperationKind>);
///
/// impl<'doc> OperationVisitor<'doc> for Kinds {
///     type Error = Infallible;
///
///     fn visit_operation(&mut self, operation: &'doc Operation) -> Result<(), Infallible> {
///         self.0.push(operation.kind);
///         Ok(())
///     }
/// }
///
/// let root = Container::new("osmChange")
///     .with_child(Element::Operation(Operation::new(OperationKind::Delete)));
/// let document = ChangesetDocument::new(vec![Element::Container(root)]);
/// let mut kinds = Kinds(Vec::new());
/// let Ok(()) = walk(&document, &mut kinds);
/// assert_eq!(kinds.0, vec![OperationKind::Delete]);
/// ```
pub fn walk<'doc, V>(document: &'doc ChangesetDocument, visitor: &mut V) -> Result<(), V::Error>
where
    V: OperationVisitor<'doc> + ?Sized,
{
    document
        .elements
        .iter()
        .try_for_each(|element| walk_element(element, visitor))
}

fn walk_element<'doc, V>(element: &'doc Element, visitor: &mut V) -> Result<(), V::Error>
where
    V: OperationVisitor<'doc> + ?Sized,
{
    match element {
        Element::Operation(operation) => {
            visitor.visit_operation(operation)?;
            operation
                .nested()
                .try_for_each(|nested| walk_element(nested, visitor))
        }
        Element::Container(container) => container
            .children
            .iter()
            .try_for_each(|child| walk_element(child, visitor)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Container, Node, OperationKind, Way};
    use rstest::{fixture, rstest};

    #[derive(Default)]
    struct Recorder {
        seen: Vec<(OperationKind, usize)>,
        fail_on: Option<OperationKind>,
    }

    impl<'doc> OperationVisitor<'doc> for Recorder {
        type Error = OperationKind;

        fn visit_operation(&mut self, operation: &'doc Operation) -> Result<(), Self::Error> {
            if self.fail_on == Some(operation.kind) {
                return Err(operation.kind);
            }
            self.seen.push((operation.kind, operation.entities().count()));
            Ok(())
        }
    }

    #[fixture]
    fn nested_document() -> ChangesetDocument {
        let innermost = Operation::new(OperationKind::Delete).with_entity(Node::new("3").into());
        let unknown = Container::new("relation").with_child(Element::Operation(innermost));
        let modify = Operation::new(OperationKind::Modify)
            .with_entity(Way::new("2").into())
            .with_nested(Element::Container(unknown));
        let create = Operation::new(OperationKind::Create)
            .with_entity(Node::new("1").into())
            .with_nested(Element::Operation(modify));
        let root = Container::new("osmChange").with_child(Element::Operation(create));
        ChangesetDocument::new(vec![Element::Container(root)])
    }

    #[rstest]
    fn nested_operations_are_visited_after_their_parent(nested_document: ChangesetDocument) {
        let mut recorder = Recorder::default();
        assert_eq!(walk(&nested_document, &mut recorder), Ok(()));
        assert_eq!(
            recorder.seen,
            vec![
                (OperationKind::Create, 1),
                (OperationKind::Modify, 1),
                (OperationKind::Delete, 1),
            ]
        );
    }

    #[rstest]
    fn visitor_errors_stop_the_walk(nested_document: ChangesetDocument) {
        let mut recorder = Recorder {
            fail_on: Some(OperationKind::Modify),
            ..Recorder::default()
        };
        assert_eq!(
            walk(&nested_document, &mut recorder),
            Err(OperationKind::Modify)
        );
        assert_eq!(recorder.seen, vec![(OperationKind::Create, 1)]);
    }

    #[rstest]
    fn empty_document_visits_nothing() {
        let mut recorder = Recorder::default();
        assert_eq!(walk(&ChangesetDocument::default(), &mut recorder), Ok(()));
        assert!(recorder.seen.is_empty());
    }
}
