//! Open-element bookkeeping for the streaming reader.

use log::debug;
use osc2sql_core::{
    Container, Element, Entity, Node, NodeRef, Operation, OperationChild, OperationKind, Tag, Way,
};

use super::attributes::Attributes;

/// One open element and the value it is building.
#[derive(Debug)]
pub(super) enum Frame {
    Container(Container),
    Operation(Operation),
    Entity(Entity),
    /// Content the model does not keep, such as the body of a `tag`.
    Ignored(String),
}

impl Frame {
    /// Build the frame for `name` opened beneath `parent`.
    ///
    /// Tags and member references are recorded on the parent entity as
    /// soon as they open; the frame returned for them is `Ignored`.
    pub(super) fn open(parent: Option<&mut Self>, name: String, attributes: Attributes) -> Self {
        match parent {
            Some(Self::Ignored(_)) => Self::Ignored(name),
            Some(Self::Entity(entity)) => {
                record_entity_child(entity, &name, attributes);
                Self::Ignored(name)
            }
            Some(Self::Operation(_)) if name == "node" => Self::Entity(read_node(attributes)),
            Some(Self::Operation(_)) if name == "way" => Self::Entity(read_way(attributes)),
            _ => match OperationKind::from_element_name(&name) {
                Some(kind) => Self::Operation(Operation::new(kind)),
                None => Self::Container(Container::new(name)),
            },
        }
    }

    pub(super) fn name(&self) -> &str {
        match self {
            Self::Container(container) => &container.name,
            Self::Operation(operation) => operation.kind.as_str(),
            Self::Entity(Entity::Node(_)) => "node",
            Self::Entity(Entity::Way(_)) => "way",
            Self::Ignored(name) => name,
        }
    }

    /// Hand a finished child to this frame.
    pub(super) fn adopt(&mut self, child: Closed) {
        match (self, child) {
            (Self::Container(container), Closed::Element(element)) => {
                container.children.push(element);
            }
            (Self::Operation(operation), Closed::Element(element)) => {
                operation.children.push(OperationChild::Nested(element));
            }
            (Self::Operation(operation), Closed::Entity(entity)) => {
                operation.children.push(OperationChild::Entity(entity));
            }
            (_, Closed::Nothing) => {}
            // Entities only open directly beneath operations, and frames
            // below entities are all ignored.
            (Self::Container(_) | Self::Entity(_) | Self::Ignored(_), Closed::Entity(_))
            | (Self::Entity(_) | Self::Ignored(_), Closed::Element(_)) => {}
        }
    }

    pub(super) fn close(self) -> Closed {
        match self {
            Self::Container(container) => Closed::Element(Element::Container(container)),
            Self::Operation(operation) => Closed::Element(Element::Operation(operation)),
            Self::Entity(entity) => Closed::Entity(entity),
            Self::Ignored(_) => Closed::Nothing,
        }
    }
}

/// What a closed frame contributes to its parent.
#[derive(Debug)]
pub(super) enum Closed {
    Element(Element),
    Entity(Entity),
    Nothing,
}

fn read_node(mut attributes: Attributes) -> Entity {
    let mut node = Node::new(attributes.take("id"));
    node.lat = attributes.take("lat");
    node.lon = attributes.take("lon");
    node.meta.user = attributes.take("user");
    node.meta.timestamp = attributes.take("timestamp");
    Entity::Node(node)
}

fn read_way(mut attributes: Attributes) -> Entity {
    let mut way = Way::new(attributes.take("id"));
    way.meta.user = attributes.take("user");
    way.meta.timestamp = attributes.take("timestamp");
    Entity::Way(way)
}

fn record_entity_child(entity: &mut Entity, name: &str, mut attributes: Attributes) {
    match (name, entity) {
        ("tag", Entity::Node(Node { meta, .. }) | Entity::Way(Way { meta, .. })) => {
            meta.tags.push(Tag::new(
                attributes.take("k").unwrap_or_default(),
                attributes.take("v").unwrap_or_default(),
            ));
        }
        ("nd", Entity::Way(way)) => {
            way.node_refs
                .push(NodeRef::new(attributes.take("ref").unwrap_or_default()));
        }
        (other, entity) => debug!("ignoring <{other}> inside {}", entity.kind()),
    }
}
