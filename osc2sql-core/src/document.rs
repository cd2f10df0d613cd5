//! Typed view of an `osmChange` document.
//!
//! The reader in `osc2sql-data` builds these values from XML; tests and
//! library callers can assemble them directly with the builder helpers. The
//! emission engine only ever borrows them.

use std::{convert::Infallible, fmt};

use crate::walk::{OperationVisitor, walk};

/// A parsed changeset document.
///
/// `elements` holds the top-level element sequence, which for a well-formed
/// `osmChange` file is the single root element. Operation containers may
/// appear at any depth below it.
///
/// # Examples
/// ```
/// use osc2sql_core::{ChangesetDocument, Container, Element, Node, Operation, OperationKind};
///
/// let create = Operation::new(OperationKind::Create).with_entity(Node::new("5").into());
/// let root = Container::new("osmChange").with_child(Element::Operation(create));
/// let document = ChangesetDocument::new(vec![Element::Container(root)]);
/// assert_eq!(document.operations().count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangesetDocument {
    /// Top-level elements in document order.
    pub elements: Vec<Element>,
}

impl ChangesetDocument {
    /// Wrap a top-level element sequence.
    #[must_use]
    pub const fn new(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Iterate every operation in the document, depth first, in document order.
    pub fn operations(&self) -> impl Iterator<Item = &Operation> {
        let mut collector = Collector(Vec::new());
        let Ok(()) = walk(self, &mut collector);
        collector.0.into_iter()
    }
}

struct Collector<'doc>(Vec<&'doc Operation>);

impl<'doc> OperationVisitor<'doc> for Collector<'doc> {
    type Error = Infallible;

    fn visit_operation(&mut self, operation: &'doc Operation) -> Result<(), Infallible> {
        self.0.push(operation);
        Ok(())
    }
}

/// One element of the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Element {
    /// A `create`, `modify` or `delete` container.
    Operation(Operation),
    /// Any other element; only its children matter to the walk.
    Container(Container),
}

impl Element {
    /// Local element name as it appeared in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Operation(operation) => operation.kind.as_str(),
            Self::Container(container) => &container.name,
        }
    }
}

/// An element that is not an operation, such as the `osmChange` root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    /// Local element name.
    pub name: String,
    /// Child elements in document order.
    pub children: Vec<Element>,
}

impl Container {
    /// Create an empty container named `name`.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }
}

/// The three change operations an `osmChange` file can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Insert new entities.
    Create,
    /// Replace existing entities with their new state.
    Modify,
    /// Remove entities.
    Delete,
}

impl OperationKind {
    /// Recognise an operation container by its element name.
    #[must_use]
    pub fn from_element_name(name: &str) -> Option<Self> {
        match name {
            "create" => Some(Self::Create),
            "modify" => Some(Self::Modify),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    /// Element name of this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Modify => "modify",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An operation container and its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Which change this container describes.
    pub kind: OperationKind,
    /// Children in document order.
    pub children: Vec<OperationChild>,
}

impl Operation {
    /// Create an operation with no children.
    #[must_use]
    pub const fn new(kind: OperationKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Append an entity child.
    #[must_use]
    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.children.push(OperationChild::Entity(entity));
        self
    }

    /// Append a non-entity child.
    #[must_use]
    pub fn with_nested(mut self, element: Element) -> Self {
        self.children.push(OperationChild::Nested(element));
        self
    }

    /// Entity children in document order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.children.iter().filter_map(|child| match child {
            OperationChild::Entity(entity) => Some(entity),
            OperationChild::Nested(_) => None,
        })
    }

    /// Non-entity children in document order.
    pub fn nested(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            OperationChild::Entity(_) => None,
            OperationChild::Nested(element) => Some(element),
        })
    }
}

/// A direct child of an operation container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationChild {
    /// A node or way.
    Entity(Entity),
    /// Anything else: relations, unknown objects, nested operations.
    Nested(Element),
}

/// A map entity carried by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entity {
    /// A point with coordinates.
    Node(Node),
    /// An ordered list of node references.
    Way(Way),
}

impl Entity {
    /// Attributes and tags shared by every entity kind.
    #[must_use]
    pub const fn meta(&self) -> &EntityMeta {
        match self {
            Self::Node(node) => &node.meta,
            Self::Way(way) => &way.meta,
        }
    }

    /// Kind of this entity.
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Node(_) => EntityKind::Node,
            Self::Way(_) => EntityKind::Way,
        }
    }
}

impl From<Node> for Entity {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Way> for Entity {
    fn from(way: Way) -> Self {
        Self::Way(way)
    }
}

/// Discriminant of [`Entity`], used in diagnostics and summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// See [`Node`].
    Node,
    /// See [`Way`].
    Way,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Node => "node",
            Self::Way => "way",
        })
    }
}

/// Attributes common to nodes and ways.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityMeta {
    /// Identifier as written in the document; see [`crate::IdPolicy::resolve`].
    pub id: RawId,
    /// Name of the last editor.
    pub user: Option<String>,
    /// Time of the last edit, passed through verbatim.
    pub timestamp: Option<String>,
    /// Tags in document order.
    pub tags: Vec<Tag>,
}

/// A node entity.
///
/// Coordinates stay textual; they are never parsed as numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    /// Shared entity attributes.
    pub meta: EntityMeta,
    /// Latitude text.
    pub lat: Option<String>,
    /// Longitude text.
    pub lon: Option<String>,
}

impl Node {
    /// Create a node with the given raw identifier and no other attributes.
    #[must_use]
    pub fn new(id: impl Into<RawId>) -> Self {
        Self {
            meta: EntityMeta {
                id: id.into(),
                ..EntityMeta::default()
            },
            lat: None,
            lon: None,
        }
    }

    /// Set the coordinate text.
    #[must_use]
    pub fn with_coordinates(mut self, lat: impl Into<String>, lon: impl Into<String>) -> Self {
        self.lat = Some(lat.into());
        self.lon = Some(lon.into());
        self
    }

    /// Set the editor and edit time.
    #[must_use]
    pub fn with_edit(mut self, user: impl Into<String>, timestamp: impl Into<String>) -> Self {
        self.meta.user = Some(user.into());
        self.meta.timestamp = Some(timestamp.into());
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.tags.push(Tag::new(key, value));
        self
    }
}

/// A way entity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Way {
    /// Shared entity attributes.
    pub meta: EntityMeta,
    /// Member node references; order defines the way geometry.
    pub node_refs: Vec<NodeRef>,
}

impl Way {
    /// Create a way with the given raw identifier and no members.
    #[must_use]
    pub fn new(id: impl Into<RawId>) -> Self {
        Self {
            meta: EntityMeta {
                id: id.into(),
                ..EntityMeta::default()
            },
            node_refs: Vec::new(),
        }
    }

    /// Set the editor and edit time.
    #[must_use]
    pub fn with_edit(mut self, user: impl Into<String>, timestamp: impl Into<String>) -> Self {
        self.meta.user = Some(user.into());
        self.meta.timestamp = Some(timestamp.into());
        self
    }

    /// Append a member node reference.
    #[must_use]
    pub fn with_node_ref(mut self, node_ref: impl Into<String>) -> Self {
        self.node_refs.push(NodeRef::new(node_ref));
        self
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.tags.push(Tag::new(key, value));
        self
    }
}

/// A key/value tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    /// Tag key, unescaped.
    pub key: String,
    /// Tag value, unescaped.
    pub value: String,
}

impl Tag {
    /// Build a tag from its key and value.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A reference from a way to one of its member nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeRef {
    /// Referenced node id, as written in the document.
    pub node_ref: String,
}

impl NodeRef {
    /// Build a reference from its `ref` attribute text.
    #[must_use]
    pub fn new(node_ref: impl Into<String>) -> Self {
        Self {
            node_ref: node_ref.into(),
        }
    }
}

/// An entity identifier as it appeared in the document.
///
/// `None` means the `id` attribute was absent. Turning the text into an
/// integer is a policy decision; see [`crate::IdPolicy`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawId(Option<String>);

impl RawId {
    /// An identifier whose attribute was missing.
    #[must_use]
    pub const fn missing() -> Self {
        Self(None)
    }

    /// The attribute text, if present.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl From<&str> for RawId {
    fn from(value: &str) -> Self {
        Self(Some(value.to_owned()))
    }
}

impl From<String> for RawId {
    fn from(value: String) -> Self {
        Self(Some(value))
    }
}

impl From<Option<String>> for RawId {
    fn from(value: Option<String>) -> Self {
        Self(value)
    }
}

impl fmt::Display for RawId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(text) => write!(f, "{text:?}"),
            None => f.write_str("<missing>"),
        }
    }
}
