//! Document tree for the wren layout engine.
//!
//! This crate provides an arena-based document tree loosely following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/), reduced to what the
//! box-tree builder consumes: tag type, attributes, text payload, children.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. Layout code keeps `NodeId` handles back into the arena
//! instead of references, so the box tree and the document can be owned
//! side by side by the same view.
//!
//! A document is immutable once parsing has finished: the parser appends
//! nodes during construction and nothing mutates the tree afterwards.

use std::collections::HashMap;

mod tag;

pub use tag::TagType;

/// Map of attribute names (lowercase) to values for an element.
pub type AttributesMap = HashMap<String, String>;

/// A type-safe index into the document tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing
/// issues, and is the handle type stored by layout items that need to refer
/// back to their originating node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document root node is always at index 0.
    pub const ROOT: NodeId = NodeId(0);
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
///
/// Stores indices for parent/child/sibling relationships, enabling O(1)
/// traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document,
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    Comment(String),
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "When an element is created, its local name is always given."
///
/// In addition to the raw local name we store the resolved [`TagType`] so
/// downstream consumers can dispatch over a closed enumeration instead of
/// re-matching strings.
#[derive(Debug, Clone)]
pub struct ElementData {
    /// Resolved tag type; [`TagType::Other`] for unrecognized names.
    pub tag: TagType,
    /// "An element's local name", lowercased.
    pub name: String,
    /// "An element has an associated attribute list"
    pub attrs: AttributesMap,
}

impl ElementData {
    /// Create element data from a raw tag name, resolving its [`TagType`].
    #[must_use]
    pub fn new(name: &str, attrs: AttributesMap) -> Self {
        let name = name.to_ascii_lowercase();
        Self {
            tag: TagType::from_name(&name),
            name,
            attrs,
        }
    }

    /// Look up an attribute value by (lowercase) name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }
}

/// Arena-based document tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// All nodes live in a contiguous vector, using indices for relationships:
/// - O(1) access to any node by [`NodeId`]
/// - O(1) parent/sibling traversal
/// - no borrowing issues (indices instead of references)
#[derive(Debug, Clone)]
pub struct Document {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The document node is always at index 0 ([`NodeId::ROOT`]).
    nodes: Vec<Node>,
    /// URL this document was loaded from, if any.
    source_url: Option<String>,
}

impl Document {
    /// Create a new document tree with just the root document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Document {
            nodes: vec![document],
            source_url: None,
        }
    }

    /// Get the root document node ID.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get the number of nodes in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (it never is; the root always exists).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// URL this document was loaded from, if it was loaded over the network.
    #[must_use]
    pub fn source_url(&self) -> Option<&str> {
        self.source_url.as_deref()
    }

    /// Record the URL this document was loaded from.
    pub fn set_source_url(&mut self, url: String) {
        self.source_url = Some(url);
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all
    /// relationships.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get the resolved tag type of a node, if it is an element.
    #[must_use]
    pub fn tag_type(&self, id: NodeId) -> Option<TagType> {
        self.as_element(id).map(|e| e.tag)
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is
    /// that document, if it exists; otherwise null."
    ///
    /// Returns the first `<html>` child of the root, if any.
    #[must_use]
    pub fn html_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.tag_type(id) == Some(TagType::Html))
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's
    /// children that is either a body element or a frameset element, or
    /// null if there is no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.html_element()?;
        self.children(html)
            .iter()
            .find(|&&id| self.tag_type(id) == Some(TagType::Body))
            .copied()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Render an indented textual dump of a subtree, for debugging and the CLI.
#[must_use]
pub fn dump_tree(doc: &Document, id: NodeId, depth: usize) -> String {
    let mut out = String::new();
    let indent = "  ".repeat(depth);
    let Some(node) = doc.get(id) else {
        return out;
    };
    match &node.node_type {
        NodeType::Document => out.push_str(&format!("{indent}#document\n")),
        NodeType::Element(data) => {
            out.push_str(&format!("{indent}<{}>", data.name));
            if !data.attrs.is_empty() {
                let mut keys: Vec<&String> = data.attrs.keys().collect();
                keys.sort();
                for key in keys {
                    out.push_str(&format!(" {key}=\"{}\"", data.attrs[key]));
                }
            }
            out.push('\n');
        }
        NodeType::Text(text) => out.push_str(&format!("{indent}#text {text:?}\n")),
        NodeType::Comment(text) => out.push_str(&format!("{indent}<!-- {text} -->\n")),
    }
    for &child in doc.children(id) {
        out.push_str(&dump_tree(doc, child, depth + 1));
    }
    out
}
