use std::fmt::{self, Display};

use crate::node::{NodeMut, NodeRef};
use crate::print_config::PrintConfig;

/// Identifies a node within its [`Tree`].
///
/// Internally an index into the arena of the tree. Ids are never reused as nodes can not be removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node always has index 0
    pub const ROOT: Self = Self(0);

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

#[derive(Debug, Clone)]
pub(crate) struct NodeData<V, M> {
    pub(crate) value: V,
    pub(crate) meta: Option<M>,
    /// Non-owning back-reference, only used to walk upwards
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

/// A tree of labeled nodes which can be rendered as a text diagram.
///
/// The generic argument `V` is the value shown for each node, `M` the optional meta annotation shown in front of it.
/// Both only need to be [`Display`] for the default rendering.
///
/// The tree owns all of its nodes.
/// Each node only knows its parent by [`NodeId`], which is used to walk upwards while rendering.
///
/// # Example
///
/// ```
/// # use treeprint::Tree;
/// let mut tree = Tree::<&str>::new();
/// let mut root = tree.root_mut();
/// root.append_branch("x").append_leaf("y");
/// root.append_leaf("z");
///
/// assert_eq!(tree.to_string(), ".\n├── x\n│   └── y\n└── z\n");
/// ```
#[derive(Debug, Clone)]
pub struct Tree<V, M = V> {
    nodes: Vec<NodeData<V, M>>,
}

impl<V, M> Tree<V, M>
where
    V: From<&'static str>,
{
    /// Create a new `Tree` with the conventional `.` as root value.
    #[must_use]
    pub fn new() -> Self {
        Self::with_root(V::from("."))
    }
}

impl<V, M> Tree<V, M> {
    /// Create a new `Tree` with the given root value.
    #[must_use]
    pub fn with_root(value: V) -> Self {
        Self {
            nodes: vec![NodeData {
                value,
                meta: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    #[must_use]
    pub fn root(&self) -> NodeRef<'_, V, M> {
        NodeRef::new(self, NodeId::ROOT)
    }

    pub fn root_mut(&mut self) -> NodeMut<'_, V, M> {
        NodeMut::new(self, NodeId::ROOT)
    }

    /// Get a node by its id. Returns `None` when the id is out of range.
    ///
    /// Ids are plain indices: an id taken from another tree points to whatever node has that index here.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, V, M>> {
        (id.0 < self.nodes.len()).then(|| NodeRef::new(self, id))
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<NodeMut<'_, V, M>> {
        if id.0 < self.nodes.len() {
            Some(NodeMut::new(self, id))
        } else {
            None
        }
    }

    /// Amount of nodes including the root.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Only the root exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    pub(crate) fn data(&self, id: NodeId) -> &NodeData<V, M> {
        &self.nodes[id.0]
    }

    pub(crate) fn data_mut(&mut self, id: NodeId) -> &mut NodeData<V, M> {
        &mut self.nodes[id.0]
    }

    pub(crate) fn push(&mut self, parent: NodeId, meta: Option<M>, value: V) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            value,
            meta,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }
}

impl<V, M> Tree<V, M>
where
    V: Display,
    M: Display,
{
    /// Render the whole tree starting at the root.
    #[must_use]
    pub fn render(&self, config: &PrintConfig<'_, V, M>) -> String {
        self.root().render(config)
    }

    #[must_use]
    pub fn to_bytes(&self, config: &PrintConfig<'_, V, M>) -> Vec<u8> {
        self.root().to_bytes(config)
    }
}

impl<V, M> Default for Tree<V, M>
where
    V: From<&'static str>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Display, M: Display> Display for Tree<V, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.root(), f)
    }
}

#[cfg(test)]
impl Tree<&'static str> {
    /// Example tree used by the tests.
    ///
    /// ```text
    /// .
    /// ├── a
    /// ├── b
    /// │   ├── c
    /// │   ├── d
    /// │   │   ├── e
    /// │   │   └── f
    /// │   └── g
    /// └── h
    /// ```
    pub(crate) fn example() -> Self {
        let mut tree = Self::new();
        let mut root = tree.root_mut();
        root.append_leaf("a");
        {
            let mut b = root.append_branch("b");
            b.append_leaf("c");
            b.append_branch("d").append_leaf("e").append_leaf("f");
            b.append_leaf("g");
        }
        root.append_leaf("h");
        tree
    }
}

#[test]
fn new_tree_has_dot_root() {
    let tree = Tree::<String>::new();
    assert_eq!(tree.root().value(), ".");
    assert!(tree.root().meta().is_none());
    assert!(tree.root().is_root());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 1);
}

#[test]
fn with_root_keeps_value() {
    let tree = Tree::<u8>::with_root(42);
    assert_eq!(*tree.root().value(), 42);
}

#[test]
fn node_lookup_out_of_range_is_none() {
    let tree = Tree::example();
    assert_eq!(tree.len(), 9);
    assert!(tree.node(NodeId(8)).is_some());
    assert!(tree.node(NodeId(9)).is_none());
}

#[test]
fn node_lookup_uses_the_index_only() {
    let small = Tree::<&str>::new();
    let mut other = Tree::<&str>::with_root("other");
    let foreign = other.root_mut().append_branch("foreign").id();
    assert!(small.node(foreign).is_none());

    let example = Tree::example();
    assert_eq!(*example.node(foreign).unwrap().value(), "a");
}

#[test]
fn children_keep_insertion_order() {
    let tree = Tree::example();
    let values = tree
        .root()
        .children()
        .map(|child| *child.value())
        .collect::<Vec<_>>();
    assert_eq!(values, ["a", "b", "h"]);
}
