use std::borrow::Borrow;

use crate::tree::{NodeId, Tree};

/// Read access to a node of a [`Tree`].
///
/// Cheap to copy. All read operations work the same on the root and on any branch.
#[must_use]
pub struct NodeRef<'a, V, M = V> {
    pub(crate) tree: &'a Tree<V, M>,
    pub(crate) id: NodeId,
}

impl<V, M> Clone for NodeRef<'_, V, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V, M> Copy for NodeRef<'_, V, M> {}

impl<V, M> std::fmt::Debug for NodeRef<'_, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef").field("id", &self.id).finish()
    }
}

/// Same node of the same tree.
impl<V, M> PartialEq for NodeRef<'_, V, M> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl<V, M> Eq for NodeRef<'_, V, M> {}

impl<'a, V, M> NodeRef<'a, V, M> {
    pub(crate) const fn new(tree: &'a Tree<V, M>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    #[must_use]
    pub fn value(&self) -> &'a V {
        &self.tree.data(self.id).value
    }

    #[must_use]
    pub fn meta(&self) -> Option<&'a M> {
        self.tree.data(self.id).meta.as_ref()
    }

    /// The node this one was appended to, unless it was promoted to a branch.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.tree
            .data(self.id)
            .parent
            .map(|parent| Self::new(self.tree, parent))
    }

    /// Whether this node is rendered as the root of its (sub)tree.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tree.data(self.id).parent.is_none()
    }

    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'a, V, M>> + 'a {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&child| NodeRef::new(tree, child))
    }

    #[must_use]
    pub fn child_count(&self) -> usize {
        self.tree.data(self.id).children.len()
    }

    #[must_use]
    pub fn last_child(&self) -> Option<Self> {
        self.tree
            .data(self.id)
            .children
            .last()
            .map(|&child| Self::new(self.tree, child))
    }

    /// Whether this node is the last child of its parent.
    /// Nodes without a parent are never the last one.
    pub(crate) fn is_last(&self) -> bool {
        self.parent()
            .and_then(|parent| parent.last_child())
            .is_some_and(|last| last.id == self.id)
    }

    /// All descendants in pre-order: each child and then all of its descendants before its next sibling.
    /// The node itself is not included.
    ///
    /// Walks with an explicit stack, so arbitrarily deep trees can be traversed.
    pub fn descendants(&self) -> Descendants<'a, V, M> {
        let mut stack = self.tree.data(self.id).children.clone();
        stack.reverse();
        Descendants {
            tree: self.tree,
            stack,
        }
    }

    /// Find the first descendant whose meta equals `meta`.
    ///
    /// Each child is checked before the descendants of that child are searched.
    /// Nodes without meta never match.
    ///
    /// ```
    /// # use treeprint::Tree;
    /// let mut tree = Tree::<&str>::new();
    /// tree.root_mut()
    ///     .append_branch("src")
    ///     .append_leaf_with_meta("entry", "lib.rs");
    ///
    /// let found = tree.root().find_by_meta("entry").unwrap();
    /// assert_eq!(*found.value(), "lib.rs");
    /// assert!(tree.root().find_by_meta("missing").is_none());
    /// ```
    #[must_use]
    pub fn find_by_meta<Q>(&self, meta: &Q) -> Option<Self>
    where
        Q: PartialEq + ?Sized,
        M: Borrow<Q>,
    {
        self.descendants().find(|node| {
            node.meta()
                .is_some_and(|candidate| Borrow::<Q>::borrow(candidate) == meta)
        })
    }

    /// Find a descendant by value.
    ///
    /// Only the direct children are compared by value.
    /// Deeper levels are searched by comparing their **meta** with `value`.
    /// Existing callers depend on this, use [`find_by_value_deep`](Self::find_by_value_deep) to compare values on every level.
    ///
    /// As the target is compared with both, values and metas have to be borrowable as the same type.
    /// Trees with unrelated meta types can only use [`find_by_value_deep`](Self::find_by_value_deep):
    ///
    /// ```compile_fail
    /// # use treeprint::Tree;
    /// let tree = Tree::<String, u32>::new();
    /// let _ = tree.root().find_by_value("a");
    /// ```
    #[must_use]
    pub fn find_by_value<Q>(&self, value: &Q) -> Option<Self>
    where
        Q: PartialEq + ?Sized,
        V: Borrow<Q>,
        M: Borrow<Q>,
    {
        for child in self.children() {
            if Borrow::<Q>::borrow(child.value()) == value {
                return Some(child);
            }
            if let Some(found) = child.find_by_meta(value) {
                return Some(found);
            }
        }
        None
    }

    /// Find the first descendant whose value equals `value`, in the same order as [`find_by_meta`](Self::find_by_meta).
    ///
    /// ```
    /// # use treeprint::Tree;
    /// let mut tree = Tree::<String, u32>::new();
    /// tree.root_mut()
    ///     .append_branch_with_meta(1, "src".to_owned())
    ///     .append_leaf("lib.rs".to_owned());
    /// assert!(tree.root().find_by_value_deep("lib.rs").is_some());
    /// ```
    #[must_use]
    pub fn find_by_value_deep<Q>(&self, value: &Q) -> Option<Self>
    where
        Q: PartialEq + ?Sized,
        V: Borrow<Q>,
    {
        self.descendants()
            .find(|node| Borrow::<Q>::borrow(node.value()) == value)
    }

    /// Call `visitor` for every descendant in the order of [`descendants`](Self::descendants).
    pub fn visit_all<F>(&self, visitor: F)
    where
        F: FnMut(NodeRef<'a, V, M>),
    {
        self.descendants().for_each(visitor);
    }
}

/// Iterator over the descendants of a node, see [`NodeRef::descendants`].
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Descendants<'a, V, M = V> {
    tree: &'a Tree<V, M>,
    /// Next nodes to visit, the next one on top
    stack: Vec<NodeId>,
}

impl<V, M> std::fmt::Debug for Descendants<'_, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Descendants")
            .field("stack", &self.stack)
            .finish()
    }
}

impl<'a, V, M> Iterator for Descendants<'a, V, M> {
    type Item = NodeRef<'a, V, M>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.tree.data(id).children.iter().rev().copied());
        Some(NodeRef::new(self.tree, id))
    }
}

/// Mutable access to a node of a [`Tree`].
///
/// Appending leaves returns the same handle so leaves can be chained onto one parent.
/// Appending branches returns a handle to the new node to continue building below it.
#[must_use]
pub struct NodeMut<'a, V, M = V> {
    tree: &'a mut Tree<V, M>,
    id: NodeId,
}

impl<V, M> std::fmt::Debug for NodeMut<'_, V, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeMut").field("id", &self.id).finish()
    }
}

impl<'a, V, M> NodeMut<'a, V, M> {
    pub(crate) fn new(tree: &'a mut Tree<V, M>, id: NodeId) -> Self {
        Self { tree, id }
    }

    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Read only view of this node.
    pub fn to_ref(&self) -> NodeRef<'_, V, M> {
        NodeRef::new(&*self.tree, self.id)
    }

    /// Give up the mutable access, keeping read access for the whole borrow.
    pub fn into_ref(self) -> NodeRef<'a, V, M> {
        NodeRef::new(self.tree, self.id)
    }

    /// Append a childless node and return this (parent) node.
    pub fn append_leaf(&mut self, value: V) -> &mut Self {
        self.tree.push(self.id, None, value);
        self
    }

    pub fn append_leaf_with_meta(&mut self, meta: M, value: V) -> &mut Self {
        self.tree.push(self.id, Some(meta), value);
        self
    }

    /// Append a node and return it to continue building below it.
    pub fn append_branch(&mut self, value: V) -> NodeMut<'_, V, M> {
        let id = self.tree.push(self.id, None, value);
        NodeMut::new(self.tree, id)
    }

    pub fn append_branch_with_meta(&mut self, meta: M, value: V) -> NodeMut<'_, V, M> {
        let id = self.tree.push(self.id, Some(meta), value);
        NodeMut::new(self.tree, id)
    }

    /// Forget the parent so this node renders as a standalone root.
    ///
    /// The node stays in the children of its former parent.
    /// Doing this on a node without a parent has no effect.
    pub fn promote_to_branch(&mut self) -> &mut Self {
        self.tree.data_mut(self.id).parent = None;
        self
    }

    /// Get a handle to the last child.
    pub fn last_child_mut(&mut self) -> Option<NodeMut<'_, V, M>> {
        let last = *self.tree.data(self.id).children.last()?;
        Some(NodeMut::new(self.tree, last))
    }

    #[must_use]
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.tree.data_mut(self.id).value
    }

    #[must_use]
    pub fn meta_mut(&mut self) -> Option<&mut M> {
        self.tree.data_mut(self.id).meta.as_mut()
    }

    pub fn set_value(&mut self, value: V) {
        self.tree.data_mut(self.id).value = value;
    }

    pub fn set_meta(&mut self, meta: M) {
        self.tree.data_mut(self.id).meta = Some(meta);
    }

    /// Call `visitor` for every descendant in the order of [`NodeRef::visit_all`].
    ///
    /// The order is taken before the first call.
    /// Nodes appended by the visitor are not visited.
    pub fn visit_all_mut<F>(&mut self, mut visitor: F)
    where
        F: FnMut(NodeMut<'_, V, M>),
    {
        let mut order = Vec::new();
        self.to_ref().visit_all(|node| order.push(node.id));
        for id in order {
            visitor(NodeMut::new(self.tree, id));
        }
    }
}

#[test]
fn append_leaf_returns_parent() {
    let mut tree = Tree::<&str>::new();
    let id = tree.root_mut().append_leaf("a").append_leaf("b").id();
    assert_eq!(id, NodeId::ROOT);
    assert_eq!(tree.root().child_count(), 2);
}

#[test]
fn append_branch_returns_new_node() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    let x = root.append_branch("x").append_leaf("y").id();
    assert_ne!(x, NodeId::ROOT);
    let x = tree.node(x).unwrap();
    assert_eq!(*x.value(), "x");
    assert_eq!(x.child_count(), 1);
    assert_eq!(x.parent().unwrap().id(), NodeId::ROOT);
}

#[test]
fn meta_is_absent_by_default() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut()
        .append_leaf("plain")
        .append_leaf_with_meta("m", "annotated");
    let metas = tree
        .root()
        .children()
        .map(|child| child.meta().copied())
        .collect::<Vec<_>>();
    assert_eq!(metas, [None, Some("m")]);
}

#[test]
fn last_child_of_leaf_is_none() {
    let tree = Tree::example();
    assert_eq!(*tree.root().last_child().unwrap().value(), "h");
    assert!(tree.root().last_child().unwrap().last_child().is_none());
}

#[test]
fn find_by_meta_without_match_is_none() {
    let tree = Tree::example();
    assert!(tree.root().find_by_meta("anything").is_none());
}

#[test]
fn find_by_meta_finds_node_at_depth_three() {
    let mut tree = Tree::<&str>::new();
    let target = tree
        .root_mut()
        .append_branch("one")
        .append_branch("two")
        .append_branch_with_meta("needle", "three")
        .id();
    tree.root_mut().append_leaf("other");
    let found = tree.root().find_by_meta("needle").unwrap();
    assert_eq!(found.id(), target);
    assert_eq!(found, tree.node(target).unwrap());
}

#[test]
fn find_by_meta_prefers_child_before_its_descendants() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    root.append_branch("first").append_leaf_with_meta("m", "deep");
    root.append_leaf_with_meta("m", "shallow");
    assert_eq!(*tree.root().find_by_meta("m").unwrap().value(), "deep");
}

#[test]
fn find_by_value_searches_meta_below_direct_children() {
    let mut tree = Tree::<&str>::new();
    tree.root_mut()
        .append_branch("x")
        .append_leaf("target")
        .append_leaf_with_meta("target", "annotated");
    let root = tree.root();

    let found = root.find_by_value("target").unwrap();
    assert_eq!(*found.value(), "annotated");
    assert_eq!(*root.find_by_value_deep("target").unwrap().value(), "target");
    assert_eq!(*root.find_by_value("x").unwrap().value(), "x");
}

#[test]
fn find_by_value_deep_without_match_is_none() {
    let tree = Tree::example();
    assert!(tree.root().find_by_value_deep("z").is_none());
    assert_eq!(*tree.root().find_by_value_deep("f").unwrap().value(), "f");
}

#[test]
fn promote_to_branch_is_idempotent() {
    let mut tree = Tree::<&str>::new();
    let id = {
        let mut root = tree.root_mut();
        let mut branch = root.append_branch("b");
        branch.promote_to_branch();
        branch.promote_to_branch();
        branch.id()
    };
    let branch = tree.node(id).unwrap();
    assert!(branch.is_root());
    assert_eq!(tree.root().child_count(), 1);

    tree.root_mut().promote_to_branch();
    assert!(tree.root().is_root());
}

#[test]
fn set_value_and_meta_overwrite() {
    let mut tree = Tree::<&str>::new();
    let mut root = tree.root_mut();
    root.set_value("root");
    root.set_meta("m1");
    root.set_meta("m2");
    assert_eq!(*tree.root().value(), "root");
    assert_eq!(tree.root().meta(), Some(&"m2"));
}

#[test]
fn visit_all_is_pre_order() {
    let tree = Tree::example();
    let mut visited = Vec::new();
    tree.root().visit_all(|node| visited.push(*node.value()));
    assert_eq!(visited, ["a", "b", "c", "d", "e", "f", "g", "h"]);
}

#[test]
fn visit_all_mut_can_change_values() {
    let mut tree = Tree::<String>::new();
    tree.root_mut()
        .append_branch("x".to_owned())
        .append_leaf("y".to_owned());
    tree.root_mut()
        .visit_all_mut(|mut node| node.value_mut().make_ascii_uppercase());
    let mut visited = Vec::new();
    tree.root().visit_all(|node| visited.push(node.value().clone()));
    assert_eq!(visited, ["X", "Y"]);
}

#[test]
fn is_last_checks_parent_children() {
    let tree = Tree::example();
    let last = tree.root().last_child().unwrap();
    assert!(last.is_last());
    assert!(!tree.root().children().next().unwrap().is_last());
    assert!(!tree.root().is_last());
}

#[cfg(test)]
fn chain(depth: usize) -> (Tree<&'static str>, NodeId) {
    let mut tree = Tree::new();
    let mut id = NodeId::ROOT;
    for _ in 0..depth {
        id = tree.node_mut(id).unwrap().append_branch("link").id();
    }
    tree.node_mut(id).unwrap().set_value("bottom");
    tree.node_mut(id).unwrap().set_meta("needle");
    (tree, id)
}

#[test]
fn deep_chain_is_searched_and_visited() {
    let depth = 100_000;
    let (tree, bottom) = chain(depth);
    let root = tree.root();
    assert_eq!(root.find_by_meta("needle").unwrap().id(), bottom);
    assert_eq!(root.find_by_value_deep("bottom").unwrap().id(), bottom);
    assert_eq!(root.find_by_value("needle").unwrap().id(), bottom);
    assert!(root.find_by_meta("missing").is_none());

    let mut visited = 0;
    root.visit_all(|_| visited += 1);
    assert_eq!(visited, depth);
    assert_eq!(root.descendants().last().unwrap().id(), bottom);
}

#[test]
fn descendants_skip_the_node_itself() {
    let tree = Tree::example();
    let b = tree.root().find_by_value_deep("b").unwrap();
    let values = b
        .descendants()
        .map(|node| *node.value())
        .collect::<Vec<_>>();
    assert_eq!(values, ["c", "d", "e", "f", "g"]);
    assert_eq!(tree.root().descendants().count(), tree.len() - 1);
}
