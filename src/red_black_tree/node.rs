use crate::arena::NodeId;
use crate::entry::Entry;
use crate::red_black_tree::tree::Tree;

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree. Absent links hold `NodeId::NIL`.
pub struct Node<T, U> {
    pub entry: Entry<T, U>,
    pub color: Color,
    pub parent: NodeId,
    pub left: NodeId,
    pub right: NodeId,
}

impl<T, U> Node<T, U> {
    pub fn new(key: T, value: U, parent: NodeId) -> Self {
        Node {
            entry: Entry { key, value },
            color: Color::Red,
            parent,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

/// A read-only handle to an entry in a red black tree.
///
/// Besides the key and value, a handle exposes the color and the neighbouring nodes of the entry
/// so that callers can inspect the shape of the tree.
pub struct NodeRef<'a, T, U> {
    tree: &'a Tree<T, U>,
    id: NodeId,
}

impl<'a, T, U> NodeRef<'a, T, U> {
    pub(crate) fn new(tree: &'a Tree<T, U>, id: NodeId) -> Option<Self> {
        if id.is_nil() {
            None
        } else {
            Some(NodeRef { tree, id })
        }
    }

    fn node(&self) -> &'a Node<T, U> {
        &self.tree.arena[self.id]
    }

    /// Returns the id of the node, which stays valid until its entry is removed.
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn key(&self) -> &'a T {
        &self.node().entry.key
    }

    pub fn value(&self) -> &'a U {
        &self.node().entry.value
    }

    pub fn color(&self) -> Color {
        self.node().color
    }

    /// Returns the parent of the node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T, U>> {
        NodeRef::new(self.tree, self.node().parent)
    }

    pub fn left(&self) -> Option<NodeRef<'a, T, U>> {
        NodeRef::new(self.tree, self.node().left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T, U>> {
        NodeRef::new(self.tree, self.node().right)
    }
}

impl<'a, T, U> Clone for NodeRef<'a, T, U> {
    fn clone(&self) -> Self {
        NodeRef {
            tree: self.tree,
            id: self.id,
        }
    }
}

impl<'a, T, U> Copy for NodeRef<'a, T, U> {}
