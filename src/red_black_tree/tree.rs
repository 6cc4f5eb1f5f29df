use crate::arena::{Arena, NodeId};
use crate::entry::Entry;
use crate::red_black_tree::node::{Color, Node};
use crate::red_black_tree::{Error, Result};
use log::{debug, trace};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt::Debug;
use std::mem;

/// The arena-backed red black tree that the map and set are built on.
///
/// Every absent link, including the parent of the root, is `NodeId::NIL`. The sentinel reads as
/// black and is never written to, so the fixup procedures can inspect the color of any link
/// without checking for absence first.
pub struct Tree<T, U> {
    pub arena: Arena<Node<T, U>>,
    pub root: NodeId,
}

impl<T, U> Tree<T, U> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Tree {
            arena: Arena::with_capacity(capacity),
            root: NodeId::NIL,
        }
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = NodeId::NIL;
    }

    pub fn color(&self, id: NodeId) -> Color {
        if id.is_nil() {
            Color::Black
        } else {
            self.arena[id].color
        }
    }

    fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    // The sentinel has no links of its own; callers only ask for the links of real nodes.
    pub fn parent(&self, id: NodeId) -> NodeId {
        self.arena[id].parent
    }

    pub fn left(&self, id: NodeId) -> NodeId {
        self.arena[id].left
    }

    pub fn right(&self, id: NodeId) -> NodeId {
        self.arena[id].right
    }

    fn set_color(&mut self, id: NodeId, color: Color) {
        debug_assert!(!id.is_nil(), "attempted to recolor the sentinel");
        self.arena[id].color = color;
    }

    // precondition: the right child of `x` is not the sentinel
    fn rotate_left(&mut self, x: NodeId) {
        let y = self.right(x);
        debug_assert!(!y.is_nil(), "rotate_left requires a right child");
        trace!("rotate left at {:?}", x);

        let inner = self.left(y);
        self.arena[x].right = inner;
        if !inner.is_nil() {
            self.arena[inner].parent = x;
        }

        let parent = self.parent(x);
        self.arena[y].parent = parent;
        if parent.is_nil() {
            self.root = y;
        } else if x == self.left(parent) {
            self.arena[parent].left = y;
        } else {
            self.arena[parent].right = y;
        }

        self.arena[y].left = x;
        self.arena[x].parent = y;
    }

    // precondition: the left child of `x` is not the sentinel
    fn rotate_right(&mut self, x: NodeId) {
        let y = self.left(x);
        debug_assert!(!y.is_nil(), "rotate_right requires a left child");
        trace!("rotate right at {:?}", x);

        let inner = self.right(y);
        self.arena[x].left = inner;
        if !inner.is_nil() {
            self.arena[inner].parent = x;
        }

        let parent = self.parent(x);
        self.arena[y].parent = parent;
        if parent.is_nil() {
            self.root = y;
        } else if x == self.right(parent) {
            self.arena[parent].right = y;
        } else {
            self.arena[parent].left = y;
        }

        self.arena[y].right = x;
        self.arena[x].parent = y;
    }

    // Replaces the subtree rooted at `u` with the subtree rooted at `v`. The children of `v` are
    // left untouched and must be fixed up by the caller.
    fn transplant(&mut self, u: NodeId, v: NodeId) {
        let parent = self.parent(u);
        if parent.is_nil() {
            self.root = v;
        } else if u == self.left(parent) {
            self.arena[parent].left = v;
        } else {
            self.arena[parent].right = v;
        }
        if !v.is_nil() {
            self.arena[v].parent = parent;
        }
    }

    /// Inserts a new entry. If the key already exists, the stored entry is replaced in place and
    /// returned without restructuring the tree.
    pub fn insert(&mut self, key: T, value: U) -> Option<Entry<T, U>>
    where
        T: Ord,
    {
        let mut parent = NodeId::NIL;
        let mut curr = self.root;
        let mut ordering = Ordering::Equal;
        while !curr.is_nil() {
            parent = curr;
            ordering = key.cmp(&self.arena[curr].entry.key);
            curr = match ordering {
                Ordering::Less => self.left(curr),
                Ordering::Greater => self.right(curr),
                Ordering::Equal => {
                    let entry = &mut self.arena[curr].entry;
                    return Some(mem::replace(entry, Entry { key, value }));
                },
            };
        }

        let z = self.arena.allocate(Node::new(key, value, parent));
        if parent.is_nil() {
            self.root = z;
        } else if ordering == Ordering::Less {
            self.arena[parent].left = z;
        } else {
            self.arena[parent].right = z;
        }

        self.insert_fixup(z);
        None
    }

    // Each iteration either moves the red-red violation two levels up or performs a rotation
    // after which the parent of `z` is black, so the loop runs at most O(log n) times.
    fn insert_fixup(&mut self, mut z: NodeId) {
        while self.is_red(self.parent(z)) {
            // a red parent is never the root, so the grandparent is a real node
            let parent = self.parent(z);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.is_red(uncle) {
                    trace!("insert fixup at {:?}: red uncle", z);
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.right(parent) {
                        trace!("insert fixup at {:?}: inner grandchild", z);
                        z = parent;
                        self.rotate_left(z);
                    }
                    trace!("insert fixup at {:?}: outer grandchild", z);
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.is_red(uncle) {
                    trace!("insert fixup at {:?}: red uncle", z);
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    z = grandparent;
                } else {
                    if z == self.left(parent) {
                        trace!("insert fixup at {:?}: inner grandchild", z);
                        z = parent;
                        self.rotate_right(z);
                    }
                    trace!("insert fixup at {:?}: outer grandchild", z);
                    let parent = self.parent(z);
                    let grandparent = self.parent(parent);
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.set_color(root, Color::Black);
    }

    /// Unlinks the node holding `key` and returns its entry, or returns `None` without touching
    /// the tree if the key is absent.
    ///
    /// When the node has two children its in-order successor is relinked into its position, so
    /// the ids of every remaining entry stay valid.
    pub fn remove<V>(&mut self, key: &V) -> Option<Entry<T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let z = self.search(key);
        if z.is_nil() {
            return None;
        }

        let z_left = self.left(z);
        let z_right = self.right(z);
        let mut removed_color = self.color(z);

        // `x` takes the place of the node that leaves its position. It may be the sentinel, so
        // its parent is tracked separately instead of being written into the sentinel.
        let x;
        let x_parent;
        if z_left.is_nil() {
            x = z_right;
            x_parent = self.parent(z);
            self.transplant(z, z_right);
        } else if z_right.is_nil() {
            x = z_left;
            x_parent = self.parent(z);
            self.transplant(z, z_left);
        } else {
            let y = self.min_node(z_right);
            removed_color = self.color(y);
            x = self.right(y);
            if self.parent(y) == z {
                x_parent = y;
            } else {
                x_parent = self.parent(y);
                self.transplant(y, x);
                self.arena[y].right = z_right;
                self.arena[z_right].parent = y;
            }
            self.transplant(z, y);
            self.arena[y].left = z_left;
            self.arena[z_left].parent = y;
            let z_color = self.color(z);
            self.set_color(y, z_color);
        }

        if removed_color == Color::Black {
            self.remove_fixup(x, x_parent);
        }

        Some(self.arena.free(z).entry)
    }

    // `x` carries an extra black. Each iteration either moves it one level up, absorbs it into a
    // red node, or ends with a rotation that sets `x` to the root.
    fn remove_fixup(&mut self, mut x: NodeId, mut parent: NodeId) {
        while x != self.root && !self.is_red(x) {
            // the sibling of a doubly black node always has a black height of at least one
            if x == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.is_red(sibling) {
                    trace!("remove fixup at {:?}: red sibling", parent);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_left(parent);
                    sibling = self.right(parent);
                }

                if !self.is_red(self.left(sibling)) && !self.is_red(self.right(sibling)) {
                    trace!("remove fixup at {:?}: black nephews", parent);
                    self.set_color(sibling, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if !self.is_red(self.right(sibling)) {
                        trace!("remove fixup at {:?}: red near nephew", parent);
                        let near = self.left(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_right(sibling);
                        sibling = self.right(parent);
                    }
                    trace!("remove fixup at {:?}: red far nephew", parent);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.right(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_left(parent);
                    x = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.is_red(sibling) {
                    trace!("remove fixup at {:?}: red sibling", parent);
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate_right(parent);
                    sibling = self.left(parent);
                }

                if !self.is_red(self.right(sibling)) && !self.is_red(self.left(sibling)) {
                    trace!("remove fixup at {:?}: black nephews", parent);
                    self.set_color(sibling, Color::Red);
                    x = parent;
                    parent = self.parent(x);
                } else {
                    if !self.is_red(self.left(sibling)) {
                        trace!("remove fixup at {:?}: red near nephew", parent);
                        let near = self.right(sibling);
                        self.set_color(near, Color::Black);
                        self.set_color(sibling, Color::Red);
                        self.rotate_left(sibling);
                        sibling = self.left(parent);
                    }
                    trace!("remove fixup at {:?}: red far nephew", parent);
                    let parent_color = self.color(parent);
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    let far = self.left(sibling);
                    self.set_color(far, Color::Black);
                    self.rotate_right(parent);
                    x = self.root;
                }
            }
        }

        if !x.is_nil() {
            self.set_color(x, Color::Black);
        }
    }

    /// Returns the id of the node holding `key`, or `NodeId::NIL`.
    pub fn search<V>(&self, key: &V) -> NodeId
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        while !curr.is_nil() {
            let node = &self.arena[curr];
            curr = match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return curr,
            };
        }
        NodeId::NIL
    }

    pub fn floor<V>(&self, key: &V) -> NodeId
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut best = NodeId::NIL;
        while !curr.is_nil() {
            let node = &self.arena[curr];
            curr = match key.cmp(node.entry.key.borrow()) {
                Ordering::Less => node.left,
                Ordering::Greater => {
                    best = curr;
                    node.right
                },
                Ordering::Equal => return curr,
            };
        }
        best
    }

    pub fn ceil<V>(&self, key: &V) -> NodeId
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let mut curr = self.root;
        let mut best = NodeId::NIL;
        while !curr.is_nil() {
            let node = &self.arena[curr];
            curr = match key.cmp(node.entry.key.borrow()) {
                Ordering::Greater => node.right,
                Ordering::Less => {
                    best = curr;
                    node.left
                },
                Ordering::Equal => return curr,
            };
        }
        best
    }

    /// Returns the leftmost node of the subtree rooted at `id`.
    pub fn min_node(&self, mut id: NodeId) -> NodeId {
        if id.is_nil() {
            return id;
        }
        while !self.left(id).is_nil() {
            id = self.left(id);
        }
        id
    }

    /// Returns the rightmost node of the subtree rooted at `id`.
    pub fn max_node(&self, mut id: NodeId) -> NodeId {
        if id.is_nil() {
            return id;
        }
        while !self.right(id).is_nil() {
            id = self.right(id);
        }
        id
    }

    /// Returns the in-order successor of `id`, or `NodeId::NIL` if `id` holds the largest key.
    pub fn successor(&self, id: NodeId) -> NodeId {
        let right = self.right(id);
        if !right.is_nil() {
            return self.min_node(right);
        }
        let mut curr = id;
        let mut parent = self.parent(curr);
        while !parent.is_nil() && curr == self.right(parent) {
            curr = parent;
            parent = self.parent(curr);
        }
        parent
    }

    /// Checks every red black tree invariant and that every allocated node is reachable from the
    /// root. Returns the black height of the root, which counts the sentinel but not the root.
    pub fn validate(&self) -> Result<usize>
    where
        T: Ord + Debug,
    {
        let ret = self.check();
        if let Err(ref error) = ret {
            debug!("red black tree failed validation: {}", error);
        }
        ret
    }

    fn check(&self) -> Result<usize>
    where
        T: Ord + Debug,
    {
        if self.root.is_nil() {
            return match self.arena.len() {
                0 => Ok(0),
                actual => Err(Error::LengthMismatch { expected: 0, actual }),
            };
        }
        match self.arena.get(self.root) {
            None => return Err(Error::DanglingLink { id: self.root }),
            Some(root) if root.color == Color::Red => return Err(Error::RedRoot),
            Some(_) => {}
        }

        let mut reachable = 0;
        let height = self.check_subtree(self.root, NodeId::NIL, None, None, &mut reachable)?;
        if reachable != self.arena.len() {
            return Err(Error::LengthMismatch {
                expected: reachable,
                actual: self.arena.len(),
            });
        }
        Ok(height - 1)
    }

    // Returns the number of black nodes on every path from `id` down to the sentinel, counting
    // both ends.
    fn check_subtree(
        &self,
        id: NodeId,
        parent: NodeId,
        lower: Option<&T>,
        upper: Option<&T>,
        reachable: &mut usize,
    ) -> Result<usize>
    where
        T: Ord + Debug,
    {
        if id.is_nil() {
            return Ok(1);
        }
        let node = match self.arena.get(id) {
            Some(node) => node,
            None => return Err(Error::DanglingLink { id }),
        };
        *reachable += 1;

        let key = &node.entry.key;
        if node.parent != parent {
            return Err(Error::BrokenParentLink { key: format!("{:?}", key) });
        }
        let below_lower = lower.map_or(false, |lower| key <= lower);
        let above_upper = upper.map_or(false, |upper| key >= upper);
        if below_lower || above_upper {
            return Err(Error::OrderViolation { key: format!("{:?}", key) });
        }
        // Children are resolved before their colors are read.
        for &child in &[node.left, node.right] {
            if !child.is_nil() && self.arena.get(child).is_none() {
                return Err(Error::DanglingLink { id: child });
            }
        }
        if node.color == Color::Red && (self.is_red(node.left) || self.is_red(node.right)) {
            return Err(Error::RedViolation { key: format!("{:?}", key) });
        }

        let left = self.check_subtree(node.left, id, lower, Some(key), reachable)?;
        let right = self.check_subtree(node.right, id, Some(key), upper, reachable)?;
        if left != right {
            return Err(Error::BlackHeightMismatch {
                key: format!("{:?}", key),
                left,
                right,
            });
        }

        match node.color {
            Color::Black => Ok(left + 1),
            Color::Red => Ok(left),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::arena::NodeId;
    use crate::red_black_tree::node::{Color, Node};
    use crate::red_black_tree::Error;

    fn keys(tree: &Tree<u32, ()>) -> Vec<u32> {
        let mut ret = Vec::new();
        let mut curr = tree.min_node(tree.root);
        while !curr.is_nil() {
            ret.push(tree.arena[curr].entry.key);
            curr = tree.successor(curr);
        }
        ret
    }

    fn build(keys: &[u32]) -> Tree<u32, ()> {
        let mut tree = Tree::new();
        for key in keys {
            tree.insert(*key, ());
        }
        tree
    }

    #[test]
    fn test_rotate_left() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let root = tree.root;
        let pivot = tree.right(root);
        tree.rotate_left(root);

        assert_eq!(tree.root, pivot);
        assert_eq!(tree.arena[pivot].entry.key, 4);
        assert_eq!(tree.parent(pivot), NodeId::NIL);
        assert_eq!(tree.left(pivot), root);
        assert_eq!(tree.parent(root), pivot);
        assert_eq!(tree.arena[tree.right(root)].entry.key, 3);
        assert_eq!(tree.parent(tree.right(root)), root);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rotate_right() {
        let mut tree = build(&[4, 2, 5, 1, 3]);
        let root = tree.root;
        let pivot = tree.left(root);
        tree.rotate_right(root);

        assert_eq!(tree.root, pivot);
        assert_eq!(tree.arena[pivot].entry.key, 2);
        assert_eq!(tree.right(pivot), root);
        assert_eq!(tree.parent(root), pivot);
        assert_eq!(tree.arena[tree.left(root)].entry.key, 3);
        assert_eq!(tree.parent(tree.left(root)), root);
        assert_eq!(keys(&tree), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_rotations_preserve_colors() {
        let mut tree = build(&[2, 1, 4, 3, 5]);
        let colors = |tree: &Tree<u32, ()>| {
            let mut ret = Vec::new();
            let mut curr = tree.min_node(tree.root);
            while !curr.is_nil() {
                ret.push(tree.color(curr));
                curr = tree.successor(curr);
            }
            ret
        };
        let before = colors(&tree);
        let root = tree.root;
        tree.rotate_left(root);
        let root = tree.root;
        tree.rotate_right(root);
        assert_eq!(colors(&tree), before);
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn test_transplant_leaves_children() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root;
        let left = tree.left(root);
        let right = tree.right(root);
        tree.transplant(root, right);

        assert_eq!(tree.root, right);
        assert_eq!(tree.parent(right), NodeId::NIL);
        assert_eq!(tree.left(right), NodeId::NIL);
        // the old root keeps its links until the caller rewires them
        assert_eq!(tree.left(root), left);
    }

    #[test]
    fn test_sentinel_is_black() {
        let tree: Tree<u32, ()> = Tree::new();
        assert_eq!(tree.color(NodeId::NIL), Color::Black);
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_insert_fixup_red_uncle() {
        let mut tree = build(&[2, 1, 3]);
        tree.insert(4, ());

        let root = tree.root;
        assert_eq!(tree.color(root), Color::Black);
        assert_eq!(tree.color(tree.left(root)), Color::Black);
        assert_eq!(tree.color(tree.right(root)), Color::Black);
        assert_eq!(tree.color(tree.right(tree.right(root))), Color::Red);
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn test_insert_fixup_inner_grandchild() {
        let tree = build(&[3, 1, 2]);
        let root = tree.root;
        assert_eq!(tree.arena[root].entry.key, 2);
        assert_eq!(tree.arena[tree.left(root)].entry.key, 1);
        assert_eq!(tree.arena[tree.right(root)].entry.key, 3);
        assert_eq!(tree.color(tree.left(root)), Color::Red);
        assert_eq!(tree.color(tree.right(root)), Color::Red);
    }

    #[test]
    fn test_remove_red_leaf_skips_fixup() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root;
        assert!(tree.remove(&3).is_some());
        assert_eq!(tree.root, root);
        assert_eq!(tree.color(tree.left(root)), Color::Red);
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_remove_black_leaf_with_red_sibling() {
        let mut tree = build(&[2, 1, 4, 3, 5, 6]);
        // 4 is red after the recolor, leaving 1 with a red-rooted sibling subtree
        assert!(tree.remove(&1).is_some());
        assert_eq!(keys(&tree), vec![2, 3, 4, 5, 6]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_successor_is_direct_child() {
        let mut tree = build(&[2, 1, 3]);
        let successor = tree.search(&3);
        assert!(tree.remove(&2).is_some());
        assert_eq!(tree.root, successor);
        assert_eq!(tree.color(successor), Color::Black);
        assert_eq!(keys(&tree), vec![1, 3]);
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_remove_successor_deeper_in_subtree() {
        let mut tree = build(&[4, 2, 8, 6, 10, 5]);
        let successor = tree.search(&5);
        assert!(tree.remove(&4).is_some());
        assert_eq!(tree.root, successor);
        assert_eq!(keys(&tree), vec![2, 5, 6, 8, 10]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_remove_absent_key() {
        let mut tree = build(&[2, 1, 3]);
        assert!(tree.remove(&4).is_none());
        assert_eq!(tree.len(), 3);
        assert_eq!(keys(&tree), vec![1, 2, 3]);
    }

    #[test]
    fn test_remove_only_node() {
        let mut tree = build(&[1]);
        assert!(tree.remove(&1).is_some());
        assert_eq!(tree.root, NodeId::NIL);
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_floor_ceil() {
        let tree = build(&[10, 20, 30]);
        assert_eq!(tree.floor(&5), NodeId::NIL);
        assert_eq!(tree.floor(&25), tree.search(&20));
        assert_eq!(tree.ceil(&25), tree.search(&30));
        assert_eq!(tree.ceil(&35), NodeId::NIL);
    }

    #[test]
    fn test_validate_detects_red_root() {
        let mut tree = build(&[1]);
        let root = tree.root;
        tree.arena[root].color = Color::Red;
        assert_eq!(tree.validate(), Err(Error::RedRoot));
    }

    #[test]
    fn test_validate_detects_red_violation() {
        let mut tree = build(&[2, 1, 3, 4]);
        let node = tree.search(&3);
        tree.arena[node].color = Color::Red;
        assert_eq!(
            tree.validate(),
            Err(Error::RedViolation {
                key: String::from("3")
            }),
        );
    }

    #[test]
    fn test_validate_detects_black_height_mismatch() {
        let mut tree = build(&[2, 1, 3]);
        let node = tree.search(&1);
        tree.arena[node].color = Color::Black;
        assert_eq!(
            tree.validate(),
            Err(Error::BlackHeightMismatch {
                key: String::from("2"),
                left: 2,
                right: 1,
            }),
        );
    }

    #[test]
    fn test_validate_detects_order_violation() {
        let mut tree = build(&[2, 1, 3]);
        let node = tree.search(&1);
        tree.arena[node].entry.key = 5;
        assert_eq!(
            tree.validate(),
            Err(Error::OrderViolation {
                key: String::from("5")
            }),
        );
    }

    #[test]
    fn test_validate_detects_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let node = tree.search(&3);
        let other = tree.search(&1);
        tree.arena[node].parent = other;
        assert_eq!(
            tree.validate(),
            Err(Error::BrokenParentLink {
                key: String::from("3")
            }),
        );
    }

    #[test]
    fn test_validate_detects_dangling_link() {
        let mut tree = build(&[2, 1, 3]);
        let freed = tree.arena.allocate(Node::new(0, (), NodeId::NIL));
        tree.arena.free(freed);

        let node = tree.search(&1);
        assert_eq!(tree.color(node), Color::Red);
        tree.arena[node].left = freed;
        assert_eq!(tree.validate(), Err(Error::DanglingLink { id: freed }));
    }

    #[test]
    fn test_validate_detects_dangling_root() {
        let mut tree = build(&[2, 1, 3]);
        let freed = tree.arena.allocate(Node::new(0, (), NodeId::NIL));
        tree.arena.free(freed);

        tree.root = freed;
        assert_eq!(tree.validate(), Err(Error::DanglingLink { id: freed }));
    }

    #[test]
    fn test_validate_detects_unreachable_node() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root;
        tree.arena[root].right = NodeId::NIL;
        tree.arena[root].left = NodeId::NIL;
        assert_eq!(
            tree.validate(),
            Err(Error::LengthMismatch {
                expected: 1,
                actual: 3,
            }),
        );
    }
}
