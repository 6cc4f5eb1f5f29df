use crate::arena::NodeId;
use crate::red_black_tree::node::NodeRef;
use crate::red_black_tree::tree::Tree;
use crate::red_black_tree::Result;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::borrow::Borrow;
use std::cmp;
use std::fmt::{self, Debug};
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::result;
use std::vec;

// Upper bound on node storage reserved from a deserializer's length hint.
pub(crate) const MAX_PREALLOCATED_NODES: usize = 4096;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree in which every node is colored red or
/// black. The root is black, a red node never has a red child, and every path from a node to a
/// leaf passes through the same number of black nodes, which bounds the height of the tree by
/// `2 log(n + 1)`. Keys are unique: inserting a key that already exists replaces the stored
/// entry.
///
/// # Examples
///
/// ```
/// use rbtree_index::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// assert!(map.validate().is_ok());
/// ```
pub struct RedBlackMap<T, U> {
    tree: Tree<T, U>,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap { tree: Tree::new() }
    }

    /// Constructs a new, empty `RedBlackMap<T, U>` that can hold `capacity` entries before its
    /// node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::with_capacity(1024);
    /// assert!(map.is_empty());
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        RedBlackMap {
            tree: Tree::with_capacity(capacity),
        }
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, it will return
    /// and replace the old key-value pair.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert(1, 1), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// assert_eq!(map.insert(1, 2), Some((1, 1)));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> Option<(T, U)>
    where
        T: Ord,
    {
        self.tree.insert(key, value).map(|entry| entry.into_pair())
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None` and leave the map untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.remove(key).map(|entry| entry.into_pair())
    }

    /// Removes a key from the map, returning `true` if the key was present. The removed
    /// key-value pair is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(map.delete(&1));
    /// assert!(!map.delete(&1));
    /// assert!(map.is_empty());
    /// ```
    pub fn delete<V>(&mut self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Returns a handle to the entry with a particular key, or `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::{Color, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let handle = map.search(&2).unwrap();
    /// assert_eq!(handle.key(), &2);
    /// assert_eq!(handle.value(), &"b");
    /// assert_eq!(handle.color(), Color::Red);
    /// assert_eq!(handle.parent().map(|parent| *parent.key()), Some(1));
    /// assert!(map.search(&3).is_none());
    /// ```
    pub fn search<V>(&self, key: &V) -> Option<NodeRef<'_, T, U>>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        NodeRef::new(&self.tree, self.tree.search(key))
    }

    /// Returns a handle to the root of the tree, or `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::{Color, RedBlackMap};
    ///
    /// let mut map = RedBlackMap::new();
    /// assert!(map.root().is_none());
    ///
    /// map.insert(1, 1);
    /// assert_eq!(map.root().map(|root| root.color()), Some(Color::Black));
    /// ```
    pub fn root(&self) -> Option<NodeRef<'_, T, U>> {
        NodeRef::new(&self.tree, self.tree.root)
    }

    /// Resolves a `NodeId` obtained from a handle. Returns `None` if the entry has since been
    /// removed.
    ///
    /// Ids of entries that are not removed stay valid across any sequence of insertions and
    /// removals, although an id may be reused for a later insertion once its entry is removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// let id = map.search(&2).unwrap().id();
    ///
    /// map.remove(&1);
    /// assert_eq!(map.node(id).map(|node| *node.key()), Some(2));
    ///
    /// map.remove(&2);
    /// assert!(map.node(id).is_none());
    /// ```
    pub fn node(&self, id: NodeId) -> Option<NodeRef<'_, T, U>> {
        self.tree.arena.get(id).and_then(|_| NodeRef::new(&self.tree, id))
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.tree.search(key).is_nil()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.search(key).map(|node| node.value())
    }

    /// Returns the stored key and value for a particular key, or `None` if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(String::from("a"), 1);
    /// assert_eq!(map.get_key_value("a"), Some((&String::from("a"), &1)));
    /// ```
    pub fn get_key_value<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.search(key).map(|node| (node.key(), node.value()))
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let id = self.tree.search(key);
        self.tree.arena.get_mut(id).map(|node| &mut node.entry.value)
    }

    /// Returns the number of entries in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map contains no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry from the map.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        NodeRef::new(&self.tree, self.tree.floor(key)).map(|node| node.key())
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        NodeRef::new(&self.tree, self.tree.ceil(key)).map(|node| node.key())
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    pub fn min(&self) -> Option<&T> {
        NodeRef::new(&self.tree, self.tree.min_node(self.tree.root)).map(|node| node.key())
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    pub fn max(&self) -> Option<&T> {
        NodeRef::new(&self.tree, self.tree.max_node(self.tree.root)).map(|node| node.key())
    }

    /// Verifies the red black tree invariants and returns the black height of the tree: the
    /// number of black nodes on any path from the root to a leaf, counting the leaf but not the
    /// root. An empty map has a black height of zero.
    ///
    /// This is a diagnostic that walks the whole tree. A violation indicates a defect in the tree
    /// itself rather than a condition to recover from.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(5, ());
    /// map.insert(10, ());
    /// map.insert(2, ());
    /// assert_eq!(map.validate(), Ok(1));
    /// ```
    pub fn validate(&self) -> Result<usize>
    where
        T: Ord + Debug,
    {
        self.tree.validate()
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            tree: &self.tree,
            next: self.tree.min_node(self.tree.root),
            remaining: self.len(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal.
    ///
    /// Unlike `iter`, this iterator is not lazy: it gathers a reference to every entry before the
    /// first pair is yielded, which takes `O(n)` time and memory up front.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in &mut map {
    ///     *value += 1;
    /// }
    ///
    /// let mut iterator = map.iter_mut();
    /// assert_eq!(iterator.next(), Some((&1, &mut 2)));
    /// assert_eq!(iterator.next(), Some((&2, &mut 3)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> RedBlackMapIterMut<'_, T, U> {
        let mut order = Vec::with_capacity(self.len());
        let mut curr = self.tree.min_node(self.tree.root);
        while !curr.is_nil() {
            order.push(curr.index());
            curr = self.tree.successor(curr);
        }

        let mut slots = self.tree.arena.slots_mut();
        let entries = order
            .into_iter()
            .filter_map(|index| slots[index].take())
            .map(|node| (&node.entry.key, &mut node.entry.value))
            .collect::<Vec<_>>();

        RedBlackMapIterMut {
            entries: entries.into_iter(),
        }
    }

    /// Returns an iterator over the keys of the map in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.keys().collect::<Vec<&u32>>(), vec![&1, &2]);
    /// ```
    pub fn keys(&self) -> impl Iterator<Item = &T> {
        self.iter().map(|(key, _)| key)
    }

    /// Returns an iterator over the values of the map in ascending order of their keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(2, 'b');
    /// map.insert(1, 'a');
    /// assert_eq!(map.values().collect::<Vec<&char>>(), vec![&'a', &'b']);
    /// ```
    pub fn values(&self) -> impl Iterator<Item = &U> {
        self.iter().map(|(_, value)| value)
    }
}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        let current = self.tree.root;
        Self::IntoIter {
            tree: self.tree,
            current,
            stack: Vec::new(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<T, U> {
    tree: Tree<T, U>,
    current: NodeId,
    stack: Vec<NodeId>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.current.is_nil() {
            self.stack.push(self.current);
            self.current = self.tree.left(self.current);
        }
        self.stack.pop().map(|id| {
            self.current = self.tree.right(id);
            self.tree.arena.free(id).entry.into_pair()
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T, U> ExactSizeIterator for RedBlackMapIntoIter<T, U> {}

/// An iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order by following successor links and
/// yields immutable references.
pub struct RedBlackMapIter<'a, T, U> {
    tree: &'a Tree<T, U>,
    next: NodeId,
    remaining: usize,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        NodeRef::new(tree, self.next).map(|node| {
            self.next = tree.successor(node.id());
            self.remaining -= 1;
            (node.key(), node.value())
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T, U> ExactSizeIterator for RedBlackMapIter<'a, T, U> {}

impl<'a, T, U> Clone for RedBlackMapIter<'a, T, U> {
    fn clone(&self) -> Self {
        RedBlackMapIter {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

/// A mutable iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references to
/// values.
pub struct RedBlackMapIterMut<'a, T, U> {
    entries: vec::IntoIter<(&'a T, &'a mut U)>,
}

impl<'a, T, U> Iterator for RedBlackMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl<'a, T, U> ExactSizeIterator for RedBlackMapIterMut<'a, T, U> {}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> FromIterator<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = RedBlackMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> Debug for RedBlackMap<T, U>
where
    T: Debug,
    U: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<T, U> PartialEq for RedBlackMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &RedBlackMap<T, U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for RedBlackMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> Serialize for RedBlackMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

struct RedBlackMapVisitor<T, U> {
    marker: PhantomData<fn() -> RedBlackMap<T, U>>,
}

impl<'de, T, U> Visitor<'de> for RedBlackMapVisitor<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    type Value = RedBlackMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::with_capacity(cmp::min(
            access.size_hint().unwrap_or(0),
            MAX_PREALLOCATED_NODES,
        ));
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for RedBlackMap<T, U>
where
    T: Ord + Deserialize<'de>,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackMapVisitor {
            marker: PhantomData,
        })
    }
}
