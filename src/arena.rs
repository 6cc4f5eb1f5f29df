//! Slot allocator that backs the nodes of a tree.

use std::mem;
use std::ops::{Index, IndexMut};

/// A stable handle to a slot in an `Arena<T>`.
///
/// Handles stay valid until the slot is freed. `NodeId::NIL` is reserved and never refers to an
/// allocated slot, which makes it usable as the terminator of every absent link.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct NodeId(usize);

impl NodeId {
    /// The reserved handle that never refers to an allocated slot.
    pub const NIL: NodeId = NodeId(usize::MAX);

    /// Returns `true` if the handle is the reserved sentinel.
    pub fn is_nil(self) -> bool {
        self == NodeId::NIL
    }

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

enum Slot<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// A growable table of objects addressed by `NodeId`.
///
/// Freed slots are threaded onto a free list and handed out again by subsequent allocations, so
/// the table only grows when every slot is occupied.
///
/// # Examples
///
/// ```
/// use rbtree_index::arena::Arena;
///
/// let mut arena = Arena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(x), 2);
/// assert_eq!(arena.get(x), None);
/// ```
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<usize>,
    len: usize,
}

impl<T> Arena<T> {
    /// Constructs a new, empty `Arena<T>`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Constructs a new, empty `Arena<T>` with room for `capacity` objects before it reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbtree_index::arena::Arena;
    ///
    /// let arena: Arena<u32> = Arena::with_capacity(1024);
    /// assert!(arena.capacity() >= 1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Arena {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    /// Stores an object in the arena and returns its handle.
    pub fn allocate(&mut self, value: T) -> NodeId {
        self.len += 1;
        match self.free_head.take() {
            None => {
                self.slots.push(Slot::Occupied(value));
                NodeId(self.slots.len() - 1)
            },
            Some(index) => {
                let vacant = mem::replace(&mut self.slots[index], Slot::Occupied(value));
                match vacant {
                    Slot::Vacant(next) => self.free_head = next,
                    Slot::Occupied(_) => panic!("Expected a vacant slot on the free list."),
                }
                NodeId(index)
            },
        }
    }

    /// Removes an object from the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not refer to an occupied slot.
    pub fn free(&mut self, id: NodeId) -> T {
        let NodeId(index) = id;
        if index >= self.slots.len() {
            panic!("Error: attempting to free invalid slot.");
        }
        let old = mem::replace(&mut self.slots[index], Slot::Vacant(self.free_head));
        match old {
            Slot::Vacant(next) => {
                self.slots[index] = Slot::Vacant(next);
                panic!("Error: attempting to free vacant slot.");
            },
            Slot::Occupied(value) => {
                self.free_head = Some(index);
                self.len -= 1;
                value
            },
        }
    }

    /// Returns an immutable reference to an object, or `None` if `id` is vacant or out of range.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        match self.slots.get(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object, or `None` if `id` is vacant or out of range.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        match self.slots.get_mut(id.0) {
            Some(Slot::Occupied(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns the number of occupied slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of objects the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns a mutable reference to every object, positioned by slot index. Vacant slots yield
    /// `None`.
    pub(crate) fn slots_mut(&mut self) -> Vec<Option<&mut T>> {
        self.slots
            .iter_mut()
            .map(|slot| match slot {
                Slot::Occupied(value) => Some(value),
                Slot::Vacant(_) => None,
            })
            .collect()
    }

    /// Drops every object and forgets every handle.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = T;

    fn index(&self, id: NodeId) -> &Self::Output {
        self.get(id).expect("Error: handle does not refer to an occupied slot.")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        self.get_mut(id).expect("Error: handle does not refer to an occupied slot.")
    }
}
