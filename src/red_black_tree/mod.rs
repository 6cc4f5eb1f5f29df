//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Nodes live in an arena and refer to each other through `NodeId` handles, with `NodeId::NIL`
//! acting as the shared black sentinel that terminates every absent link.

mod map;
mod node;
mod set;
mod tree;

pub use self::map::{RedBlackMap, RedBlackMapIntoIter, RedBlackMapIter, RedBlackMapIterMut};
pub use self::node::{Color, NodeRef};
pub use self::set::{RedBlackSet, RedBlackSetIntoIter, RedBlackSetIter};
pub use crate::arena::NodeId;

use std::error;
use std::fmt;
use std::result;

/// An invariant violation reported by `validate`. Keys are rendered with their `Debug`
/// representation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The root of a non-empty tree is red.
    RedRoot,
    /// A red node has a red child.
    RedViolation { key: String },
    /// The two subtrees of a node contain a different number of black nodes on their paths to
    /// the sentinel.
    BlackHeightMismatch {
        key: String,
        left: usize,
        right: usize,
    },
    /// A key is out of order with respect to one of its ancestors.
    OrderViolation { key: String },
    /// The parent link of a node does not point at the node that links to it.
    BrokenParentLink { key: String },
    /// A child link refers to a freed node.
    DanglingLink { id: NodeId },
    /// The number of nodes reachable from the root differs from the number of allocated nodes.
    LengthMismatch { expected: usize, actual: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::RedRoot => write!(f, "root is red"),
            Error::RedViolation { key } => write!(f, "red node {} has a red child", key),
            Error::BlackHeightMismatch { key, left, right } => write!(
                f,
                "node {} has black height {} on the left and {} on the right",
                key, left, right,
            ),
            Error::OrderViolation { key } => write!(f, "node {} is out of order", key),
            Error::BrokenParentLink { key } => write!(f, "node {} has a stale parent link", key),
            Error::DanglingLink { id } => write!(f, "link to freed node {:?}", id),
            Error::LengthMismatch { expected, actual } => write!(
                f,
                "{} nodes reachable from the root but {} allocated",
                expected, actual,
            ),
        }
    }
}

/// Convenience `Result` type for invariant checks.
pub type Result<T> = result::Result<T, Error>;
