//! An arena-backed red black tree that provides an ordered map and an ordered set with unique
//! keys and guaranteed logarithmic height.
//!
//! # Examples
//!
//! ```
//! use rbtree_index::RedBlackMap;
//!
//! let mut map = RedBlackMap::new();
//! for key in vec![26, 41, 17, 21, 14] {
//!     map.insert(key, key * 10);
//! }
//!
//! assert_eq!(map.get(&21), Some(&210));
//! assert!(map.delete(&26));
//! assert!(!map.delete(&88));
//! assert_eq!(map.keys().cloned().collect::<Vec<u32>>(), vec![14, 17, 21, 41]);
//! assert!(map.validate().is_ok());
//! ```

pub mod arena;
mod entry;
pub mod red_black_tree;

pub use crate::red_black_tree::{RedBlackMap, RedBlackSet};
