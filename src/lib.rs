//! An ordered set of integers backed by an AVL tree.
//!
//! The tree keeps parent links alongside child links, so its nodes live in a private arena and
//! refer to each other by handle. Rebalancing after an insertion or a deletion walks from the
//! changed node back up to the root.

mod arena;
pub mod avl_tree;

pub use crate::avl_tree::AvlSet;
