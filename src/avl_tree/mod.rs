//! Self-balancing binary search tree where the heights of the two child subtrees of any node
//! differ by at most one.

mod iter;
mod node;
mod rotation;
mod set;
mod tree;

pub use self::iter::{AvlSetIntoIter, AvlSetIter};
pub use self::set::AvlSet;

use std::error;
use std::fmt;

/// A broken structural invariant found by `AvlSet::check_invariants`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// A key is not strictly between the keys of its ancestors.
    Unordered { key: i32 },
    /// The heights of the children of a node differ by more than one.
    Unbalanced { key: i32, balance: i32 },
    /// The cached height of a node does not match the heights of its children.
    IncorrectHeight { key: i32, expected: i32, actual: i32 },
    /// A child does not point back at the node that holds it.
    BrokenParentLink { key: i32 },
    /// The root has a parent.
    RootHasParent { key: i32 },
    /// The number of reachable nodes differs from the length of the set.
    LenMismatch { expected: usize, actual: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unordered { key } => write!(f, "key {} is out of order", key),
            Error::Unbalanced { key, balance } => {
                write!(f, "node with key {} has balance factor {}", key, balance)
            },
            Error::IncorrectHeight { key, expected, actual } => write!(
                f,
                "node with key {} has height {}, expected {}",
                key, actual, expected,
            ),
            Error::BrokenParentLink { key } => {
                write!(f, "node with key {} does not link back to its parent", key)
            },
            Error::RootHasParent { key } => write!(f, "root with key {} has a parent", key),
            Error::LenMismatch { expected, actual } => {
                write!(f, "expected {} nodes, found {}", expected, actual)
            },
        }
    }
}
