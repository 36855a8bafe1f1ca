use crate::avl_tree::iter::{AvlSetIntoIter, AvlSetIter};
use crate::avl_tree::tree::Tree;
use crate::avl_tree::Error;
use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set of integers implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one, which bounds search,
/// insertion and deletion to `O(log n)`. Nodes are stored in an arena owned by the set and link
/// to their parents, so rebalancing walks upwards from the changed node instead of recursing.
///
/// # Examples
/// ```
/// use avl_set::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// assert!(set.add(10));
/// assert!(set.add(20));
/// assert!(set.add(30));
/// assert!(!set.add(20));
///
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.contains(20), Some(0));
/// assert_eq!(set.contains(30), Some(1));
/// assert_eq!(set.contains(40), None);
///
/// assert!(set.delete(10));
/// assert!(!set.delete(10));
/// assert_eq!(set.iter().collect::<Vec<i32>>(), vec![20, 30]);
/// ```
pub struct AvlSet {
    tree: Tree,
    len: usize,
}

impl AvlSet {
    /// Constructs a new, empty `AvlSet`.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Self {
        AvlSet {
            tree: Tree::new(),
            len: 0,
        }
    }

    /// Returns the minimum number of nodes in an avl tree of the given height.
    ///
    /// The counts follow `N(0) = 1`, `N(1) = 2` and `N(h) = N(h - 1) + N(h - 2) + 1`.
    ///
    /// # Panics
    ///
    /// Panics if the count does not fit in a `u64`, which happens for heights above 90.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// assert_eq!(AvlSet::min_node_count(0), 1);
    /// assert_eq!(AvlSet::min_node_count(4), 12);
    /// ```
    pub fn min_node_count(height: usize) -> u64 {
        let (mut prev, mut curr) = (1u64, 2u64);
        if height == 0 {
            return prev;
        }
        for _ in 1..height {
            let next = curr
                .checked_add(prev)
                .and_then(|sum| sum.checked_add(1))
                .expect("Minimum node count overflowed `u64`.");
            prev = curr;
            curr = next;
        }
        curr
    }

    /// Inserts a key into the set. Returns `false` and leaves the set unchanged if the key is
    /// already present.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.add(1));
    /// assert!(!set.add(1));
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn add(&mut self, key: i32) -> bool {
        if !self.tree.insert(key) {
            return false;
        }
        self.len += 1;
        true
    }

    /// Removes a key from the set. Returns `false` if the key was not present.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.add(1);
    /// assert!(set.delete(1));
    /// assert!(!set.delete(1));
    /// ```
    pub fn delete(&mut self, key: i32) -> bool {
        if !self.tree.remove(key) {
            return false;
        }
        self.len -= 1;
        true
    }

    /// Returns the depth of the node holding a key, with the root at depth 0. Returns `None` if
    /// the key is not in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.add(2);
    /// set.add(1);
    /// assert_eq!(set.contains(2), Some(0));
    /// assert_eq!(set.contains(1), Some(1));
    /// assert_eq!(set.contains(3), None);
    /// ```
    pub fn contains(&self, key: i32) -> Option<usize> {
        self.tree.depth(key)
    }

    /// Returns the number of keys in the set.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clears the set, removing all keys.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::from(&[1, 2][..]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
        self.len = 0;
    }

    /// Returns the height of the tree, where a single node has height 0. Returns `None` if the
    /// set is empty.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet = (1..=7).collect();
    /// assert_eq!(set.height(), Some(2));
    /// ```
    pub fn height(&self) -> Option<usize> {
        self.tree.height()
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<i32> {
        self.tree.first().map(|node| self.tree.key(node))
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<i32> {
        self.tree.last().map(|node| self.tree.key(node))
    }

    /// Returns an iterator over the set. The iterator yields keys in ascending order.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set = AvlSet::from(&[5, 3, 3, 8][..]);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(3));
    /// assert_eq!(iterator.next(), Some(5));
    /// assert_eq!(iterator.next(), Some(8));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter {
        AvlSetIter::new(&self.tree, self.len)
    }

    /// Walks the whole tree and checks key ordering, the balance of every node, cached heights,
    /// parent links and the length of the set. Returns the first violation found.
    ///
    /// # Examples
    /// ```
    /// use avl_set::avl_tree::AvlSet;
    ///
    /// let set: AvlSet = (0..100).collect();
    /// assert_eq!(set.check_invariants(), Ok(()));
    /// ```
    pub fn check_invariants(&self) -> Result<(), Error> {
        self.tree.check_invariants(self.len)
    }
}

impl Default for AvlSet {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for AvlSet {
    /// Builds an independent set with the same keys. The shape of the copy is whatever repeated
    /// insertion in ascending order produces, not the shape of `self`.
    fn clone(&self) -> Self {
        self.iter().collect()
    }
}

impl<'a> From<&'a [i32]> for AvlSet {
    /// Builds a set by adding the keys in order. Later duplicates are ignored.
    fn from(keys: &'a [i32]) -> Self {
        keys.iter().cloned().collect()
    }
}

impl FromIterator<i32> for AvlSet {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        let mut set = AvlSet::new();
        set.extend(iter);
        set
    }
}

impl Extend<i32> for AvlSet {
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = i32>,
    {
        for key in iter {
            self.add(key);
        }
    }
}

impl IntoIterator for AvlSet {
    type Item = i32;
    type IntoIter = AvlSetIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        AvlSetIntoIter::new(self.tree, self.len)
    }
}

impl<'a> IntoIterator for &'a AvlSet {
    type Item = i32;
    type IntoIter = AvlSetIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl PartialEq for AvlSet {
    fn eq(&self, other: &AvlSet) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for AvlSet {}

impl fmt::Debug for AvlSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl Serialize for AvlSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for AvlSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let keys = Vec::<i32>::deserialize(deserializer)?;
        Ok(keys.into_iter().collect())
    }
}
