use crate::arena::{Handle, TypedArena};
use crate::avl_tree::node::{Dir, Node, EMPTY_HEIGHT};
use crate::avl_tree::Error;
use log::trace;
use std::cmp::{self, Ordering};

const INITIAL_CAPACITY: usize = 16;

/// The node graph of an avl tree: an arena of nodes and the handle of the root.
///
/// Handles stored in the nodes always refer to live blocks of `arena`. The tree does not track its
/// own size; `AvlSet` does.
pub struct Tree {
    pub(super) arena: TypedArena<Node>,
    pub(super) root: Option<Handle>,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            arena: TypedArena::with_capacity(INITIAL_CAPACITY),
            root: None,
        }
    }

    pub fn key(&self, node: Handle) -> i32 {
        self.arena[node].key
    }

    pub fn height_of(&self, node: Option<Handle>) -> i32 {
        match node {
            None => EMPTY_HEIGHT,
            Some(node) => self.arena[node].height,
        }
    }

    pub fn height(&self) -> Option<usize> {
        self.root.map(|root| self.arena[root].height as usize)
    }

    pub fn update_height(&mut self, node: Handle) {
        let height = {
            let Node { left, right, .. } = self.arena[node];
            cmp::max(self.height_of(left), self.height_of(right)) + 1
        };
        self.arena[node].height = height;
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
    }

    fn find(&self, key: i32) -> Option<Handle> {
        let mut curr = self.root;
        while let Some(node) = curr {
            curr = match key.cmp(&self.arena[node].key) {
                Ordering::Less => self.arena[node].left,
                Ordering::Greater => self.arena[node].right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    /// Returns the number of edges between the root and the node holding `key`.
    pub fn depth(&self, key: i32) -> Option<usize> {
        let mut curr = self.root;
        let mut depth = 0;
        while let Some(node) = curr {
            curr = match key.cmp(&self.arena[node].key) {
                Ordering::Less => self.arena[node].left,
                Ordering::Greater => self.arena[node].right,
                Ordering::Equal => return Some(depth),
            };
            depth += 1;
        }
        None
    }

    /// Inserts `key` as a new leaf and rebalances its ancestors. Returns `false` without touching
    /// the tree if the key is already present.
    pub fn insert(&mut self, key: i32) -> bool {
        let mut parent = None;
        let mut dir = Dir::Left;
        let mut curr = self.root;
        while let Some(node) = curr {
            dir = match key.cmp(&self.arena[node].key) {
                Ordering::Less => Dir::Left,
                Ordering::Greater => Dir::Right,
                Ordering::Equal => return false,
            };
            parent = Some(node);
            curr = self.arena[node].child(dir);
        }

        let new_node = self.arena.allocate(Node::new(key, parent));
        match parent {
            None => self.root = Some(new_node),
            Some(parent) => self.arena[parent].set_child(dir, Some(new_node)),
        }

        // a new leaf is always balanced
        self.retrace(parent);
        true
    }

    /// Removes the node holding `key`. A node with two children takes over the key of its
    /// successor and the successor is spliced out instead.
    pub fn remove(&mut self, key: i32) -> bool {
        let node = match self.find(key) {
            Some(node) => node,
            None => return false,
        };

        let target = match (self.arena[node].left, self.arena[node].right) {
            (Some(_), Some(right)) => {
                let successor = self.min_node(right);
                self.arena[node].key = self.arena[successor].key;
                successor
            },
            _ => node,
        };
        self.splice_out(target);
        true
    }

    // precondition: node has at most one child
    fn splice_out(&mut self, node: Handle) {
        let Node { key, parent, left, right, .. } = self.arena[node];
        let replacement = match (left, right) {
            (Some(_), Some(_)) => panic!("Expected node with at most one child to splice out."),
            (Some(child), None) | (None, Some(child)) => Some(child),
            (None, None) => None,
        };

        if let Some(child) = replacement {
            self.arena[child].parent = parent;
        }
        match parent {
            None => self.root = replacement,
            Some(parent) => self.arena[parent].replace_child(node, replacement),
        }
        self.arena.free(node);
        trace!("spliced out node with key {}", key);

        self.retrace(parent);
    }

    /// Walks from `start` to the root, refreshing heights and rotating wherever the balance
    /// invariant no longer holds.
    fn retrace(&mut self, start: Option<Handle>) {
        let mut curr = start;
        while let Some(node) = curr {
            // rotations move `node` below its replacement, so the next ancestor is read first
            let parent = self.arena[node].parent;
            self.update_height(node);
            self.rebalance(node);
            curr = parent;
        }
    }

    pub fn min_node(&self, mut node: Handle) -> Handle {
        while let Some(left) = self.arena[node].left {
            node = left;
        }
        node
    }

    pub fn max_node(&self, mut node: Handle) -> Handle {
        while let Some(right) = self.arena[node].right {
            node = right;
        }
        node
    }

    pub fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.min_node(root))
    }

    pub fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.max_node(root))
    }

    /// Returns the node with the smallest key greater than the key of `node`.
    pub fn successor(&self, node: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[node].right {
            return Some(self.min_node(right));
        }

        let mut curr = node;
        let mut parent = self.arena[node].parent;
        while let Some(ancestor) = parent {
            if self.arena[ancestor].left == Some(curr) {
                return Some(ancestor);
            }
            curr = ancestor;
            parent = self.arena[ancestor].parent;
        }
        None
    }

    /// Verifies ordering, balance, cached heights, parent links and that exactly `len` nodes are
    /// reachable from the root.
    pub fn check_invariants(&self, len: usize) -> Result<(), Error> {
        let mut count = 0;
        if let Some(root) = self.root {
            if self.arena[root].parent.is_some() {
                return Err(Error::RootHasParent { key: self.arena[root].key });
            }

            let mut stack = vec![(root, None, None)];
            while let Some((handle, lower, upper)) = stack.pop() {
                count += 1;
                let node = &self.arena[handle];
                let key = node.key;

                let below = lower.map_or(false, |lower| key <= lower);
                let above = upper.map_or(false, |upper| key >= upper);
                if below || above {
                    return Err(Error::Unordered { key });
                }

                let left_height = self.height_of(node.left);
                let right_height = self.height_of(node.right);
                let expected = cmp::max(left_height, right_height) + 1;
                if node.height != expected {
                    return Err(Error::IncorrectHeight {
                        key,
                        expected,
                        actual: node.height,
                    });
                }
                if (left_height - right_height).abs() > 1 {
                    return Err(Error::Unbalanced {
                        key,
                        balance: left_height - right_height,
                    });
                }

                let children = [(node.left, lower, Some(key)), (node.right, Some(key), upper)];
                for &(child, lower, upper) in children.iter() {
                    if let Some(child) = child {
                        if self.arena[child].parent != Some(handle) {
                            return Err(Error::BrokenParentLink { key: self.arena[child].key });
                        }
                        stack.push((child, lower, upper));
                    }
                }
            }
        }

        if count != len || self.arena.len() != len {
            return Err(Error::LenMismatch {
                expected: len,
                actual: count,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::avl_tree::Error;

    fn build(keys: &[i32]) -> Tree {
        let mut tree = Tree::new();
        for &key in keys {
            tree.insert(key);
        }
        tree
    }

    fn in_order(tree: &Tree) -> Vec<i32> {
        let mut keys = Vec::new();
        let mut curr = tree.first();
        while let Some(node) = curr {
            keys.push(tree.key(node));
            curr = tree.successor(node);
        }
        keys
    }

    #[test]
    fn test_insert_duplicate() {
        let mut tree = build(&[2, 1, 3]);
        assert!(!tree.insert(2));
        assert_eq!(tree.check_invariants(3), Ok(()));
    }

    #[test]
    fn test_depth() {
        let tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(tree.depth(4), Some(0));
        assert_eq!(tree.depth(2), Some(1));
        assert_eq!(tree.depth(7), Some(2));
        assert_eq!(tree.depth(8), None);
    }

    #[test]
    fn test_successor() {
        let tree = build(&[4, 2, 6, 1, 3, 5, 7]);
        assert_eq!(in_order(&tree), vec![1, 2, 3, 4, 5, 6, 7]);
        let last = tree.last().unwrap();
        assert_eq!(tree.key(last), 7);
        assert_eq!(tree.successor(last), None);
    }

    #[test]
    fn test_remove_leaf_and_root() {
        let mut tree = build(&[2, 1, 3]);
        assert!(tree.remove(1));
        assert!(tree.remove(2));
        assert_eq!(tree.check_invariants(1), Ok(()));
        assert!(tree.remove(3));
        assert!(tree.root.is_none());
        assert!(!tree.remove(3));
        assert_eq!(tree.check_invariants(0), Ok(()));
    }

    #[test]
    fn test_remove_reuses_arena_block() {
        let mut tree = build(&[2, 1, 3]);
        tree.remove(1);
        tree.insert(0);
        assert_eq!(tree.arena.len(), 3);
        assert_eq!(in_order(&tree), vec![0, 2, 3]);
    }

    #[test]
    fn test_check_detects_stale_height() {
        let mut tree = build(&[2, 1, 3]);
        let root = tree.root.unwrap();
        tree.arena[root].height = 5;
        assert_eq!(
            tree.check_invariants(3),
            Err(Error::IncorrectHeight { key: 2, expected: 1, actual: 5 }),
        );
    }

    #[test]
    fn test_check_detects_unordered_key() {
        let mut tree = build(&[2, 1, 3]);
        let left = tree.arena[tree.root.unwrap()].left.unwrap();
        tree.arena[left].key = 9;
        assert_eq!(tree.check_invariants(3), Err(Error::Unordered { key: 9 }));
    }

    #[test]
    fn test_check_detects_len_mismatch() {
        let tree = build(&[2, 1, 3]);
        assert_eq!(
            tree.check_invariants(4),
            Err(Error::LenMismatch { expected: 4, actual: 3 }),
        );
    }

    #[test]
    fn test_check_detects_broken_parent_link() {
        let mut tree = build(&[2, 1, 3]);
        let right = tree.arena[tree.root.unwrap()].right.unwrap();
        tree.arena[right].parent = None;
        assert_eq!(tree.check_invariants(3), Err(Error::BrokenParentLink { key: 3 }));
    }
}
