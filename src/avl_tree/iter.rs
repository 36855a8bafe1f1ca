use crate::arena::Handle;
use crate::avl_tree::tree::Tree;

/// An iterator for `AvlSet`.
///
/// This iterator starts at the minimum node and repeatedly steps to the successor, yielding keys
/// in ascending order. It borrows the set, so the set cannot be modified while it is in use.
pub struct AvlSetIter<'a> {
    tree: &'a Tree,
    next: Option<Handle>,
    remaining: usize,
}

impl<'a> AvlSetIter<'a> {
    pub(super) fn new(tree: &'a Tree, len: usize) -> Self {
        AvlSetIter {
            tree,
            next: tree.first(),
            remaining: len,
        }
    }
}

impl<'a> Iterator for AvlSetIter<'a> {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.next?;
        self.next = self.tree.successor(curr);
        self.remaining -= 1;
        Some(self.tree.key(curr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> ExactSizeIterator for AvlSetIter<'a> {}

/// An owning iterator for `AvlSet`.
///
/// This iterator traverses the keys of the set in ascending order.
pub struct AvlSetIntoIter {
    tree: Tree,
    next: Option<Handle>,
    remaining: usize,
}

impl AvlSetIntoIter {
    pub(super) fn new(tree: Tree, len: usize) -> Self {
        let next = tree.first();
        AvlSetIntoIter {
            tree,
            next,
            remaining: len,
        }
    }
}

impl Iterator for AvlSetIntoIter {
    type Item = i32;

    fn next(&mut self) -> Option<Self::Item> {
        let curr = self.next?;
        self.next = self.tree.successor(curr);
        self.remaining -= 1;
        Some(self.tree.key(curr))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for AvlSetIntoIter {}
