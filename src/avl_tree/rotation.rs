use crate::arena::Handle;
use crate::avl_tree::node::Dir;
use crate::avl_tree::tree::Tree;
use log::{debug, trace};

/// The restructuring applied at a node whose children differ in height by more than one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rotation {
    /// Right child is taller and leans right (or is level).
    Left,
    /// Left child is taller and leans left (or is level).
    Right,
    /// Right child is taller and leans left.
    RightLeft,
    /// Left child is taller and leans right.
    LeftRight,
}

impl Tree {
    /// Rotates the subtree at `node` towards `dir`: the child on the opposite side takes the
    /// place of `node` and `node` becomes its `dir` child. Returns the promoted child.
    fn rotate(&mut self, node: Handle, dir: Dir) -> Handle {
        let child = match self.arena[node].child(dir.opposite()) {
            Some(child) => child,
            None => panic!("Expected {:?} child of node to rotate {:?}.", dir.opposite(), dir),
        };
        let parent = self.arena[node].parent;

        self.arena[child].parent = parent;
        match parent {
            None => self.root = Some(child),
            Some(parent) => self.arena[parent].replace_child(node, Some(child)),
        }

        let inner = self.arena[child].child(dir);
        if let Some(inner) = inner {
            self.arena[inner].parent = Some(node);
        }
        self.arena[node].set_child(dir.opposite(), inner);

        self.arena[child].set_child(dir, Some(node));
        self.arena[node].parent = Some(child);

        // node is now below child, so its height has to be settled first
        self.update_height(node);
        self.update_height(child);
        child
    }

    pub fn rotate_left(&mut self, node: Handle) -> Handle {
        self.rotate(node, Dir::Left)
    }

    pub fn rotate_right(&mut self, node: Handle) -> Handle {
        self.rotate(node, Dir::Right)
    }

    /// Picks the rotation that restores balance at `node`, or `None` if `node` is balanced.
    ///
    /// # Panics
    ///
    /// Panics if the taller child has no children of its own, which cannot happen while the
    /// heights of the tree are maintained correctly.
    pub fn select_rotation(&self, node: Handle) -> Option<Rotation> {
        let left = self.arena[node].left;
        let right = self.arena[node].right;
        let balance = self.height_of(left) - self.height_of(right);
        if balance.abs() <= 1 {
            return None;
        }

        let (taller, dir) = if balance < 0 {
            (right, Dir::Right)
        } else {
            (left, Dir::Left)
        };
        let taller = taller.expect("Expected taller child of an unbalanced node to be `Some`.");

        if self.arena[taller].is_leaf() {
            panic!(
                "Unbalanced node with key {} has a taller child without children.",
                self.arena[node].key,
            );
        }

        let near = self.arena[taller].child(dir);
        let far = self.arena[taller].child(dir.opposite());
        let single = match (near, far) {
            (None, None) => unreachable!(),
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (near, far) => self.height_of(near) >= self.height_of(far),
        };

        Some(match (dir, single) {
            (Dir::Right, true) => Rotation::Left,
            (Dir::Right, false) => Rotation::RightLeft,
            (Dir::Left, true) => Rotation::Right,
            (Dir::Left, false) => Rotation::LeftRight,
        })
    }

    /// Applies `rotation` at `node` and returns the root of the restructured subtree.
    pub fn apply_rotation(&mut self, node: Handle, rotation: Rotation) -> Handle {
        match rotation {
            Rotation::Left => self.rotate_left(node),
            Rotation::Right => self.rotate_right(node),
            Rotation::RightLeft => {
                let child = self.arena[node].right.expect("Expected right child to be `Some`.");
                self.rotate_right(child);
                self.rotate_left(node)
            },
            Rotation::LeftRight => {
                let child = self.arena[node].left.expect("Expected left child to be `Some`.");
                self.rotate_left(child);
                self.rotate_right(node)
            },
        }
    }

    /// Rotates at `node` if it is unbalanced. Returns the root of the local subtree afterwards.
    pub fn rebalance(&mut self, node: Handle) -> Handle {
        let rotation = match self.select_rotation(node) {
            Some(rotation) => rotation,
            None => return node,
        };

        trace!("{:?} rotation at key {}", rotation, self.arena[node].key);
        let subtree_root = self.apply_rotation(node, rotation);
        if self.root == Some(subtree_root) {
            debug!("rotation promoted key {} to root", self.arena[subtree_root].key);
        }
        subtree_root
    }
}
