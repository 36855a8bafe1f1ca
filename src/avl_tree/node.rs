use crate::arena::Handle;

/// Height of an absent subtree.
pub const EMPTY_HEIGHT: i32 = -1;

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Dir {
    Left,
    Right,
}

impl Dir {
    pub fn opposite(self) -> Dir {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

/// A struct representing an internal node of an avl tree.
///
/// `left` and `right` are the only owning links in the node graph. `parent` is a lookup-only back
/// link used when walking towards the root.
#[derive(Debug)]
pub struct Node {
    pub key: i32,
    pub height: i32,
    pub parent: Option<Handle>,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
}

impl Node {
    pub fn new(key: i32, parent: Option<Handle>) -> Self {
        Node {
            key,
            height: 0,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, dir: Dir) -> Option<Handle> {
        match dir {
            Dir::Left => self.left,
            Dir::Right => self.right,
        }
    }

    pub fn set_child(&mut self, dir: Dir, child: Option<Handle>) {
        match dir {
            Dir::Left => self.left = child,
            Dir::Right => self.right = child,
        }
    }

    /// Replaces whichever slot currently holds `old` with `new`. The sibling slot and the parent
    /// link of `old` are left alone.
    pub fn replace_child(&mut self, old: Handle, new: Option<Handle>) {
        if self.left == Some(old) {
            self.left = new;
        } else if self.right == Some(old) {
            self.right = new;
        } else {
            panic!("Expected node to be a child of its parent.");
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
