//! Slot allocator that hands out copyable handles instead of references.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle(usize);

enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object backed by one `Vec`.
///
/// Freed blocks are chained into a free list and reused by later allocations, so a handle stays
/// valid until the object behind it is freed. Handles are plain indices: they carry no lifetime
/// and can be stored inside the objects of the arena itself, which is what lets tree nodes point
/// at their parents without any shared ownership.
pub struct TypedArena<T> {
    head: Option<usize>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>` with room for `capacity` objects before the
    /// backing storage reallocates.
    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Allocates an object and returns its handle. Vacant blocks are reused before the backing
    /// storage grows.
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle(self.blocks.len() - 1)
            },
            Some(index) => {
                match mem::replace(&mut self.blocks[index], Block::Occupied(value)) {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Expected a vacant block on the free list."),
                }
                Handle(index)
            },
        }
    }

    /// Deallocates an object and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant block.
    pub fn free(&mut self, handle: Handle) -> T {
        if handle.0 >= self.blocks.len() {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(&mut self.blocks[handle.0], Block::Vacant(self.head));
        match old_block {
            Block::Vacant(next) => {
                self.blocks[handle.0] = Block::Vacant(next);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.len -= 1;
                self.head = Some(handle.0);
                value
            },
        }
    }

    /// Drops every object in the arena. Outstanding handles become invalid.
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }

    /// Returns an immutable reference to an object. Returns `None` if the handle does not
    /// correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        match self.blocks.get(handle.0) {
            Some(Block::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object. Returns `None` if the handle does not
    /// correspond to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.0) {
            Some(Block::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle does not refer to a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::with_capacity(16);
        arena.free(Handle(0));
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::with_capacity(16);
        let handle = arena.allocate(0);
        arena.free(handle);
        arena.free(handle);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::with_capacity(16);
        assert_eq!(arena.allocate(0), Handle(0));
        assert_eq!(arena.allocate(0), Handle(1));
        assert_eq!(arena.allocate(0), Handle(2));
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_allocate_past_capacity() {
        let mut arena = TypedArena::with_capacity(1);
        let handles: Vec<Handle> = (0..4).map(|i| arena.allocate(i)).collect();
        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(arena[handle], i);
        }
    }

    #[test]
    fn test_free_reuses_block() {
        let mut arena = TypedArena::with_capacity(16);
        let first = arena.allocate(1);
        let second = arena.allocate(2);
        assert_eq!(arena.free(first), 1);
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.allocate(3), first);
        assert_eq!(arena[first], 3);
        assert_eq!(arena[second], 2);
    }

    #[test]
    fn test_free_list_order() {
        let mut arena = TypedArena::with_capacity(16);
        let a = arena.allocate(0);
        let b = arena.allocate(0);
        arena.free(a);
        arena.free(b);
        assert_eq!(arena.allocate(0), b);
        assert_eq!(arena.allocate(0), a);
        assert_eq!(arena.allocate(0), Handle(2));
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::with_capacity(16);
        let handle = arena.allocate(0);
        arena.free(handle);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.get(Handle(7)), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::with_capacity(16);
        let handle = arena.allocate(0);
        *arena.get_mut(handle).unwrap() = 1;
        assert_eq!(arena.get(handle), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::with_capacity(16);
        let handle = arena.allocate(0);
        arena.clear();
        assert_eq!(arena.len(), 0);
        assert_eq!(arena.get(handle), None);
        assert_eq!(arena.allocate(5), Handle(0));
    }
}
