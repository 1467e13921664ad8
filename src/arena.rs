//! Index-addressed node storage shared by every tree in this crate.
//!
//! Nodes refer to each other through [`Handle`]s instead of pointers, so a parent link is just
//! another `Option<Handle>` and never a second owner. Freed slots go on a free list and are
//! handed back out by the next [`Arena::alloc`], which keeps steady-state insert/remove workloads
//! from allocating.

use std::num::NonZeroU32;
use std::ops::{Index, IndexMut};

use smallvec::SmallVec;

/// Root-to-node handles collected on the way down. Deep enough for any balanced tree this side
/// of `Handle::MAX` nodes; degenerate shapes spill to the heap.
pub(crate) type Path = SmallVec<[Handle; 64]>;

/// A reference to a slot in an [`Arena`]. Stored as `index + 1` so that `Option<Handle>` is the
/// same size as `Handle`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub(crate) struct Handle(NonZeroU32);

impl Handle {
    pub(crate) const MAX: usize = (u32::MAX - 1) as usize;

    fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX, "`Handle::from_index()` - `index` > `Handle::MAX`!");
        Self(NonZeroU32::new(index as u32 + 1).expect("`index + 1` is never zero"))
    }

    fn to_index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

#[derive(Clone)]
pub(crate) struct Arena<N> {
    slots: Vec<Option<N>>,
    free: Vec<Handle>,
}

impl<N> Default for Arena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Arena<N> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub(crate) fn alloc(&mut self, node: N) -> Handle {
        if let Some(handle) = self.free.pop() {
            self.slots[handle.to_index()] = Some(node);
            handle
        } else {
            assert!(
                self.slots.len() <= Handle::MAX,
                "`Arena::alloc()` - arena is at maximum capacity ({})",
                Handle::MAX
            );
            self.slots.push(Some(node));
            Handle::from_index(self.slots.len() - 1)
        }
    }

    /// Removes the node from the arena and returns it. The handle becomes invalid and may be
    /// returned by a later `alloc`.
    pub(crate) fn take(&mut self, handle: Handle) -> N {
        let node = self.slots[handle.to_index()]
            .take()
            .expect("`Arena::take()` - `handle` is invalid!");
        self.free.push(handle);
        node
    }
}

impl<N> Index<Handle> for Arena<N> {
    type Output = N;

    #[inline]
    fn index(&self, handle: Handle) -> &N {
        self.slots[handle.to_index()]
            .as_ref()
            .expect("`Arena::index()` - `handle` is invalid!")
    }
}

impl<N> IndexMut<Handle> for Arena<N> {
    #[inline]
    fn index_mut(&mut self, handle: Handle) -> &mut N {
        self.slots[handle.to_index()]
            .as_mut()
            .expect("`Arena::index_mut()` - `handle` is invalid!")
    }
}
