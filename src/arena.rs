//! Slot arena backing the linked sequence.
//!
//! Nodes live in a growable slot array and are addressed by stable
//! [`Handle`]s instead of raw pointers. A handle stays valid from the
//! insert that produced it until the erase that reclaims it; erasing one
//! node never moves or invalidates another. Reclaimed slots are chained
//! into an explicit free list and reused by later inserts.
//!
//! Slot 0 is reserved at construction for the sentinel node: a permanent,
//! payload-free node marking one-past-the-last-element. Links are circular
//! through the sentinel, so an empty chain has the sentinel pointing at
//! itself in both directions and boundary splices need no special cases.

use core::mem;

/// Stable handle to a node in a [`NodeArena`].
///
/// Handles are plain slot indices; they are `Copy`, cheap to compare, and
/// remain valid until the node they address is erased. A handle obtained
/// from one sequence must not be used with another (caller obligation,
/// same discipline as the `slab` crate).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle(u32);

impl Handle {
    /// The reserved sentinel slot, one past the last element.
    pub(crate) const SENTINEL: Handle = Handle(0);

    /// Free-list terminator. Never handed out as a slot index.
    const NONE: Handle = Handle(u32::MAX);

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "slot index exceeds handle range");
        Handle(index as u32)
    }
}

/// A linked node: payload plus non-owning links to its neighbors.
///
/// `value` is `None` only for the sentinel.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) prev: Handle,
    pub(crate) next: Handle,
    pub(crate) value: Option<T>,
}

impl<T> Node<T> {
    /// Unwraps the payload of a non-sentinel node.
    #[inline]
    pub(crate) fn into_value(self) -> T {
        self.value.expect("sentinel node has no value")
    }
}

#[derive(Debug)]
enum Slot<T> {
    Occupied(Node<T>),
    Vacant { next_free: Handle },
}

/// Growable arena of linked nodes with an explicit free list.
#[derive(Debug)]
pub(crate) struct NodeArena<T> {
    slots: Vec<Slot<T>>,
    free_head: Handle,
}

impl<T> NodeArena<T> {
    /// Creates an arena holding only the sentinel, linked to itself.
    pub(crate) fn new() -> Self {
        let sentinel = Slot::Occupied(Node {
            prev: Handle::SENTINEL,
            next: Handle::SENTINEL,
            value: None,
        });
        Self {
            slots: vec![sentinel],
            free_head: Handle::NONE,
        }
    }

    /// Total slots allocated, including the sentinel and vacant slots.
    #[cfg(test)]
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Inserts a node, reusing a reclaimed slot when one is available.
    pub(crate) fn insert(&mut self, node: Node<T>) -> Handle {
        if self.free_head == Handle::NONE {
            let handle = Handle::from_index(self.slots.len());
            self.slots.push(Slot::Occupied(node));
            return handle;
        }

        let handle = self.free_head;
        match self.slots[handle.index()] {
            Slot::Vacant { next_free } => self.free_head = next_free,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        }
        self.slots[handle.index()] = Slot::Occupied(node);
        handle
    }

    /// Reclaims a node's slot and returns the node.
    ///
    /// # Panics
    ///
    /// Panics if the handle is vacant or is the sentinel.
    pub(crate) fn remove(&mut self, handle: Handle) -> Node<T> {
        assert_ne!(handle, Handle::SENTINEL, "sentinel slot is permanent");

        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        match mem::replace(&mut self.slots[handle.index()], vacant) {
            Slot::Occupied(node) => {
                self.free_head = handle;
                node
            }
            Slot::Vacant { next_free } => {
                self.slots[handle.index()] = Slot::Vacant { next_free };
                panic!("invalid handle");
            }
        }
    }

    /// Returns the node at `handle`.
    ///
    /// # Panics
    ///
    /// Panics if the handle is vacant or out of range.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        match &self.slots[handle.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("invalid handle"),
        }
    }

    /// Returns the node at `handle`, mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle is vacant or out of range.
    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut Node<T> {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("invalid handle"),
        }
    }

    /// Captures a raw view of the slot buffer.
    ///
    /// The mutable iterator must hand out references that all derive from
    /// one pointer: re-borrowing the whole buffer through `node_mut` on
    /// every step would invalidate references yielded earlier. The borrow
    /// that produced the view must outlive every use of it, and the arena
    /// must not grow while the view is live.
    pub(crate) fn raw_nodes(&mut self) -> RawNodes<T> {
        RawNodes {
            base: self.slots.as_mut_ptr(),
        }
    }
}

/// Raw pointer view over an arena's slot buffer.
pub(crate) struct RawNodes<T> {
    base: *mut Slot<T>,
}

impl<T> Clone for RawNodes<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RawNodes<T> {}

impl<T> RawNodes<T> {
    /// Returns the node at `handle` with an unconstrained lifetime.
    ///
    /// # Safety
    ///
    /// `handle` must index an occupied slot of the buffer the view was
    /// captured from, the buffer must not have been reallocated since,
    /// and no other live reference may overlap the returned node.
    ///
    /// # Panics
    ///
    /// Panics if the slot is vacant.
    #[inline]
    pub(crate) unsafe fn node_mut<'a>(self, handle: Handle) -> &'a mut Node<T> {
        match &mut *self.base.add(handle.index()) {
            Slot::Occupied(node) => node,
            Slot::Vacant { .. } => panic!("invalid handle"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn value_node(prev: Handle, next: Handle, value: u64) -> Node<u64> {
        Node {
            prev,
            next,
            value: Some(value),
        }
    }

    #[test]
    fn sentinel_is_self_linked() {
        let arena: NodeArena<u64> = NodeArena::new();
        let sentinel = arena.node(Handle::SENTINEL);
        assert_eq!(sentinel.prev, Handle::SENTINEL);
        assert_eq!(sentinel.next, Handle::SENTINEL);
        assert!(sentinel.value.is_none());
    }

    #[test]
    fn insert_returns_distinct_handles() {
        let mut arena = NodeArena::new();
        let a = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 1));
        let b = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 2));

        assert_ne!(a, b);
        assert_ne!(a, Handle::SENTINEL);
        assert_eq!(arena.node(a).value, Some(1));
        assert_eq!(arena.node(b).value, Some(2));
    }

    #[test]
    fn removed_slots_are_reused() {
        let mut arena = NodeArena::new();
        let a = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 1));
        let b = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 2));

        assert_eq!(arena.remove(a).into_value(), 1);
        assert_eq!(arena.remove(b).into_value(), 2);

        // LIFO reuse: most recently freed slot comes back first.
        let c = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 3));
        let d = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 4));
        assert_eq!(c, b);
        assert_eq!(d, a);
        assert_eq!(arena.slot_count(), 3);
    }

    #[test]
    fn remove_keeps_other_handles_stable() {
        let mut arena = NodeArena::new();
        let a = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 1));
        let b = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 2));

        arena.remove(a);
        assert_eq!(arena.node(b).value, Some(2));
    }

    #[test]
    #[should_panic(expected = "invalid handle")]
    fn access_after_remove_panics() {
        let mut arena = NodeArena::new();
        let a = arena.insert(value_node(Handle::SENTINEL, Handle::SENTINEL, 1));
        arena.remove(a);
        arena.node(a);
    }

    #[test]
    #[should_panic(expected = "sentinel slot is permanent")]
    fn removing_sentinel_panics() {
        let mut arena: NodeArena<u64> = NodeArena::new();
        arena.remove(Handle::SENTINEL);
    }
}
