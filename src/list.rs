//! Doubly linked sequence over an arena with a sentinel node.
//!
//! [`LinkedSequence`] keeps its nodes in a slot arena: a slot array
//! with an explicit free list, addressed by stable
//! [`Handle`]s instead of raw pointers. The reserved slot 0 holds the
//! sentinel, a permanent payload-free node one past the last element.
//! Links are circular through the sentinel, so `head` is
//! `sentinel.next`, `tail` is `sentinel.prev`, and every insert or
//! erase is the same splice with no boundary branches.
//!
//! Inserting or erasing at a known handle is O(1) and leaves every other
//! handle valid; only the handle of an erased node dies. The element
//! count is tracked in a maintained counter, so `len()` is O(1) as well.

use core::fmt;
use core::marker::PhantomData;

use crate::arena::{Node, NodeArena, RawNodes};
use crate::error::Error;

pub use crate::arena::Handle;

/// A doubly linked sequence with a sentinel node.
///
/// Supports the same interface as [`DynamicArray`](crate::DynamicArray):
/// append/prepend, positional insert and erase, pop from either end, and
/// bounds-checked cursors. Positions are [`Handle`]s; `end_handle()` is
/// the sentinel, one past the last element. Splicing at a known handle is
/// O(1), and erasing a node never invalidates handles to other nodes
/// (the array cannot offer that: its growth reallocates everything).
///
/// # Example
///
/// ```
/// use linear_seq::LinkedSequence;
///
/// let mut seq: LinkedSequence<&str> = LinkedSequence::new();
/// seq.append("a");
/// let b = seq.append("b");
/// seq.prepend("start");
///
/// // O(1) insert before a known position.
/// seq.insert_before(b, "x");
///
/// let values: Vec<_> = seq.iter().copied().collect();
/// assert_eq!(values, vec!["start", "a", "x", "b"]);
///
/// assert_eq!(seq.pop_front(), Ok("start"));
/// assert_eq!(seq.pop_back(), Ok("b"));
/// ```
pub struct LinkedSequence<T> {
    arena: NodeArena<T>,
    len: usize,
}

impl<T> LinkedSequence<T> {
    /// Creates an empty sequence holding only the sentinel.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            len: 0,
        }
    }

    /// Returns the number of elements. O(1).
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ========================================================================
    // Positions
    // ========================================================================

    /// Handle of the first element; equals [`end_handle`](Self::end_handle)
    /// when the sequence is empty.
    #[inline]
    pub fn front_handle(&self) -> Handle {
        self.arena.node(Handle::SENTINEL).next
    }

    /// Handle of the last element; equals [`end_handle`](Self::end_handle)
    /// when the sequence is empty.
    #[inline]
    pub fn back_handle(&self) -> Handle {
        self.arena.node(Handle::SENTINEL).prev
    }

    /// The one-past-the-last-element position (the sentinel). Stable for
    /// the whole life of the sequence.
    #[inline]
    pub fn end_handle(&self) -> Handle {
        Handle::SENTINEL
    }

    /// Returns a reference to the element at `at`, or `None` for the
    /// end position.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    #[inline]
    pub fn get(&self, at: Handle) -> Option<&T> {
        self.arena.node(at).value.as_ref()
    }

    /// Returns a mutable reference to the element at `at`, or `None` for
    /// the end position.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    #[inline]
    pub fn get_mut(&mut self, at: Handle) -> Option<&mut T> {
        self.arena.node_mut(at).value.as_mut()
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(self.front_handle())
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.get(self.back_handle())
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Appends a value at the back, ahead of the sentinel. O(1).
    ///
    /// Returns the new node's handle.
    #[inline]
    pub fn append(&mut self, value: T) -> Handle {
        self.splice_before(Handle::SENTINEL, value)
    }

    /// Prepends a value at the front. O(1).
    ///
    /// Returns the new node's handle.
    #[inline]
    pub fn prepend(&mut self, value: T) -> Handle {
        self.splice_before(self.front_handle(), value)
    }

    /// Inserts `value` before position `at`. Inserting before
    /// `front_handle()` prepends; before `end_handle()` appends. O(1).
    ///
    /// Returns the new node's handle.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    pub fn insert_before(&mut self, at: Handle, value: T) -> Handle {
        self.splice_before(at, value)
    }

    /// Links a fresh node between `at.prev` and `at`.
    fn splice_before(&mut self, at: Handle, value: T) -> Handle {
        let prev = self.arena.node(at).prev;
        let handle = self.arena.insert(Node {
            prev,
            next: at,
            value: Some(value),
        });
        self.arena.node_mut(prev).next = handle;
        self.arena.node_mut(at).prev = handle;
        self.len += 1;
        handle
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the first element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the sequence holds no elements.
    pub fn pop_front(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        Ok(self.unlink(self.front_handle()))
    }

    /// Removes and returns the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the sequence holds no elements.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        Ok(self.unlink(self.back_handle()))
    }

    /// Removes and returns the element at `at`. O(1). Handles to other
    /// nodes stay valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] on an empty sequence,
    /// [`Error::OutOfBounds`] if `at` is the end position.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    pub fn erase(&mut self, at: Handle) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if at == Handle::SENTINEL {
            return Err(Error::OutOfBounds);
        }
        Ok(self.unlink(at))
    }

    /// Removes the elements in `[from, to)` by relinking the nodes
    /// bracketing the run directly to each other, then reclaiming each
    /// erased node. A zero-length range is a no-op.
    ///
    /// The walk from `from` to `to` is validated completely before any
    /// link is touched, so nothing is removed on error.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] on an empty sequence, [`Error::BadRange`]
    /// if `to` is not reachable by forward traversal from `from` without
    /// passing the end position.
    ///
    /// # Panics
    ///
    /// Panics if either handle refers to an erased node.
    pub fn erase_range(&mut self, from: Handle, to: Handle) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if from == to {
            return Ok(());
        }

        // Validate forward reachability: `to` must come before the walk
        // falls off the sentinel.
        let mut cursor = from;
        while cursor != to {
            if cursor == Handle::SENTINEL {
                return Err(Error::BadRange);
            }
            cursor = self.arena.node(cursor).next;
        }

        // Bypass the whole run in one splice.
        let prev = self.arena.node(from).prev;
        self.arena.node_mut(prev).next = to;
        self.arena.node_mut(to).prev = prev;

        // Reclaim the unlinked nodes.
        let mut cursor = from;
        while cursor != to {
            let node = self.arena.remove(cursor);
            cursor = node.next;
            self.len -= 1;
        }
        Ok(())
    }

    /// Removes all elements, resetting to the sentinel-only state.
    pub fn clear(&mut self) {
        let mut cursor = self.front_handle();
        while cursor != Handle::SENTINEL {
            let node = self.arena.remove(cursor);
            cursor = node.next;
        }
        let sentinel = self.arena.node_mut(Handle::SENTINEL);
        sentinel.next = Handle::SENTINEL;
        sentinel.prev = Handle::SENTINEL;
        self.len = 0;
    }

    /// Takes the contents, leaving `self` valid and empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        core::mem::take(self)
    }

    /// Unlinks `at` from the chain and reclaims its slot.
    fn unlink(&mut self, at: Handle) -> T {
        let node = self.arena.remove(at);
        self.arena.node_mut(node.prev).next = node.next;
        self.arena.node_mut(node.next).prev = node.prev;
        self.len -= 1;
        node.into_value()
    }

    // ========================================================================
    // Iteration and cursors
    // ========================================================================

    /// Iterates over references to the elements, front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            arena: &self.arena,
            front: self.front_handle(),
            back: self.back_handle(),
            remaining: self.len,
        }
    }

    /// Iterates over mutable references to the elements, front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        let front = self.front_handle();
        let back = self.back_handle();
        IterMut {
            nodes: self.arena.raw_nodes(),
            front,
            back,
            remaining: self.len,
            marker: PhantomData,
        }
    }

    /// Returns a cursor at the first element (at `end` when empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            at: self.front_handle(),
        }
    }

    /// Returns a cursor at the last element (at `end` when empty).
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor {
            list: self,
            at: self.back_handle(),
        }
    }

    /// Returns a cursor at position `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    pub fn cursor_at(&self, at: Handle) -> Cursor<'_, T> {
        let _ = self.arena.node(at);
        Cursor { list: self, at }
    }

    /// Returns a mutable cursor at the first element.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        let at = self.front_handle();
        CursorMut { list: self, at }
    }

    /// Returns a mutable cursor at position `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at` refers to an erased node.
    pub fn cursor_at_mut(&mut self, at: Handle) -> CursorMut<'_, T> {
        let _ = self.arena.node(at);
        CursorMut { list: self, at }
    }

    // Shared cursor stepping; both cursor types delegate here.

    #[inline]
    fn step_next(&self, at: Handle) -> Result<Handle, Error> {
        if at == Handle::SENTINEL {
            return Err(Error::OutOfBounds);
        }
        Ok(self.arena.node(at).next)
    }

    #[inline]
    fn step_prev(&self, at: Handle) -> Result<Handle, Error> {
        if at == self.front_handle() {
            return Err(Error::OutOfBounds);
        }
        Ok(self.arena.node(at).prev)
    }

    #[inline]
    fn value_at(&self, at: Handle) -> Result<&T, Error> {
        self.arena.node(at).value.as_ref().ok_or(Error::OutOfBounds)
    }
}

impl<T> Default for LinkedSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSequence<T> {
    /// Deep copy: every element is copied into a freshly
    /// sentinel-initialized sequence, preserving order.
    fn clone(&self) -> Self {
        let mut out = Self::new();
        for value in self.iter() {
            out.append(value.clone());
        }
        out
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<T: Eq> Eq for LinkedSequence<T> {}

impl<T> FromIterator<T> for LinkedSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut out = Self::new();
        for value in iter {
            out.append(value);
        }
        out
    }
}

impl<T> Extend<T> for LinkedSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for LinkedSequence<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to the elements of a [`LinkedSequence`].
pub struct Iter<'a, T> {
    arena: &'a NodeArena<T>,
    front: Handle,
    back: Handle,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.arena.node(self.front);
        self.front = node.next;
        node.value.as_ref()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        let node = self.arena.node(self.back);
        self.back = node.prev;
        node.value.as_ref()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Iterator over mutable references to the elements of a
/// [`LinkedSequence`].
///
/// Holds the slot buffer as a raw view captured once at construction and
/// derives every yielded reference from that single pointer; re-borrowing
/// the arena on each step would invalidate references yielded earlier, so
/// `collect::<Vec<&mut T>>()` followed by writes must stay sound.
pub struct IterMut<'a, T> {
    nodes: RawNodes<T>,
    front: Handle,
    back: Handle,
    remaining: usize,
    marker: PhantomData<&'a mut NodeArena<T>>,
}

// Safety: semantically a `&mut` over the elements, same bounds as
// `slice::IterMut`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: the arena is exclusively borrowed for 'a and cannot grow
        // or free slots while the borrow lives, every handle between
        // `front` and `back` is occupied, and the remaining counter yields
        // each node at most once between both ends, so the references are
        // disjoint and all derive from the one captured base pointer.
        let node: &'a mut Node<T> = unsafe { self.nodes.node_mut(self.front) };
        self.front = node.next;
        node.value.as_mut()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        // Safety: as in `next`.
        let node: &'a mut Node<T> = unsafe { self.nodes.node_mut(self.back) };
        self.back = node.prev;
        node.value.as_mut()
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

/// Owned iterator over a [`LinkedSequence`]'s elements.
pub struct IntoIter<T> {
    list: LinkedSequence<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for LinkedSequence<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a LinkedSequence<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut LinkedSequence<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Cursors
// =============================================================================

/// Read-only cursor into a [`LinkedSequence`].
///
/// A cursor is a node [`Handle`] plus a back-reference to the owning
/// sequence; dereference and every step are checked against the
/// sequence's boundaries and report [`Error::OutOfBounds`] instead of
/// walking past the sentinel. Two cursors are equal iff they sit on the
/// same node; comparing cursors from different sequences is a caller
/// error.
pub struct Cursor<'a, T> {
    list: &'a LinkedSequence<T>,
    at: Handle,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the end position.
    #[inline]
    pub fn value(&self) -> Result<&'a T, Error> {
        self.list.value_at(self.at)
    }

    /// Advances one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the end position.
    #[inline]
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.at = self.list.step_next(self.at)?;
        Ok(())
    }

    /// Retreats one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the first element.
    #[inline]
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.at = self.list.step_prev(self.at)?;
        Ok(())
    }

    /// Moves by `offset` positions (negative offsets retreat).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the first boundary hit; the
    /// cursor stays where the failing step left it.
    pub fn advance(&mut self, offset: isize) -> Result<(), Error> {
        if offset >= 0 {
            for _ in 0..offset {
                self.move_next()?;
            }
        } else {
            for _ in 0..offset.unsigned_abs() {
                self.move_prev()?;
            }
        }
        Ok(())
    }

    /// The cursor's position: a handle usable with the sequence's
    /// positional operations (`insert_before`, `erase`, `erase_range`).
    #[inline]
    pub const fn position(&self) -> Handle {
        self.at
    }

    /// Returns `true` if the cursor sits at the end position.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.at == Handle::SENTINEL
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("at", &self.at).finish()
    }
}

/// Mutable cursor into a [`LinkedSequence`].
///
/// Same traversal and equality semantics as [`Cursor`]; the only
/// refinement is [`value_mut`](CursorMut::value_mut).
pub struct CursorMut<'a, T> {
    list: &'a mut LinkedSequence<T>,
    at: Handle,
}

impl<T> CursorMut<'_, T> {
    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the end position.
    #[inline]
    pub fn value(&self) -> Result<&T, Error> {
        self.list.value_at(self.at)
    }

    /// Returns the element under the cursor, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the end position.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, Error> {
        self.list
            .arena
            .node_mut(self.at)
            .value
            .as_mut()
            .ok_or(Error::OutOfBounds)
    }

    /// Advances one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the end position.
    #[inline]
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.at = self.list.step_next(self.at)?;
        Ok(())
    }

    /// Retreats one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the first element.
    #[inline]
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.at = self.list.step_prev(self.at)?;
        Ok(())
    }

    /// Moves by `offset` positions (negative offsets retreat).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the first boundary hit.
    pub fn advance(&mut self, offset: isize) -> Result<(), Error> {
        if offset >= 0 {
            for _ in 0..offset {
                self.move_next()?;
            }
        } else {
            for _ in 0..offset.unsigned_abs() {
                self.move_prev()?;
            }
        }
        Ok(())
    }

    /// The cursor's position as a [`Handle`].
    #[inline]
    pub const fn position(&self) -> Handle {
        self.at
    }
}

impl<T> PartialEq for CursorMut<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at
    }
}

impl<T> Eq for CursorMut<'_, T> {}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("at", &self.at).finish()
    }
}
