//! Contiguous growable sequence with explicit capacity management.
//!
//! [`DynamicArray`] owns a single heap buffer. Elements occupy the prefix
//! `[0, len)`; the suffix `[len, capacity)` is uninitialized spare room.
//! When an insert finds the buffer full, a new buffer of
//! `max(capacity * 3 / 2, capacity + 1)` slots is allocated and the
//! elements are moved across, preserving order. Positions are plain
//! indices: `0` is the first element, `len()` is one past the last.
//!
//! Growth reallocates the buffer, so any cursor or index obtained before
//! a growing insert refers to stale storage afterwards. Re-obtaining
//! positions after structural mutation is the caller's obligation; the
//! borrow checker already prevents holding a live borrow across one.

use core::fmt;
use core::mem::{self, ManuallyDrop};
use core::ops::{Deref, DerefMut};
use core::ptr::{self, NonNull};
use core::slice;
use std::alloc::{alloc, dealloc, handle_alloc_error, Layout};

use crate::error::Error;

// =============================================================================
// RawBuf - owned allocation, no knowledge of which slots are live
// =============================================================================

/// Owned buffer of `cap` uninitialized slots.
///
/// Dropping a `RawBuf` frees the allocation without dropping elements;
/// whoever tracks the live prefix is responsible for dropping it first.
struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
}

impl<T> RawBuf<T> {
    const fn dangling() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
        }
    }

    /// Allocates room for `cap` elements. Zero-sized types never allocate;
    /// the dangling pointer is valid for them at any capacity.
    fn allocate(cap: usize) -> Self {
        if cap == 0 || mem::size_of::<T>() == 0 {
            return Self {
                ptr: NonNull::dangling(),
                cap,
            };
        }

        let layout = Layout::array::<T>(cap).unwrap();
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw as *mut T) else {
            handle_alloc_error(layout);
        };
        Self { ptr, cap }
    }

    #[inline]
    fn as_ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        if self.cap != 0 && mem::size_of::<T>() != 0 {
            let layout = Layout::array::<T>(self.cap).unwrap();
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

// =============================================================================
// DynamicArray
// =============================================================================

/// A contiguous, growable sequence.
///
/// Supports the same interface as [`LinkedSequence`](crate::LinkedSequence):
/// append/prepend, positional insert and erase, pop from either end, and
/// bounds-checked cursors. The trade-off is the usual one: O(1) indexed
/// access and amortized O(1) `append`, against O(n) `prepend` and
/// mid-sequence insert/erase (elements are shifted to keep the buffer
/// contiguous).
///
/// # Example
///
/// ```
/// use linear_seq::DynamicArray;
///
/// let mut seq: DynamicArray<u64> = DynamicArray::new();
/// seq.append(1);
/// seq.append(2);
/// seq.prepend(0);
///
/// assert_eq!(seq.len(), 3);
/// let values: Vec<_> = seq.iter().copied().collect();
/// assert_eq!(values, vec![0, 1, 2]);
///
/// assert_eq!(seq.pop_back(), Ok(2));
/// assert_eq!(seq.pop_front(), Ok(0));
/// ```
pub struct DynamicArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

// Safety: DynamicArray owns its elements exclusively; the raw pointer is
// just manual storage management.
unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

impl<T> DynamicArray<T> {
    /// Creates an empty array without allocating.
    #[inline]
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::dangling(),
            len: 0,
        }
    }

    /// Creates an empty array with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::allocate(capacity),
            len: 0,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots the current buffer can hold.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.buf.cap
    }

    /// Views the elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.buf.as_ptr(), self.len) }
    }

    /// Views the elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.buf.as_ptr(), self.len) }
    }

    /// Returns a reference to the element at `at`, if in bounds.
    #[inline]
    pub fn get(&self, at: usize) -> Option<&T> {
        self.as_slice().get(at)
    }

    /// Returns a mutable reference to the element at `at`, if in bounds.
    #[inline]
    pub fn get_mut(&mut self, at: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(at)
    }

    /// Returns a reference to the first element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the last element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|at| self.get(at))
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Appends a value at the back. Amortized O(1).
    #[inline]
    pub fn append(&mut self, value: T) {
        self.insert(self.len, value);
    }

    /// Prepends a value at the front, shifting all elements right. O(n).
    #[inline]
    pub fn prepend(&mut self, value: T) {
        self.insert(0, value);
    }

    /// Inserts `value` before position `at`, shifting `[at, len)` one slot
    /// to the right. `at == len()` appends.
    ///
    /// If the buffer is full the array grows to
    /// `max(capacity * 3 / 2, capacity + 1)` slots, so the first insert
    /// into a zero-capacity array still succeeds.
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn insert(&mut self, at: usize, value: T) {
        assert!(
            at <= self.len,
            "insert index {} out of bounds (len {})",
            at,
            self.len
        );

        if self.len == self.buf.cap {
            self.grow_insert(at, value);
            return;
        }

        unsafe {
            let slot = self.buf.as_ptr().add(at);
            // Shift the tail right; copy handles the overlap back-to-front.
            ptr::copy(slot, slot.add(1), self.len - at);
            ptr::write(slot, value);
        }
        self.len += 1;
    }

    /// Reallocating insert: move prefix, write `value`, move suffix.
    fn grow_insert(&mut self, at: usize, value: T) {
        let cap = self.buf.cap;
        let new_cap = usize::max(cap + cap / 2, cap + 1);
        let new_buf = RawBuf::allocate(new_cap);

        unsafe {
            let src = self.buf.as_ptr();
            let dst = new_buf.as_ptr();
            ptr::copy_nonoverlapping(src, dst, at);
            ptr::write(dst.add(at), value);
            ptr::copy_nonoverlapping(src.add(at), dst.add(at + 1), self.len - at);
        }

        // Every element was moved out bitwise; dropping the old RawBuf only
        // frees the allocation.
        self.buf = new_buf;
        self.len += 1;
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes and returns the first element. O(n).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the array holds no elements.
    #[inline]
    pub fn pop_front(&mut self) -> Result<T, Error> {
        self.erase(0)
    }

    /// Removes and returns the last element. O(1).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] if the array holds no elements.
    pub fn pop_back(&mut self) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        self.len -= 1;
        Ok(unsafe { ptr::read(self.buf.as_ptr().add(self.len)) })
    }

    /// Removes and returns the element at `at`, shifting the tail left.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] on an empty array, [`Error::OutOfBounds`]
    /// if `at >= len()`.
    pub fn erase(&mut self, at: usize) -> Result<T, Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if at >= self.len {
            return Err(Error::OutOfBounds);
        }

        unsafe {
            let slot = self.buf.as_ptr().add(at);
            let value = ptr::read(slot);
            ptr::copy(slot.add(1), slot, self.len - at - 1);
            self.len -= 1;
            Ok(value)
        }
    }

    /// Removes the elements in `[from, to)`, shifting the tail left to
    /// close the gap. A zero-length range is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Empty`] on an empty array, [`Error::BadRange`] if
    /// `to` is not reachable from `from` within bounds (`from > to` or
    /// `to > len()`). Nothing is removed on error.
    pub fn erase_range(&mut self, from: usize, to: usize) -> Result<(), Error> {
        if self.is_empty() {
            return Err(Error::Empty);
        }
        if from > to || to > self.len {
            return Err(Error::BadRange);
        }
        if from == to {
            return Ok(());
        }

        unsafe {
            let base = self.buf.as_ptr();
            ptr::drop_in_place(slice::from_raw_parts_mut(base.add(from), to - from));
            ptr::copy(base.add(to), base.add(from), self.len - to);
        }
        self.len -= to - from;
        Ok(())
    }

    /// Removes all elements, keeping the buffer.
    pub fn clear(&mut self) {
        let live = self.len;
        self.len = 0;
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.as_ptr(), live));
        }
    }

    /// Takes the contents, leaving `self` valid and empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    // ========================================================================
    // Iteration and cursors
    // ========================================================================

    /// Iterates over references to the elements, front to back.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterates over mutable references to the elements, front to back.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns a cursor at the first element (at `end` when empty).
    #[inline]
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor { array: self, at: 0 }
    }

    /// Returns a cursor at the last element (at `end` when empty).
    #[inline]
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor {
            array: self,
            at: self.len.saturating_sub(1),
        }
    }

    /// Returns a cursor at position `at`; `at == len()` is the one-past-end
    /// position.
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn cursor_at(&self, at: usize) -> Cursor<'_, T> {
        assert!(
            at <= self.len,
            "cursor index {} out of bounds (len {})",
            at,
            self.len
        );
        Cursor { array: self, at }
    }

    /// Returns a mutable cursor at the first element.
    #[inline]
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut { array: self, at: 0 }
    }

    /// Returns a mutable cursor at position `at`.
    ///
    /// # Panics
    ///
    /// Panics if `at > len()`.
    pub fn cursor_at_mut(&mut self, at: usize) -> CursorMut<'_, T> {
        assert!(
            at <= self.len,
            "cursor index {} out of bounds (len {})",
            at,
            self.len
        );
        CursorMut { array: self, at }
    }

    // Shared cursor stepping; both cursor types delegate here.

    #[inline]
    fn step_next(&self, at: usize) -> Result<usize, Error> {
        if at >= self.len {
            return Err(Error::OutOfBounds);
        }
        Ok(at + 1)
    }

    #[inline]
    fn step_prev(&self, at: usize) -> Result<usize, Error> {
        if at == 0 {
            return Err(Error::OutOfBounds);
        }
        Ok(at - 1)
    }

    #[inline]
    fn value_at(&self, at: usize) -> Result<&T, Error> {
        self.get(at).ok_or(Error::OutOfBounds)
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(self.buf.as_ptr(), self.len));
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Deep copy: the clone owns a fresh buffer with the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.buf.cap);
        for value in self.iter() {
            out.append(value.clone());
        }
        out
    }
}

impl<T> Deref for DynamicArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynamicArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut out = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            out.append(value);
        }
        out
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

// =============================================================================
// Owned iterator
// =============================================================================

/// Owned iterator over a [`DynamicArray`]'s elements.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    front: usize,
    back: usize,
}

// Safety: same ownership argument as DynamicArray.
unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        let value = unsafe { ptr::read(self.buf.as_ptr().add(self.front)) };
        self.front += 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(unsafe { ptr::read(self.buf.as_ptr().add(self.back)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Drop whatever was not yielded; RawBuf then frees the allocation.
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(
                self.buf.as_ptr().add(self.front),
                self.back - self.front,
            ));
        }
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let this = ManuallyDrop::new(self);
        // Safety: `this` is never dropped, so ownership of the buffer and
        // the live prefix moves into the iterator.
        let buf = unsafe { ptr::read(&this.buf) };
        IntoIter {
            buf,
            front: 0,
            back: this.len,
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> slice::Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> slice::IterMut<'a, T> {
        self.iter_mut()
    }
}

// =============================================================================
// Cursors
// =============================================================================

/// Read-only cursor into a [`DynamicArray`].
///
/// A cursor is a position (buffer index) plus a back-reference to the
/// owning array, so every dereference and step is checked against the
/// array's bounds and reports [`Error::OutOfBounds`] instead of walking
/// off the buffer. Two cursors are equal iff they sit at the same index;
/// comparing cursors from different arrays is a caller error.
///
/// # Example
///
/// ```
/// use linear_seq::{DynamicArray, Error};
///
/// let seq = DynamicArray::from([10, 20, 30]);
/// let mut cur = seq.cursor_front();
///
/// assert_eq!(cur.value(), Ok(&10));
/// cur.advance(2)?;
/// assert_eq!(cur.value(), Ok(&30));
///
/// cur.move_next()?; // step onto one-past-end
/// assert_eq!(cur.value(), Err(Error::OutOfBounds));
/// # Ok::<(), linear_seq::Error>(())
/// ```
pub struct Cursor<'a, T> {
    array: &'a DynamicArray<T>,
    at: usize,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the one-past-end position.
    #[inline]
    pub fn value(&self) -> Result<&'a T, Error> {
        self.array.value_at(self.at)
    }

    /// Advances one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already one past the end.
    #[inline]
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.at = self.array.step_next(self.at)?;
        Ok(())
    }

    /// Retreats one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the first element.
    #[inline]
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.at = self.array.step_prev(self.at)?;
        Ok(())
    }

    /// Moves by `offset` positions (negative offsets retreat).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the first boundary hit; the cursor
    /// stays where the failing step left it.
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

    /// The cursor's position: an index usable with the array's positional
    /// operations (`insert`, `erase`, `erase_range`).
    #[inline]
    pub const fn position(&self) -> usize {
        self.at
    }

    /// Returns `true` if the cursor sits one past the last element.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.at == self.array.len
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

/// Mutable cursor into a [`DynamicArray`].
///
/// Same traversal and equality semantics as [`Cursor`]; the only
/// refinement is [`value_mut`](CursorMut::value_mut).
pub struct CursorMut<'a, T> {
    array: &'a mut DynamicArray<T>,
    at: usize,
}

impl<T> CursorMut<'_, T> {
    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the one-past-end position.
    #[inline]
    pub fn value(&self) -> Result<&T, Error> {
        self.array.value_at(self.at)
    }

    /// Returns the element under the cursor, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] at the one-past-end position.
    #[inline]
    pub fn value_mut(&mut self) -> Result<&mut T, Error> {
        self.array.get_mut(self.at).ok_or(Error::OutOfBounds)
    }

    /// Advances one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already one past the end.
    #[inline]
    pub fn move_next(&mut self) -> Result<(), Error> {
        self.at = self.array.step_next(self.at)?;
        Ok(())
    }

    /// Retreats one position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if already at the first element.
    #[inline]
    pub fn move_prev(&mut self) -> Result<(), Error> {
        self.at = self.array.step_prev(self.at)?;
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

    /// The cursor's position as a plain index.
    #[inline]
    pub const fn position(&self) -> usize {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_array_is_empty() {
        let seq: DynamicArray<u64> = DynamicArray::new();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut seq = DynamicArray::new();
        for i in 0..100u64 {
            seq.append(i);
        }
        assert_eq!(seq.len(), 100);
        let values: Vec<_> = seq.iter().copied().collect();
        let expected: Vec<_> = (0..100).collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn prepend_reverses_insertion_order() {
        let mut seq = DynamicArray::new();
        for i in 0..10u64 {
            seq.prepend(i);
        }
        let values: Vec<_> = seq.iter().copied().collect();
        assert_eq!(values, vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn first_append_into_zero_capacity() {
        let mut seq: DynamicArray<u64> = DynamicArray::new();
        assert_eq!(seq.capacity(), 0);

        seq.append(7);

        assert_eq!(seq.len(), 1);
        assert!(seq.capacity() >= 1);
        assert_eq!(seq.get(0), Some(&7));
    }

    #[test]
    fn growth_is_one_and_a_half() {
        let mut seq = DynamicArray::new();
        let mut caps = vec![seq.capacity()];
        for i in 0..20u64 {
            seq.append(i);
            if seq.capacity() != *caps.last().unwrap() {
                caps.push(seq.capacity());
            }
        }
        // cap' = max(cap + cap / 2, cap + 1)
        assert_eq!(caps, vec![0, 1, 2, 3, 4, 6, 9, 13, 19, 28]);
    }

    #[test]
    fn insert_middle_shifts_tail() {
        let mut seq = DynamicArray::from([1u64, 2, 4, 5]);
        seq.insert(2, 3);
        assert_eq!(seq.as_slice(), &[1, 2, 3, 4, 5]);
    }

    #[test]
    fn insert_at_end_is_append() {
        let mut seq = DynamicArray::from([1u64, 2]);
        seq.insert(seq.len(), 3);
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "insert index")]
    fn insert_past_end_panics() {
        let mut seq = DynamicArray::from([1u64]);
        seq.insert(5, 2);
    }

    #[test]
    fn pop_back_drains_in_reverse() {
        let mut seq = DynamicArray::from([1u64, 2, 3]);
        assert_eq!(seq.pop_back(), Ok(3));
        assert_eq!(seq.pop_back(), Ok(2));
        assert_eq!(seq.pop_back(), Ok(1));
        assert_eq!(seq.pop_back(), Err(Error::Empty));
        assert!(seq.is_empty());
    }

    #[test]
    fn pop_front_drains_in_order() {
        let mut seq = DynamicArray::from(["a".to_string(), "b".to_string()]);
        assert_eq!(seq.pop_front().unwrap(), "a");
        assert_eq!(seq.pop_front().unwrap(), "b");
        assert_eq!(seq.pop_front(), Err(Error::Empty));
    }

    #[test]
    fn erase_middle() {
        let mut seq = DynamicArray::from([0u64, 1, 2]);
        assert_eq!(seq.erase(1), Ok(1));
        assert_eq!(seq.as_slice(), &[0, 2]);
    }

    #[test]
    fn erase_bounds() {
        let mut empty: DynamicArray<u64> = DynamicArray::new();
        assert_eq!(empty.erase(0), Err(Error::Empty));

        let mut seq = DynamicArray::from([1u64]);
        assert_eq!(seq.erase(1), Err(Error::OutOfBounds));
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn erase_range_closes_gap() {
        let mut seq = DynamicArray::from([0u64, 1, 2, 3, 4]);
        seq.erase_range(1, 4).unwrap();
        assert_eq!(seq.as_slice(), &[0, 4]);
    }

    #[test]
    fn erase_full_range_empties() {
        let mut seq = DynamicArray::from([1u64, 2, 3]);
        seq.erase_range(0, seq.len()).unwrap();
        assert!(seq.is_empty());
    }

    #[test]
    fn erase_zero_length_range_is_noop() {
        let mut seq = DynamicArray::from([1u64, 2, 3]);
        seq.erase_range(2, 2).unwrap();
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn erase_range_errors() {
        let mut empty: DynamicArray<u64> = DynamicArray::new();
        assert_eq!(empty.erase_range(0, 0), Err(Error::Empty));

        let mut seq = DynamicArray::from([1u64, 2, 3]);
        assert_eq!(seq.erase_range(2, 1), Err(Error::BadRange));
        assert_eq!(seq.erase_range(0, 4), Err(Error::BadRange));
        // Nothing was removed on either error.
        assert_eq!(seq.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn clone_is_independent() {
        let original = DynamicArray::from([1u64, 2, 3]);
        let mut copy = original.clone();

        copy.append(4);
        copy.erase(0).unwrap();

        assert_eq!(original.as_slice(), &[1, 2, 3]);
        assert_eq!(copy.as_slice(), &[2, 3, 4]);
    }

    #[test]
    fn take_leaves_source_empty() {
        let mut source = DynamicArray::from([1u64, 2, 3]);
        let taken = source.take();

        assert!(source.is_empty());
        assert_eq!(source.len(), 0);
        assert_eq!(taken.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn cursor_walks_both_directions() {
        let seq = DynamicArray::from([1u64, 2, 3]);
        let mut cur = seq.cursor_front();

        assert_eq!(cur.value(), Ok(&1));
        cur.move_next().unwrap();
        assert_eq!(cur.value(), Ok(&2));
        cur.advance(1).unwrap();
        assert_eq!(cur.value(), Ok(&3));
        cur.advance(-2).unwrap();
        assert_eq!(cur.value(), Ok(&1));
    }

    #[test]
    fn cursor_end_dereference_is_error() {
        let seq = DynamicArray::from([1u64]);
        let end = seq.cursor_at(seq.len());
        assert_eq!(end.value(), Err(Error::OutOfBounds));

        let mut end = end;
        assert_eq!(end.move_next(), Err(Error::OutOfBounds));
    }

    #[test]
    fn cursor_begin_decrement_is_error() {
        let seq = DynamicArray::from([1u64, 2]);
        let mut cur = seq.cursor_front();
        assert_eq!(cur.move_prev(), Err(Error::OutOfBounds));
    }

    #[test]
    fn cursor_equality_is_positional() {
        let seq = DynamicArray::from([1u64, 2, 3]);
        let mut a = seq.cursor_front();
        let b = seq.cursor_at(1);

        assert_ne!(a, b);
        a.move_next().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn begin_equals_end_when_empty() {
        let seq: DynamicArray<u64> = DynamicArray::new();
        assert_eq!(seq.cursor_front(), seq.cursor_at(seq.len()));
        assert!(seq.cursor_front().is_end());
    }

    #[test]
    fn cursor_mut_writes_through() {
        let mut seq = DynamicArray::from([1u64, 2, 3]);
        let mut cur = seq.cursor_at_mut(1);
        *cur.value_mut().unwrap() = 20;
        assert_eq!(seq.as_slice(), &[1, 20, 3]);
    }

    #[test]
    fn into_iter_owns_elements() {
        let seq = DynamicArray::from(["a".to_string(), "b".to_string(), "c".to_string()]);
        let values: Vec<String> = seq.into_iter().collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn into_iter_double_ended() {
        let seq = DynamicArray::from([1u64, 2, 3, 4]);
        let mut it = seq.into_iter();
        assert_eq!(it.next(), Some(1));
        assert_eq!(it.next_back(), Some(4));
        assert_eq!(it.next(), Some(2));
        assert_eq!(it.next_back(), Some(3));
        assert_eq!(it.next(), None);
    }

    #[test]
    fn partially_consumed_into_iter_drops_rest() {
        // String elements surface double-free or leak bugs under miri; here
        // we just make sure it does not panic.
        let seq = DynamicArray::from(["a".to_string(), "b".to_string(), "c".to_string()]);
        let mut it = seq.into_iter();
        let _ = it.next();
        drop(it);
    }

    #[test]
    fn zero_sized_elements() {
        let mut seq = DynamicArray::new();
        for _ in 0..5 {
            seq.append(());
        }
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.pop_back(), Ok(()));
        assert_eq!(seq.iter().count(), 4);
    }

    #[test]
    fn debug_and_eq() {
        let seq = DynamicArray::from([1u64, 2]);
        assert_eq!(format!("{:?}", seq), "[1, 2]");
        assert_eq!(seq, DynamicArray::from([1u64, 2]));
        assert_ne!(seq, DynamicArray::from([2u64, 1]));
    }
}
