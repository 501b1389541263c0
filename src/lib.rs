//! Two ordered, mutable sequence containers with one interface.
//!
//! This crate provides a contiguous growable array and a sentinel-based
//! doubly linked sequence behind a uniform surface: size queries,
//! append/prepend, positional insert and erase, pop from either end, and
//! bidirectional, bounds-checked traversal. Client code picks a container
//! with a one-line type alias and keeps the same call sites.
//!
//! # Containers
//!
//! | Container | Storage | append | prepend | insert/erase at position |
//! |-----------|---------|--------|---------|---------------------------|
//! | [`DynamicArray`] | one contiguous buffer, 1.5x growth | amortized O(1) | O(n) | O(n), shifts the tail |
//! | [`LinkedSequence`] | arena slots + sentinel node | O(1) | O(1) | O(1) splice |
//!
//! The array hands out plain index positions; the linked sequence hands
//! out stable [`Handle`]s into its node arena. Erasing a linked node
//! never disturbs handles to other nodes, while any growing insert into
//! the array invalidates every outstanding index.
//!
//! # Quick start
//!
//! ```
//! use linear_seq::DynamicArray;
//!
//! let mut seq = DynamicArray::new();
//! seq.append(1u64);
//! seq.append(2);
//! seq.prepend(0);
//!
//! assert_eq!(seq.len(), 3);
//! assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![0, 1, 2]);
//! assert_eq!(seq.pop_back(), Ok(2));
//! ```
//!
//! Swapping in the linked container changes nothing at the call site:
//!
//! ```
//! use linear_seq::LinkedSequence;
//!
//! type LinearSequence<T> = LinkedSequence<T>;
//!
//! let mut seq: LinearSequence<u64> = LinearSequence::new();
//! seq.append(1);
//! seq.prepend(0);
//! assert_eq!(seq.pop_front(), Ok(0));
//! ```
//!
//! # Cursors
//!
//! Both containers expose read-only and mutable cursors: a position plus
//! a back-reference to the owning container. Dereference, increment,
//! decrement, and offset arithmetic are all checked against the
//! container's boundaries and return [`Error::OutOfBounds`] instead of
//! reading past the end:
//!
//! ```
//! use linear_seq::{Error, LinkedSequence};
//!
//! let seq = LinkedSequence::from(["a", "b", "c"]);
//! let mut cur = seq.cursor_front();
//!
//! cur.advance(2)?;
//! assert_eq!(cur.value(), Ok(&"c"));
//! cur.move_next()?; // now one past the end
//! assert_eq!(cur.value(), Err(Error::OutOfBounds));
//! # Ok::<(), linear_seq::Error>(())
//! ```
//!
//! # Errors
//!
//! Fallible operations report one of three contract violations through
//! [`Error`]: `Empty` (pop or erase on a zero-element container),
//! `BadRange` (an erase range whose end is not forward-reachable from its
//! start), and `OutOfBounds` (cursor or index past a boundary). The
//! container never partially mutates before returning an error.
//!
//! # Ownership and invalidation
//!
//! Containers own their storage exclusively. `clone` deep-copies
//! (mutating the copy never touches the original); `take` transfers the
//! contents and leaves the source valid and empty. Cursors and detached
//! positions are non-owning: a position obtained before a structural
//! mutation (buffer growth for the array, node erasure for the list)
//! must be re-obtained afterwards. The borrow checker rules out holding
//! a live cursor borrow across a mutation; staleness of *detached*
//! index/handle positions remains the caller's obligation.
//!
//! This crate is single-threaded by design: no operation blocks, and no
//! synchronization is provided. Containers are `Send`/`Sync` exactly
//! when their element type is.

#![warn(missing_docs)]

mod arena;
pub mod array;
pub mod error;
pub mod list;

pub use array::DynamicArray;
pub use error::Error;
pub use list::{Handle, LinkedSequence};
