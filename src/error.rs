//! Error types for sequence operations.

use core::fmt;

/// Error returned by fallible sequence and cursor operations.
///
/// All three variants signal contract violations by the caller, not
/// transient conditions. The container never mutates before returning
/// an error; pop and erase are all-or-nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A pop or erase was attempted on a container with zero elements.
    Empty,
    /// An erase range's end is not forward-reachable from its start
    /// within the container's bounds.
    BadRange,
    /// A cursor was dereferenced or advanced past `end`, moved back
    /// past `begin`, or a positional index exceeded the container bound.
    OutOfBounds,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "container is empty"),
            Error::BadRange => write!(f, "range end is not reachable from range start"),
            Error::OutOfBounds => write!(f, "position is out of bounds"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(Error::Empty.to_string(), "container is empty");
        assert_eq!(
            Error::BadRange.to_string(),
            "range end is not reachable from range start"
        );
        assert_eq!(Error::OutOfBounds.to_string(), "position is out of bounds");
    }

    #[test]
    fn variants_are_distinguishable() {
        assert_ne!(Error::Empty, Error::BadRange);
        assert_ne!(Error::Empty, Error::OutOfBounds);
        assert_ne!(Error::BadRange, Error::OutOfBounds);
    }
}
