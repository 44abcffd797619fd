//! The error type shared by every collection in the crate.
//!
//! Failures are detected before anything is mutated, so an `Err` always leaves the
//! collection exactly as it was.

/// Errors reported by the collections in this crate.
///
/// Lookups that are expected to miss (searches, predicate boundaries, `get`-style
/// accessors) return `Option` instead; only accessors that promise a result report an
/// `Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum Error {
    /// A positional argument was outside `0..len` (or `0..=len` for insertion).
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// The length of the collection at the time of the call.
        len: usize,
    },

    /// A [`NodeId`](crate::NodeId) no longer names a live node of this collection.
    #[error("node id does not refer to a live node of this collection")]
    InvalidNode,

    /// Two items passed to a distinct-key `initialize` compare equal.
    ///
    /// `index` is the position, in sorted order, of the second of the two equal items.
    #[error("duplicate key at sorted position {index}; keys must be unique")]
    DuplicateKey {
        /// Sorted position of the offending item.
        index: usize,
    },

    /// The requested key is not present.
    #[error("the specified key was not found")]
    KeyNotFound,

    /// The collection is empty.
    #[error("the collection is empty")]
    Empty,
}

/// `Result` specialized to this crate's [`Error`].
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_offending_values() {
        assert_eq!(
            Error::IndexOutOfRange {
                index: 4,
                len: 3
            }
            .to_string(),
            "index 4 is out of range for length 3"
        );
        assert_eq!(
            Error::DuplicateKey {
                index: 2
            }
            .to_string(),
            "duplicate key at sorted position 2; keys must be unique"
        );
        assert_eq!(Error::Empty.to_string(), "the collection is empty");
    }

    #[test]
    fn implements_core_error() {
        fn assert_error<E: core::error::Error>() {}
        assert_error::<Error>();
    }
}
