//! Errors returned by `Deque` operations.

use std::error::Error;

use thiserror::Error;

/// Boxed failure raised by a caller-supplied function.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Error values produced by `Deque` operations.
///
/// A failed operation never leaves the deque half-updated, with the single
/// exception of [`Deque::try_apply`](crate::Deque::try_apply).
#[derive(Debug, Error)]
pub enum DequeError {
    /// Removal or end access on a deque holding no elements.
    #[error("deque is empty")]
    Empty,

    /// The normalized index fell outside the valid range of the operation.
    #[error("index out of range: the len is {len} but the index is {index}")]
    IndexOutOfRange {
        /// The index as it was passed in, before normalization.
        index: isize,
        /// Number of elements at the time of the call.
        len: usize,
    },

    /// A numeric reduction met an element with no numeric value.
    #[error("type error: element at index {index} is not numeric")]
    NotNumeric {
        /// Logical index of the offending element.
        index: usize,
    },

    /// A caller-supplied function failed.
    #[error("callback failed: {0}")]
    Callback(#[source] BoxError),
}

impl DequeError {
    /// Wraps any error raised inside a callback.
    ///
    /// ```
    /// use ringdeque::{Deque, DequeError};
    ///
    /// let deque: Deque<&str> = vec!["1", "x"].into();
    /// let parsed = deque.try_map(|s| s.parse::<i32>().map_err(DequeError::callback));
    /// assert!(matches!(parsed, Err(DequeError::Callback(_))));
    /// ```
    pub fn callback<E>(error: E) -> Self
        where E: Into<BoxError>
    {
        DequeError::Callback(error.into())
    }

    pub(crate) fn out_of_range(index: isize, len: usize) -> Self {
        DequeError::IndexOutOfRange { index, len }
    }
}
