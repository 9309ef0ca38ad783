//! A growable double-ended queue on a power-of-two ring buffer.
//!
//! This queue has `O(1)` amortized inserts and removals from both ends of the
//! container. It also has `O(1)` indexing like a vector, with negative indices
//! counting from the back. The contained elements are not required to be
//! copyable.
//!
//! On top of the queue operations it carries a family of whole-sequence
//! transformations: `map`, `filter`, `slice`, `merge`, `reverse`, `rotate`,
//! `sort`, `reduce`, `join`, `sum` and `apply`. The ones that take a callback
//! come in a `try_` flavour that hands the callback's own error back.
//!
//! # Feature Flags
//! The **ringdeque** crate has the following cargo feature flags:
//!
//! - `serde`
//!   - Optional
//!   - `Serialize` and `Deserialize` for `Deque<T>`, as a sequence.
//!
//! # Capacity
//!
//! The capacity is always a power of two and at least [`MIN_CAPACITY`]. It
//! doubles when an insertion would fill the last free slot and halves once
//! per removal that leaves no more than a quarter of it in use. Reallocations
//! are reported at `trace` level through the [`log`](https://docs.rs/log)
//! facade.
//!
//! # Examples
//! ```
//! use ringdeque::Deque;
//!
//! let mut deque = Deque::new();
//! assert_eq!(deque.capacity(), 8);
//! assert_eq!(deque.len(), 0);
//!
//! deque.push(1);
//! deque.push(2);
//! deque.unshift(0);
//! assert_eq!(deque.len(), 3);
//!
//! assert_eq!(deque.shift().ok(), Some(0));
//! assert_eq!(deque.pop().ok(), Some(2));
//! assert_eq!(deque.get(-1).ok(), Some(&1));
//! ```
//!
//! # Insert & Remove
//! ```
//! use ringdeque::Deque;
//!
//! let mut deque: Deque<_> = vec![11, 13].into();
//!
//! deque.insert(1, 12).unwrap();
//! deque.remove(0).unwrap();
//!
//! assert_eq!(deque[0], 12);
//! assert_eq!(deque[1], 13);
//! ```
//!
//! # Bulk operations
//! ```
//! use ringdeque::Deque;
//!
//! let deque: Deque<_> = (1..=6).collect();
//!
//! let odd = deque.filter_by(|x| x % 2 == 1);
//! assert_eq!(odd.join(", "), "1, 3, 5");
//!
//! let mut squares = deque.map(|x| x * x);
//! squares.rotate(-2);
//! assert_eq!(squares, [25, 36, 1, 4, 9, 16]);
//! squares.sort();
//! assert_eq!(squares.reduce(0, |acc, x| acc + x), 91);
//! ```
//!
//! # Dynamic values
//! ```
//! use ringdeque::{Deque, Number, Value};
//!
//! let deque: Deque<Value> = vec![Value::from(1), Value::from("2.5"), Value::Null].into();
//! assert_eq!(deque.sum().ok(), Some(Number::Float(3.5)));
//! assert!(!deque.isset(2, true));
//! assert_eq!(deque.filter().len(), 2);
//! ```

#![deny(missing_docs)]

pub mod error;
pub mod value;

mod deque;
mod utils;

pub use crate::deque::{Deque, IntoIter, Iter, IterMut, RangeArgument};
pub use crate::error::{BoxError, DequeError};
pub use crate::value::{Nullable, Number, ToNumber, Truthy, Value};

/// Smallest capacity a `Deque` ever has.
pub const MIN_CAPACITY: usize = 8;

/// `Result` specialized to [`DequeError`].
pub type Result<T> = std::result::Result<T, DequeError>;
