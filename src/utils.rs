//! Masked ring arithmetic shared by the deque and its iterators.
//!
//! Every `capacity` handed to these helpers is a power of two, so wrapping is a
//! bitmask instead of a division.

#[inline]
pub fn wrap_add(index: usize, addend: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    debug_assert!(addend <= capacity);
    index.wrapping_add(addend) & (capacity - 1)
}

#[inline]
pub fn wrap_sub(index: usize, subtrahend: usize, capacity: usize) -> usize {
    debug_assert!(capacity.is_power_of_two());
    debug_assert!(subtrahend <= capacity);
    index.wrapping_sub(subtrahend) & (capacity - 1)
}

/// Smallest legal capacity with at least `slots` slots.
///
/// Panics with "capacity overflow" past the largest power of two.
#[inline]
pub fn capacity_for(slots: usize) -> usize {
    match slots.max(crate::MIN_CAPACITY).checked_next_power_of_two() {
        Some(capacity) => capacity,
        None => panic!("capacity overflow"),
    }
}

/// Normalizes a possibly negative index against `len`.
///
/// Negative values count from the end. `None` when the result falls outside
/// `[0, len)`.
#[inline]
pub fn normalize_index(index: isize, len: usize) -> Option<usize> {
    let index = if index < 0 {
        index.checked_add(len as isize)?
    } else {
        index
    };
    if index >= 0 && (index as usize) < len {
        Some(index as usize)
    } else {
        None
    }
}

/// Resolves slice arguments into an `(offset, length)` window inside `len`.
///
/// A negative `start` counts from the end, a negative `length` stops that far
/// from the end, `None` runs to the end. Anything past the end is clamped.
pub fn normalize_window(start: isize, length: Option<isize>, len: usize) -> (usize, usize) {
    let size = len as isize;
    if size == 0 || start >= size {
        return (0, 0);
    }
    let start = if start < 0 { (size + start).max(0) } else { start };
    let mut length = match length {
        None => size - start,
        Some(l) if l < 0 => (size + l - start).max(0),
        Some(l) => l,
    };
    if start.saturating_add(length) > size {
        length = (size - start).max(0);
    }
    (start as usize, length as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrapping() {
        assert_eq!(wrap_add(7, 1, 8), 0);
        assert_eq!(wrap_add(5, 8, 8), 5);
        assert_eq!(wrap_sub(0, 1, 8), 7);
        assert_eq!(wrap_sub(3, 3, 16), 0);
    }

    #[test]
    fn capacities() {
        assert_eq!(capacity_for(0), 8);
        assert_eq!(capacity_for(8), 8);
        assert_eq!(capacity_for(9), 16);
        assert_eq!(capacity_for(100), 128);
        assert_eq!(capacity_for(usize::MAX / 2 + 1), usize::MAX / 2 + 1);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn capacity_past_the_largest_power_of_two() {
        capacity_for(usize::MAX / 2 + 2);
    }

    #[test]
    fn index_normalization() {
        assert_eq!(normalize_index(0, 3), Some(0));
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(-3, 3), Some(0));
        assert_eq!(normalize_index(-4, 3), None);
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(0, 0), None);
        assert_eq!(normalize_index(isize::MIN, 3), None);
    }

    #[test]
    fn window_normalization() {
        assert_eq!(normalize_window(0, None, 5), (0, 5));
        assert_eq!(normalize_window(1, Some(2), 5), (1, 2));
        assert_eq!(normalize_window(-2, None, 5), (3, 2));
        assert_eq!(normalize_window(-9, Some(2), 5), (0, 2));
        assert_eq!(normalize_window(1, Some(-1), 5), (1, 3));
        assert_eq!(normalize_window(4, Some(-3), 5), (4, 0));
        assert_eq!(normalize_window(3, Some(10), 5), (3, 2));
        assert_eq!(normalize_window(5, Some(1), 5), (0, 0));
        assert_eq!(normalize_window(2, Some(0), 5), (2, 0));
        assert_eq!(normalize_window(0, None, 0), (0, 0));
        assert_eq!(normalize_window(0, Some(isize::MAX), 5), (0, 5));
    }
}
