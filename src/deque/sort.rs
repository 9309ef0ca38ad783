//! Stable ordering computed over indices, so a comparator that fails part way
//! never leaves the elements half-sorted.

use std::cmp::Ordering;

/// Computes the stable sorted order of `len` elements.
///
/// `compare(a, b)` orders the elements at original positions `a` and `b`.
/// The result lists original positions in sorted order. Bottom-up merge sort,
/// so equal elements keep their relative order.
pub(super) fn stable_order<F, E>(len: usize, mut compare: F) -> Result<Vec<usize>, E>
    where F: FnMut(usize, usize) -> Result<Ordering, E>
{
    let mut order: Vec<usize> = (0..len).collect();
    let mut scratch = vec![0; len];
    let mut width = 1;
    while width < len {
        let mut start = 0;
        while start < len {
            let mid = usize::min(start + width, len);
            let end = usize::min(start + 2 * width, len);
            merge(&order[start..end], mid - start, &mut scratch[start..end], &mut compare)?;
            start = end;
        }
        std::mem::swap(&mut order, &mut scratch);
        width *= 2;
    }
    Ok(order)
}

fn merge<F, E>(run: &[usize], mid: usize, out: &mut [usize], compare: &mut F) -> Result<(), E>
    where F: FnMut(usize, usize) -> Result<Ordering, E>
{
    let (left, right) = run.split_at(mid);
    let (mut i, mut j) = (0, 0);
    for slot in out.iter_mut() {
        // take from the left run on ties
        let take_left = if i == left.len() {
            false
        } else if j == right.len() {
            true
        } else {
            compare(right[j], left[i])? != Ordering::Less
        };
        if take_left {
            *slot = left[i];
            i += 1;
        } else {
            *slot = right[j];
            j += 1;
        }
    }
    Ok(())
}

/// Reorders `items` so that `items[k]` becomes the former `items[order[k]]`.
///
/// Follows each cycle of the permutation with swaps.
pub(super) fn apply_permutation<T>(items: &mut [T], mut order: Vec<usize>) {
    debug_assert_eq!(items.len(), order.len());
    for start in 0..order.len() {
        let mut current = start;
        while order[current] != start {
            let next = order[current];
            items.swap(current, next);
            order[current] = current;
            current = next;
        }
        order[current] = current;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_of(keys: &[i32]) -> Vec<usize> {
        stable_order::<_, ()>(keys.len(), |a, b| Ok(keys[a].cmp(&keys[b]))).unwrap()
    }

    #[test]
    fn orders_and_keeps_ties() {
        assert_eq!(order_of(&[]), Vec::<usize>::new());
        assert_eq!(order_of(&[7]), [0]);
        assert_eq!(order_of(&[3, 1, 2]), [1, 2, 0]);
        assert_eq!(order_of(&[1, 0, 1, 0, 1]), [1, 3, 0, 2, 4]);
    }

    #[test]
    fn comparator_error_stops_the_sort() {
        let mut calls = 0;
        let result = stable_order(10, |a, b| {
            calls += 1;
            if calls == 5 { Err("boom") } else { Ok(a.cmp(&b)) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 5);
    }

    #[test]
    fn permutation_matches_std_sort() {
        let keys = [5, 3, 9, 3, 0, 8, 1, 1, 7, 2, 6, 4, 5];
        let mut items: Vec<_> = keys.iter().cloned().enumerate().collect();
        let order = order_of(&keys);
        apply_permutation(&mut items, order);

        let mut expected: Vec<_> = keys.iter().cloned().enumerate().collect();
        expected.sort_by_key(|&(_, k)| k);
        assert_eq!(items, expected);
    }
}
