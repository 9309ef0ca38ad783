use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter;
use std::ops::Index;
use std::ops::IndexMut;

use super::*;

impl<T: Clone> Clone for Deque<T> {
    /// The copy keeps the capacity and shares nothing with the original.
    fn clone(&self) -> Deque<T> {
        let mut cloned = Deque::with_capacity(self.cap());
        cloned.extend(self.iter().cloned());
        cloned
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        self.drop_elements();
    }
}

impl<T> Default for Deque<T> {
    #[inline]
    fn default() -> Deque<T> {
        Deque::new()
    }
}

impl<T: PartialEq> PartialEq for Deque<T> {
    fn eq(&self, other: &Deque<T>) -> bool {
        if self.len() != other.len() {
            return false;
        }
        let (sa, sb) = self.as_slices();
        let (oa, ob) = other.as_slices();
        if sa.len() == oa.len() {
            sa == oa && sb == ob
        } else if sa.len() < oa.len() {
            // Always divisible in three sections, for example:
            // self:  [a b c|d e f]
            // other: [0 1 2 3|4 5]
            // front = 3, mid = 1,
            // [a b c] == [0 1 2] && [d] == [3] && [e f] == [4 5]
            let front = sa.len();
            let mid = oa.len() - front;

            let (oa_front, oa_mid) = oa.split_at(front);
            let (sb_mid, sb_back) = sb.split_at(mid);
            debug_assert_eq!(sa.len(), oa_front.len());
            debug_assert_eq!(sb_mid.len(), oa_mid.len());
            debug_assert_eq!(sb_back.len(), ob.len());
            sa == oa_front && sb_mid == oa_mid && sb_back == ob
        } else {
            let front = oa.len();
            let mid = sa.len() - front;

            let (sa_front, sa_mid) = sa.split_at(front);
            let (ob_mid, ob_back) = ob.split_at(mid);
            debug_assert_eq!(sa_front.len(), oa.len());
            debug_assert_eq!(sa_mid.len(), ob_mid.len());
            debug_assert_eq!(sb.len(), ob_back.len());
            sa_front == oa && sa_mid == ob_mid && sb == ob_back
        }
    }
}

impl<T: Eq> Eq for Deque<T> {}

impl<T> Deque<T> {
    fn eq_slice<U>(&self, other: &[U]) -> bool
        where T: PartialEq<U>
    {
        if self.len() != other.len() {
            return false;
        }
        let (front, back) = self.as_slices();
        let (other_front, other_back) = other.split_at(front.len());
        front == other_front && back == other_back
    }
}

macro_rules! impl_slice_eq {
    ([$($vars:tt)*] $rhs:ty) => {
        impl<$($vars)* T, U> PartialEq<$rhs> for Deque<T>
            where T: PartialEq<U>
        {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                self.eq_slice(&other[..])
            }
        }
    }
}

impl_slice_eq! { [] Vec<U> }
impl_slice_eq! { [] [U] }
impl_slice_eq! { ['a,] &'a [U] }
impl_slice_eq! { [const N: usize,] [U; N] }

impl<T: PartialOrd> PartialOrd for Deque<T> {
    fn partial_cmp(&self, other: &Deque<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for Deque<T> {
    #[inline]
    fn cmp(&self, other: &Deque<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: Hash> Hash for Deque<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        let (a, b) = self.as_slices();
        Hash::hash_slice(a, state);
        Hash::hash_slice(b, state);
    }
}

impl<T> Index<usize> for Deque<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        let len = self.len();
        if index >= len {
            panic!("index out of bounds: the len is {} but the index is {}",
                   len,
                   index);
        }
        unsafe { self.slot(self.physical(index)) }
    }
}

impl<T> IndexMut<usize> for Deque<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        if index >= len {
            panic!("index out of bounds: the len is {} but the index is {}",
                   len,
                   index);
        }
        let slot = self.physical(index);
        unsafe { self.slot_mut(slot) }
    }
}

impl<T> iter::FromIterator<T> for Deque<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut deque = Deque::with_capacity(iter.size_hint().0.saturating_add(1));
        deque.extend(iter);
        deque
    }
}

impl<T> IntoIterator for Deque<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter { inner: self }
    }
}

impl<'a, T> IntoIterator for &'a Deque<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut Deque<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

/// Extend the `Deque` at the back, growing as needed.
impl<T> Extend<T> for Deque<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.push_all(iter);
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for Deque<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.push_all(iter.into_iter().cloned());
    }
}

impl<T: fmt::Debug> fmt::Debug for Deque<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self).finish()
    }
}
