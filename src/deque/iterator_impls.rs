use std::iter::FusedIterator;
use std::mem::MaybeUninit;

use super::*;

impl<'a, T: 'a> Iter<'a, T> {
    #[inline]
    unsafe fn element(&self, slot: usize) -> &'a T {
        let ring: &'a [MaybeUninit<T>] = self.ring;
        &*ring.get_unchecked(slot).as_ptr()
    }
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            ring: self.ring,
            head: self.head,
            len: self.len,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;
        self.head = wrap_add(self.head, 1, self.ring.len());
        self.len -= 1;
        unsafe { Some(self.element(head)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }

    #[inline]
    fn nth(&mut self, n: usize) -> Option<&'a T> {
        if n >= self.len {
            self.len = 0;
            return None;
        }
        self.head = wrap_add(self.head, n, self.ring.len());
        self.len -= n;
        self.next()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let slot = wrap_add(self.head, self.len, self.ring.len());
        unsafe { Some(self.element(slot)) }
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

// Like `&'a mut [T]`, the iterator is only as thread-safe as its elements.
unsafe impl<'a, T: Send> Send for IterMut<'a, T> {}
unsafe impl<'a, T: Sync> Sync for IterMut<'a, T> {}

impl<'a, T: 'a> IterMut<'a, T> {
    /// Each slot is handed out at most once, and only through the base
    /// pointer, so earlier references stay valid.
    #[inline]
    unsafe fn element(&mut self, slot: usize) -> &'a mut T {
        &mut *self.ring.add(slot)
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        let head = self.head;
        self.head = wrap_add(self.head, 1, self.cap);
        self.len -= 1;
        unsafe { Some(self.element(head)) }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'a, T> DoubleEndedIterator for IterMut<'a, T> {
    #[inline]
    fn next_back(&mut self) -> Option<&'a mut T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        let slot = wrap_add(self.head, self.len, self.cap);
        unsafe { Some(self.element(slot)) }
    }
}

impl<'a, T> ExactSizeIterator for IterMut<'a, T> {}

impl<'a, T> FusedIterator for IterMut<'a, T> {}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.inner.shift().ok()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.inner.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.inner.pop().ok()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
