use std::cmp;
use std::mem::MaybeUninit;
use std::ops::Range;
use std::ptr;
use std::slice;

use log::trace;

use super::Deque;
use crate::utils::*;
use crate::MIN_CAPACITY;

impl<T> Deque<T> {
    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub(crate) fn wrap_add(&self, index: usize, addend: usize) -> usize {
        wrap_add(index, addend, self.cap())
    }

    #[inline]
    pub(crate) fn wrap_sub(&self, index: usize, subtrahend: usize) -> usize {
        wrap_sub(index, subtrahend, self.cap())
    }

    /// Physical slot of the element at logical position `index`.
    #[inline]
    pub(crate) fn physical(&self, index: usize) -> usize {
        self.wrap_add(self.head, index)
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *const T {
        self.buf.as_ptr() as *const T
    }

    #[inline]
    pub(crate) fn ptr_mut(&mut self) -> *mut T {
        self.buf.as_mut_ptr() as *mut T
    }

    #[inline]
    pub(crate) fn is_contiguous(&self) -> bool {
        self.head + self.len <= self.cap()
    }

    /// Physical ranges holding the live elements, front part first.
    #[inline]
    pub(crate) fn slot_ranges(&self) -> (Range<usize>, Range<usize>) {
        let front_end = cmp::min(self.head + self.len, self.cap());
        let back_len = self.len - (front_end - self.head);
        (self.head..front_end, 0..back_len)
    }

    #[inline]
    pub(crate) fn debug_check(&self) {
        debug_assert!(self.cap().is_power_of_two());
        debug_assert!(self.len < self.cap());
        debug_assert!(self.head < self.cap());
        debug_assert_eq!(self.tail, self.wrap_add(self.head, self.len));
    }

    #[inline]
    pub(crate) unsafe fn buffer_read(&mut self, offset: usize) -> T {
        ptr::read(self.ptr().add(offset))
    }

    #[inline]
    pub(crate) unsafe fn buffer_write(&mut self, offset: usize, element: T) {
        ptr::write(self.ptr_mut().add(offset), element);
    }

    #[inline]
    pub(crate) unsafe fn slot(&self, offset: usize) -> &T {
        &*self.ptr().add(offset)
    }

    #[inline]
    pub(crate) unsafe fn slot_mut(&mut self, offset: usize) -> &mut T {
        &mut *self.ptr_mut().add(offset)
    }

    #[inline]
    pub(crate) unsafe fn buffer_as_slice(&self, range: Range<usize>) -> &[T] {
        slice::from_raw_parts(self.ptr().add(range.start), range.len())
    }

    /// Copies a contiguous block of memory len long from src to dst
    #[inline]
    pub(crate) unsafe fn copy(&mut self, dst: usize, src: usize, len: usize) {
        debug_assert!(dst + len <= self.cap(),
                      "cpy dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      self.cap());
        debug_assert!(src + len <= self.cap(),
                      "cpy dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      self.cap());
        let base = self.ptr_mut();
        ptr::copy(base.add(src), base.add(dst), len);
    }

    /// Copies a potentially wrapping block of memory len long from src to dest.
    /// (abs(dst - src) + len) must be no larger than cap() (There must be at
    /// most one continuous overlapping region between src and dest).
    pub(crate) unsafe fn wrap_copy(&mut self, dst: usize, src: usize, len: usize) {
        #[allow(dead_code)]
        fn diff(a: usize, b: usize) -> usize {
            if a <= b { b - a } else { a - b }
        }
        let cap = self.cap();
        debug_assert!(cmp::min(diff(dst, src), cap - diff(dst, src)) + len <= cap,
                      "wrc dst={} src={} len={} cap={}",
                      dst,
                      src,
                      len,
                      cap);

        if src == dst || len == 0 {
            return;
        }

        let dst_after_src = self.wrap_sub(dst, src) < len;

        let src_pre_wrap_len = cap - src;
        let dst_pre_wrap_len = cap - dst;
        let src_wraps = src_pre_wrap_len < len;
        let dst_wraps = dst_pre_wrap_len < len;

        match (dst_after_src, src_wraps, dst_wraps) {
            (_, false, false) => {
                // src doesn't wrap, dst doesn't wrap
                //
                //        S . . .
                // 1 [_ _ A A B B C C _]
                // 2 [_ _ A A A A B B _]
                //            D . . .
                //
                self.copy(dst, src, len);
            }
            (false, false, true) => {
                // dst before src, src doesn't wrap, dst wraps
                //
                //    S . . .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A B B _ _ _ A A]
                // 3 [B B B B _ _ _ A A]
                //    . .           D .
                //
                self.copy(dst, src, dst_pre_wrap_len);
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
            }
            (true, false, true) => {
                // src before dst, src doesn't wrap, dst wraps
                //
                //              S . . .
                // 1 [C C _ _ _ A A B B]
                // 2 [B B _ _ _ A A B B]
                // 3 [B B _ _ _ A A A A]
                //    . .           D .
                //
                self.copy(0, src + dst_pre_wrap_len, len - dst_pre_wrap_len);
                self.copy(dst, src, dst_pre_wrap_len);
            }
            (false, true, false) => {
                // dst before src, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [C C _ _ _ A A B B]
                // 2 [C C _ _ _ B B B B]
                // 3 [C C _ _ _ B B C C]
                //              D . . .
                //
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
            }
            (true, true, false) => {
                // src before dst, src wraps, dst doesn't wrap
                //
                //    . .           S .
                // 1 [A A B B _ _ _ C C]
                // 2 [A A A A _ _ _ C C]
                // 3 [C C A A _ _ _ C C]
                //    D . . .
                //
                self.copy(dst + src_pre_wrap_len, 0, len - src_pre_wrap_len);
                self.copy(dst, src, src_pre_wrap_len);
            }
            (false, true, true) => {
                // dst before src, src wraps, dst wraps
                //
                //    . . .         S .
                // 1 [A B C D _ E F G H]
                // 2 [A B C D _ E G H H]
                // 3 [A B C D _ E G H A]
                // 4 [B C C D _ E G H A]
                //    . .         D . .
                //
                debug_assert!(dst_pre_wrap_len > src_pre_wrap_len);
                let delta = dst_pre_wrap_len - src_pre_wrap_len;
                self.copy(dst, src, src_pre_wrap_len);
                self.copy(dst + src_pre_wrap_len, 0, delta);
                self.copy(0, delta, len - dst_pre_wrap_len);
            }
            (true, true, true) => {
                // src before dst, src wraps, dst wraps
                //
                //    . .         S . .
                // 1 [A B C D _ E F G H]
                // 2 [A A B D _ E F G H]
                // 3 [H A B D _ E F G H]
                // 4 [H A B D _ E F F G]
                //    . . .         D .
                //
                debug_assert!(src_pre_wrap_len > dst_pre_wrap_len);
                let delta = src_pre_wrap_len - dst_pre_wrap_len;
                self.copy(delta, 0, len - src_pre_wrap_len);
                self.copy(0, cap - delta, delta);
                self.copy(dst, src, dst_pre_wrap_len);
            }
        }
    }

    /// Moves the logical window `[start, start + count)` into linear memory at
    /// `dst`. The moved slots are left logically uninitialized.
    pub(crate) unsafe fn copy_window_to(&self, start: usize, count: usize, dst: *mut T) {
        debug_assert!(start + count <= self.len);
        let src = self.physical(start);
        let first = cmp::min(count, self.cap() - src);
        ptr::copy_nonoverlapping(self.ptr().add(src), dst, first);
        ptr::copy_nonoverlapping(self.ptr(), dst.add(first), count - first);
    }

    /// Uninitialized slot array of `capacity` slots.
    pub(crate) fn allocate_slots(capacity: usize) -> Box<[MaybeUninit<T>]> {
        debug_assert!(capacity.is_power_of_two());
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, MaybeUninit::uninit);
        slots.into_boxed_slice()
    }

    /// Moves every element into a fresh buffer of `capacity` slots, front at
    /// slot 0.
    pub(crate) fn reallocate(&mut self, capacity: usize) {
        debug_assert!(capacity.is_power_of_two());
        debug_assert!(capacity > self.len && capacity >= MIN_CAPACITY);
        trace!("deque reallocating: len={} capacity {} -> {}", self.len, self.cap(), capacity);

        let mut buf = Self::allocate_slots(capacity);
        unsafe {
            self.copy_window_to(0, self.len, buf.as_mut_ptr() as *mut T);
        }
        // The old slots are `MaybeUninit`, dropping them releases only memory.
        self.buf = buf;
        self.head = 0;
        self.tail = self.len & (capacity - 1);
        self.debug_check();
    }

    /// Grows the buffer, doubling, until `additional` more elements fit
    /// without filling it. A ring never holds `capacity` elements.
    pub(crate) fn grow_for(&mut self, additional: usize) {
        let required = match self.len.checked_add(additional) {
            Some(required) => required,
            None => panic!("capacity overflow"),
        };
        if required < self.cap() {
            return;
        }
        let mut capacity = cmp::max(self.cap(), MIN_CAPACITY);
        while capacity <= required {
            capacity = match capacity.checked_mul(2) {
                Some(capacity) => capacity,
                None => panic!("capacity overflow"),
            };
        }
        self.reallocate(capacity);
    }

    /// Halves the buffer once if at most a quarter of it is in use.
    pub(crate) fn shrink_if_sparse(&mut self) {
        let capacity = self.cap();
        if capacity > MIN_CAPACITY && self.len <= capacity / 4 {
            self.reallocate(capacity / 2);
        }
    }

    /// Drops every live element and empties the ring, keeping the buffer.
    pub(crate) fn drop_elements(&mut self) {
        let (front, back) = self.slot_ranges();
        let base = self.ptr_mut();
        // Reset first so a panicking destructor leaks instead of double dropping.
        self.head = 0;
        self.tail = 0;
        self.len = 0;
        unsafe {
            let front = ptr::slice_from_raw_parts_mut(base.add(front.start), front.len());
            let back = ptr::slice_from_raw_parts_mut(base, back.len());
            ptr::drop_in_place(front);
            ptr::drop_in_place(back);
        }
    }
}
