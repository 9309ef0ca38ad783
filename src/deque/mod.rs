use std::iter;
use std::marker::PhantomData;
use std::mem::{self, ManuallyDrop, MaybeUninit};

pub use odds::IndexRange as RangeArgument;

use crate::error::DequeError;
use crate::utils::*;
use crate::value::Nullable;
use crate::{Result, MIN_CAPACITY};

mod bulk;
mod internal;
mod iterator_impls;
#[cfg(feature = "serde")]
mod serde_impls;
mod sort;
mod trait_impls;

/// A growable double-ended queue backed by a power-of-two ring buffer.
///
/// The "default" usage of this type as a queue is to use `push` to add to
/// the queue, and `shift` to remove from the queue. `extend` and `push_all`
/// push onto the back in this manner, and iterating over `Deque` goes front
/// to back.
///
/// # Capacity
///
/// The capacity is always a power of two and never below [`MIN_CAPACITY`].
/// It doubles when an insertion would fill every slot, so one slot is always
/// free, and halves once per removal that leaves at most a quarter in use.
///
/// [`MIN_CAPACITY`]: crate::MIN_CAPACITY
pub struct Deque<T> {
    buf: Box<[MaybeUninit<T>]>,
    head: usize,
    tail: usize,
    len: usize,
}

/// `Deque` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    ring: &'a [MaybeUninit<T>],
    head: usize,
    len: usize,
}

/// `Deque` mutable iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IterMut<'a, T: 'a> {
    ring: *mut T,
    cap: usize,
    head: usize,
    len: usize,
    marker: PhantomData<&'a mut T>,
}

/// A by-value `Deque` iterator
#[must_use = "iterator adaptors are lazy and do nothing unless consumed"]
pub struct IntoIter<T> {
    inner: Deque<T>,
}

impl<T> Deque<T> {
    /// Creates an empty `Deque` with the minimum capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::new();
    /// assert_eq!(deque.capacity(), 8);
    /// ```
    #[inline]
    pub fn new() -> Deque<T> {
        Deque::with_capacity(MIN_CAPACITY)
    }

    /// Creates an empty `Deque` with a buffer of at least `capacity` slots.
    ///
    /// One slot always stays free, so `capacity - 1` elements fit before the
    /// first reallocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<u32> = Deque::with_capacity(20);
    /// assert_eq!(deque.capacity(), 32);
    /// ```
    pub fn with_capacity(capacity: usize) -> Deque<T> {
        Deque {
            buf: Self::allocate_slots(capacity_for(capacity)),
            head: 0,
            tail: 0,
            len: 0,
        }
    }

    /// Ensures a buffer of at least `capacity` slots.
    ///
    /// The capacity is rounded up to a power of two. Never shrinks.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = (0..3).collect();
    /// deque.allocate(100);
    /// assert_eq!(deque.capacity(), 128);
    /// deque.allocate(10);
    /// assert_eq!(deque.capacity(), 128);
    /// ```
    pub fn allocate(&mut self, capacity: usize) {
        if capacity > self.cap() {
            self.reallocate(capacity_for(capacity));
        }
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap()
    }

    /// Returns the number of elements in the `Deque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut v = Deque::new();
    /// assert_eq!(v.len(), 0);
    /// v.push(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the buffer contains no elements
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a front-to-back iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push(5);
    /// deque.push(3);
    /// deque.unshift(4);
    /// let c: Vec<&i32> = deque.iter().collect();
    /// assert_eq!(c, [&4, &5, &3]);
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<T> {
        Iter {
            ring: &self.buf,
            head: self.head,
            len: self.len,
        }
    }

    /// Returns a front-to-back iterator that returns mutable references.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![5, 3, 4].into();
    /// for num in deque.iter_mut() {
    ///     *num = *num - 2;
    /// }
    /// assert_eq!(deque, [3, 1, 2]);
    /// ```
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<T> {
        IterMut {
            ring: self.ptr_mut(),
            cap: self.cap(),
            head: self.head,
            len: self.len,
            marker: PhantomData,
        }
    }

    /// Returns a pair of slices which contain, in order, the contents of the
    /// `Deque`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    ///
    /// deque.push(0);
    /// deque.push(1);
    /// deque.push(2);
    ///
    /// assert_eq!(deque.as_slices(), (&[0, 1, 2][..], &[][..]));
    ///
    /// deque.unshift(10);
    /// deque.unshift(9);
    ///
    /// assert_eq!(deque.as_slices(), (&[9, 10][..], &[0, 1, 2][..]));
    /// ```
    #[inline]
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let (front, back) = self.slot_ranges();
        unsafe { (self.buffer_as_slice(front), self.buffer_as_slice(back)) }
    }

    /// Returns a pair of mutable slices which contain, in order, the contents
    /// of the `Deque`.
    pub fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let (front, back) = self.slot_ranges();
        let (left, right) = self.buf.split_at_mut(front.start);
        let front = &mut right[..front.len()];
        let back = &mut left[..back.len()];
        unsafe {
            (&mut *(front as *mut [MaybeUninit<T>] as *mut [T]),
             &mut *(back as *mut [MaybeUninit<T>] as *mut [T]))
        }
    }

    /// Rearranges the storage so the elements form one slice, and returns it.
    ///
    /// The logical order is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![2, 3].into();
    /// deque.unshift(1);
    /// assert_eq!(deque.make_contiguous(), &[1, 2, 3]);
    /// assert_eq!(deque.as_slices(), (&[1, 2, 3][..], &[][..]));
    /// ```
    pub fn make_contiguous(&mut self) -> &mut [T] {
        if !self.is_contiguous() {
            self.buf.rotate_left(self.head);
            self.head = 0;
            self.tail = self.wrap_add(0, self.len);
        }
        self.as_mut_slices().0
    }

    /// Pushes an element onto the back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push(1);
    /// deque.push(3);
    /// assert_eq!(deque.last().ok(), Some(&3));
    /// ```
    pub fn push(&mut self, element: T) {
        self.grow_for(1);
        unsafe {
            let tail = self.tail;
            self.buffer_write(tail, element);
        }
        self.tail = self.wrap_add(self.tail, 1);
        self.len += 1;
    }

    /// Pushes an element onto the front.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.unshift(1);
    /// deque.unshift(2);
    /// assert_eq!(deque.first().ok(), Some(&2));
    /// ```
    pub fn unshift(&mut self, element: T) {
        self.grow_for(1);
        let head = self.wrap_sub(self.head, 1);
        unsafe {
            self.buffer_write(head, element);
        }
        self.head = head;
        self.len += 1;
    }

    /// Pushes every value onto the back, in order.
    pub fn push_all<I>(&mut self, values: I)
        where I: IntoIterator<Item = T>
    {
        let values = values.into_iter();
        self.grow_for(values.size_hint().0);
        for value in values {
            self.push(value);
        }
    }

    /// Pushes every value onto the front, keeping their order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![4, 5].into();
    /// deque.unshift_all(vec![1, 2, 3]);
    /// assert_eq!(deque, [1, 2, 3, 4, 5]);
    /// ```
    pub fn unshift_all<I>(&mut self, values: I)
        where I: IntoIterator<Item = T>
    {
        let values: Vec<T> = values.into_iter().collect();
        self.grow_for(values.len());
        for value in values.into_iter().rev() {
            self.unshift(value);
        }
    }

    /// Removes and returns the last element.
    ///
    /// # Errors
    ///
    /// [`DequeError::Empty`] if there is nothing to remove.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, DequeError};
    ///
    /// let mut deque = Deque::new();
    /// deque.push(1);
    /// deque.push(3);
    /// assert_eq!(deque.pop().ok(), Some(3));
    /// assert_eq!(deque.pop().ok(), Some(1));
    /// assert!(matches!(deque.pop(), Err(DequeError::Empty)));
    /// ```
    pub fn pop(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        self.tail = self.wrap_sub(self.tail, 1);
        self.len -= 1;
        let element = unsafe {
            let tail = self.tail;
            self.buffer_read(tail)
        };
        self.shrink_if_sparse();
        Ok(element)
    }

    /// Removes and returns the first element.
    ///
    /// # Errors
    ///
    /// [`DequeError::Empty`] if there is nothing to remove.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque = Deque::new();
    /// deque.push(1);
    /// deque.push(2);
    ///
    /// assert_eq!(deque.shift().ok(), Some(1));
    /// assert_eq!(deque.shift().ok(), Some(2));
    /// assert!(deque.shift().is_err());
    /// ```
    pub fn shift(&mut self) -> Result<T> {
        if self.is_empty() {
            return Err(DequeError::Empty);
        }
        let head = self.head;
        let element = unsafe { self.buffer_read(head) };
        self.head = self.wrap_add(head, 1);
        self.len -= 1;
        self.shrink_if_sparse();
        Ok(element)
    }

    /// Retrieves an element by index.
    ///
    /// Element at index 0 is the front of the queue; negative indices count
    /// from the back, `-1` being the last element.
    ///
    /// # Errors
    ///
    /// [`DequeError::IndexOutOfRange`] unless the normalized index lies in
    /// `[0, len)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![3, 4, 5].into();
    /// assert_eq!(deque.get(1).ok(), Some(&4));
    /// assert_eq!(deque.get(-1).ok(), Some(&5));
    /// assert!(deque.get(3).is_err());
    /// ```
    pub fn get(&self, index: isize) -> Result<&T> {
        match normalize_index(index, self.len) {
            Some(i) => unsafe { Ok(self.slot(self.physical(i))) },
            None => Err(DequeError::out_of_range(index, self.len)),
        }
    }

    /// Retrieves an element mutably by index, see [`get`](Deque::get).
    pub fn get_mut(&mut self, index: isize) -> Result<&mut T> {
        match normalize_index(index, self.len) {
            Some(i) => {
                let slot = self.physical(i);
                unsafe { Ok(self.slot_mut(slot)) }
            }
            None => Err(DequeError::out_of_range(index, self.len)),
        }
    }

    /// Replaces the element at `index`, dropping the previous one.
    ///
    /// Indices are interpreted as in [`get`](Deque::get).
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec!["a", "b"].into();
    /// deque.set(-1, "z").unwrap();
    /// assert_eq!(deque, ["a", "z"]);
    /// assert!(deque.set(2, "c").is_err());
    /// ```
    pub fn set(&mut self, index: isize, element: T) -> Result<()> {
        *self.get_mut(index)? = element;
        Ok(())
    }

    /// Provides a reference to the front element.
    ///
    /// # Errors
    ///
    /// [`DequeError::Empty`] on an empty deque.
    pub fn first(&self) -> Result<&T> {
        self.get(0).map_err(|_| DequeError::Empty)
    }

    /// Provides a mutable reference to the front element.
    pub fn first_mut(&mut self) -> Result<&mut T> {
        self.get_mut(0).map_err(|_| DequeError::Empty)
    }

    /// Provides a reference to the back element.
    ///
    /// # Errors
    ///
    /// [`DequeError::Empty`] on an empty deque.
    pub fn last(&self) -> Result<&T> {
        self.get(-1).map_err(|_| DequeError::Empty)
    }

    /// Provides a mutable reference to the back element.
    pub fn last_mut(&mut self) -> Result<&mut T> {
        self.get_mut(-1).map_err(|_| DequeError::Empty)
    }

    /// Inserts `element` before logical position `index`.
    ///
    /// `index == len()` appends. Whichever end is closer to the insertion
    /// point is moved to make room.
    ///
    /// # Errors
    ///
    /// [`DequeError::IndexOutOfRange`] if `index > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![11, 13].into();
    /// deque.insert(1, 12).unwrap();
    /// assert_eq!(deque, [11, 12, 13]);
    /// ```
    pub fn insert(&mut self, index: usize, element: T) -> Result<()> {
        self.insert_all(index, iter::once(element))
    }

    /// Inserts every value before logical position `index`, keeping their
    /// order.
    ///
    /// At most `min(index, len - index)` existing elements are moved.
    ///
    /// # Errors
    ///
    /// [`DequeError::IndexOutOfRange`] if `index > len()`. The deque is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 5].into();
    /// deque.insert_all(1, vec![2, 3, 4]).unwrap();
    /// assert_eq!(deque, [1, 2, 3, 4, 5]);
    /// ```
    pub fn insert_all<I>(&mut self, index: usize, values: I) -> Result<()>
        where I: IntoIterator<Item = T>
    {
        if index > self.len {
            return Err(DequeError::out_of_range(index as isize, self.len));
        }
        let values: Vec<T> = values.into_iter().collect();
        let count = values.len();
        if count == 0 {
            return Ok(());
        }
        self.grow_for(count);

        // Move the least number of elements in the ring buffer to open a gap
        // of `count` slots at `index`.
        //
        //  closer to head:  H . . I . . . . . T      H . . I . . . . . T
        //                [o o A o o o o o . . .]  [o A . . o o o o o . . .]
        //
        //  closer to tail:  H . . . . . I . . T      H . . . . . I . . T
        //                [o o o o o o A o . . .]  [o o o o o o . . A o .]
        let len = self.len;
        unsafe {
            if index <= len - index {
                let head = self.head;
                let new_head = self.wrap_sub(head, count);
                self.wrap_copy(new_head, head, index);
                self.head = new_head;
            } else {
                let src = self.physical(index);
                let dst = self.wrap_add(src, count);
                self.wrap_copy(dst, src, len - index);
                self.tail = self.wrap_add(self.tail, count);
            }
            self.len += count;
            for (offset, value) in values.into_iter().enumerate() {
                let slot = self.physical(index + offset);
                self.buffer_write(slot, value);
            }
        }
        self.debug_check();
        Ok(())
    }

    /// Removes and returns the element at `index`.
    ///
    /// Whichever end is closer to the removal point will be moved to close
    /// the gap.
    ///
    /// # Errors
    ///
    /// [`DequeError::IndexOutOfRange`] if `index >= len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3].into();
    /// assert_eq!(deque.remove(1).ok(), Some(2));
    /// assert_eq!(deque, [1, 3]);
    /// ```
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(DequeError::out_of_range(index as isize, self.len));
        }
        let idx = self.physical(index);
        let element = unsafe { self.buffer_read(idx) };

        let after = self.len - index - 1;
        unsafe {
            if index <= after {
                let head = self.head;
                let new_head = self.wrap_add(head, 1);
                self.wrap_copy(new_head, head, index);
                self.head = new_head;
            } else {
                let src = self.wrap_add(idx, 1);
                self.wrap_copy(idx, src, after);
                self.tail = self.wrap_sub(self.tail, 1);
            }
        }
        self.len -= 1;
        self.shrink_if_sparse();
        self.debug_check();
        Ok(element)
    }

    /// Removes the elements in `range` and returns them by value.
    ///
    /// The removal happens eagerly: the gap is closed from whichever side is
    /// shorter before the iterator is handed out.
    ///
    /// # Panics
    ///
    /// Panics if the starting point is greater than the end point or if
    /// the end point is greater than the length of the deque.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3].into();
    /// let drained: Vec<_> = deque.drain(2..).collect();
    /// assert_eq!(drained, [3]);
    ///
    /// // A full range clears all contents
    /// let drained: Vec<_> = deque.drain(..).collect();
    /// assert_eq!(drained, [1, 2]);
    /// assert!(deque.is_empty());
    /// ```
    pub fn drain<R>(&mut self, range: R) -> IntoIter<T>
        where R: RangeArgument<usize>
    {
        let len = self.len;
        let start = range.start().unwrap_or(0);
        let end = range.end().unwrap_or(len);
        assert!(start <= end, "drain lower bound was too large");
        assert!(end <= len, "drain upper bound was too large");

        let count = end - start;
        let mut drained = Deque::with_capacity(count + 1);
        unsafe {
            self.copy_window_to(start, count, drained.ptr_mut());
            drained.len = count;
            drained.tail = drained.wrap_add(0, count);

            let after = len - end;
            if start <= after {
                let head = self.head;
                let new_head = self.wrap_add(head, count);
                self.wrap_copy(new_head, head, start);
                self.head = new_head;
            } else {
                let dst = self.physical(start);
                let src = self.physical(end);
                self.wrap_copy(dst, src, after);
                self.tail = self.wrap_sub(self.tail, count);
            }
        }
        self.len -= count;
        self.shrink_if_sparse();
        self.debug_check();
        drained.into_iter()
    }

    /// Removes every element and returns the buffer to the minimum capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut v: Deque<_> = (0..100).collect();
    /// v.clear();
    /// assert!(v.is_empty());
    /// assert_eq!(v.capacity(), 8);
    /// ```
    pub fn clear(&mut self) {
        self.drop_elements();
        if self.cap() != MIN_CAPACITY {
            self.buf = Self::allocate_slots(MIN_CAPACITY);
        }
    }

    /// Copies the elements, front to back, into a `Vec`.
    pub fn to_vec(&self) -> Vec<T>
        where T: Clone
    {
        let mut out = Vec::with_capacity(self.len);
        let (front, back) = self.as_slices();
        out.extend_from_slice(front);
        out.extend_from_slice(back);
        out
    }

    /// Returns the logical index of the first element equal to `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec!['a', 'b', 'a'].into();
    /// assert_eq!(deque.find(&'a'), Some(0));
    /// assert_eq!(deque.find(&'z'), None);
    /// ```
    pub fn find(&self, value: &T) -> Option<usize>
        where T: PartialEq
    {
        self.iter().position(|x| x == value)
    }

    /// Returns `true` if every one of `values` is present.
    ///
    /// Each value is looked up on its own, so one element can match several
    /// equal values. An empty `values` is trivially contained.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![0, 1].into();
    /// assert!(deque.contains(&[1, 0, 1]));
    /// assert!(!deque.contains(&[1, 10]));
    /// ```
    pub fn contains(&self, values: &[T]) -> bool
        where T: PartialEq
    {
        values.iter().all(|value| self.find(value).is_some())
    }

    /// Returns `true` if `index` addresses an element.
    ///
    /// Indices are interpreted as in [`get`](Deque::get). With `check_empty`,
    /// the element must also not be the unset sentinel.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![Some(1), None].into();
    /// assert!(deque.isset(1, false));
    /// assert!(!deque.isset(1, true));
    /// assert!(deque.isset(-2, true));
    /// assert!(!deque.isset(2, false));
    /// ```
    pub fn isset(&self, index: isize, check_empty: bool) -> bool
        where T: Nullable
    {
        match self.get(index) {
            Ok(value) => !check_empty || !value.is_null(),
            Err(_) => false,
        }
    }
}

impl<T> From<Vec<T>> for Deque<T> {
    /// Adopts the vector's allocation, growing it in place to a power of two
    /// when the allocator allows.
    fn from(vec: Vec<T>) -> Deque<T> {
        let len = vec.len();
        let capacity = capacity_for(len.saturating_add(1));
        let mut vec = ManuallyDrop::new(vec);
        let mut slots = unsafe {
            Vec::from_raw_parts(vec.as_mut_ptr() as *mut MaybeUninit<T>, len, vec.capacity())
        };
        slots.resize_with(capacity, MaybeUninit::uninit);
        log::trace!("deque adopting vec: len={} capacity={}", len, capacity);
        let deque = Deque {
            buf: slots.into_boxed_slice(),
            head: 0,
            tail: len,
            len,
        };
        deque.debug_check();
        deque
    }
}

impl<T> From<Deque<T>> for Vec<T> {
    /// Reuses the deque's buffer, rotating it to start at slot 0.
    fn from(mut deque: Deque<T>) -> Vec<T> {
        let head = deque.head;
        deque.buf.rotate_left(head);
        let len = deque.len;
        // leave an empty ring behind for the deque's own drop
        deque.len = 0;
        deque.head = 0;
        deque.tail = 0;
        let buf = mem::replace(&mut deque.buf, Vec::new().into_boxed_slice());
        let capacity = buf.len();
        let buf = Box::into_raw(buf) as *mut MaybeUninit<T> as *mut T;
        unsafe { Vec::from_raw_parts(buf, len, capacity) }
    }
}
