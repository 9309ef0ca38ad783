use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt::{Display, Write};

use super::sort;
use super::*;
use crate::value::{Number, ToNumber, Truthy};

fn infallible<T>(result: std::result::Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

impl<T> Deque<T> {
    /// Returns a new deque holding `f` applied to every element, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![1, 2, 3].into();
    /// assert_eq!(deque.map(|x| x * 10), [10, 20, 30]);
    /// ```
    pub fn map<U, F>(&self, mut f: F) -> Deque<U>
        where F: FnMut(&T) -> U
    {
        infallible(self.try_map(|x| Ok(f(x))))
    }

    /// Fallible [`map`](Deque::map). The first error is returned as is and no
    /// partial result escapes.
    pub fn try_map<U, E, F>(&self, mut f: F) -> std::result::Result<Deque<U>, E>
        where F: FnMut(&T) -> std::result::Result<U, E>
    {
        let mut mapped = Deque::with_capacity(self.len + 1);
        for element in self.iter() {
            mapped.push(f(element)?);
        }
        Ok(mapped)
    }

    /// Returns a new deque holding the truthy elements, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![0, 1, 2, 0, 3].into();
    /// assert_eq!(deque.filter(), [1, 2, 3]);
    /// ```
    pub fn filter(&self) -> Deque<T>
        where T: Truthy + Clone
    {
        self.filter_by(|x| x.is_truthy())
    }

    /// Returns a new deque holding the elements `predicate` accepts, in order.
    pub fn filter_by<F>(&self, mut predicate: F) -> Deque<T>
        where T: Clone,
              F: FnMut(&T) -> bool
    {
        infallible(self.try_filter_by(|x| Ok(predicate(x))))
    }

    /// Fallible [`filter_by`](Deque::filter_by).
    pub fn try_filter_by<E, F>(&self, mut predicate: F) -> std::result::Result<Deque<T>, E>
        where T: Clone,
              F: FnMut(&T) -> std::result::Result<bool, E>
    {
        let mut kept = Deque::new();
        for element in self.iter() {
            if predicate(element)? {
                kept.push(element.clone());
            }
        }
        Ok(kept)
    }

    /// Left fold over the elements, front to back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![1, 2, 3, 4].into();
    /// assert_eq!(deque.reduce(0, |acc, x| acc + x), 10);
    /// ```
    pub fn reduce<A, F>(&self, initial: A, f: F) -> A
        where F: FnMut(A, &T) -> A
    {
        self.iter().fold(initial, f)
    }

    /// Fallible [`reduce`](Deque::reduce).
    pub fn try_reduce<A, E, F>(&self, initial: A, f: F) -> std::result::Result<A, E>
        where F: FnMut(A, &T) -> std::result::Result<A, E>
    {
        self.iter().try_fold(initial, f)
    }

    /// Replaces every element with `f` of it, in place.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<String> = vec!["a".to_string(), "b".to_string()].into();
    /// deque.apply(|s| s.to_uppercase());
    /// assert_eq!(deque, ["A", "B"]);
    /// ```
    pub fn apply<F>(&mut self, mut f: F)
        where F: FnMut(&T) -> T
    {
        infallible(self.try_apply(|x| Ok(f(x))))
    }

    /// Fallible [`apply`](Deque::apply).
    ///
    /// Elements before the failing one stay replaced; the failing element and
    /// everything after it are untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 0, 4].into();
    /// let result = deque.try_apply(|&x| if x == 0 { Err("zero") } else { Ok(x * 2) });
    /// assert_eq!(result, Err("zero"));
    /// assert_eq!(deque, [2, 4, 0, 4]);
    /// ```
    pub fn try_apply<E, F>(&mut self, mut f: F) -> std::result::Result<(), E>
        where F: FnMut(&T) -> std::result::Result<T, E>
    {
        for element in self.iter_mut() {
            let replaced = f(&*element)?;
            *element = replaced;
        }
        Ok(())
    }

    /// Rotates the sequence by `n` positions.
    ///
    /// A positive `n` moves front elements to the back, as `n` rounds of
    /// `push(shift())` would; a negative `n` goes the other way. `n` is taken
    /// modulo `len()`.
    ///
    /// The shorter of `n` and `len() - n` elements cross the free gap, one
    /// slot at a time. The buffer is never reallocated.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![1, 2, 3, 4, 5].into();
    /// deque.rotate(2);
    /// assert_eq!(deque, [3, 4, 5, 1, 2]);
    /// deque.rotate(-3);
    /// assert_eq!(deque, [5, 1, 2, 3, 4]);
    /// ```
    pub fn rotate(&mut self, n: isize) {
        if self.len < 2 {
            return;
        }
        let n = n.rem_euclid(self.len as isize) as usize;
        if n == 0 {
            return;
        }
        unsafe {
            if n <= self.len - n {
                for _ in 0..n {
                    let (head, tail) = (self.head, self.tail);
                    self.copy(tail, head, 1);
                    self.head = self.wrap_add(head, 1);
                    self.tail = self.wrap_add(tail, 1);
                }
            } else {
                for _ in 0..self.len - n {
                    let head = self.wrap_sub(self.head, 1);
                    let tail = self.wrap_sub(self.tail, 1);
                    self.copy(head, tail, 1);
                    self.head = head;
                    self.tail = tail;
                }
            }
        }
        self.debug_check();
    }

    /// Reverses the order of the elements in place.
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        let mut front = self.head;
        let mut back = self.wrap_sub(self.tail, 1);
        for _ in 0..self.len / 2 {
            self.buf.swap(front, back);
            front = self.wrap_add(front, 1);
            back = self.wrap_sub(back, 1);
        }
    }

    /// Returns a reversed copy.
    pub fn reversed(&self) -> Deque<T>
        where T: Clone
    {
        let mut reversed = Deque::with_capacity(self.len + 1);
        reversed.extend(self.iter().rev().cloned());
        reversed
    }

    /// Stable sort by the elements' own order. Incomparable pairs are
    /// treated as equal.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![3.5, 1.0, 2.25].into();
    /// deque.sort();
    /// assert_eq!(deque, [1.0, 2.25, 3.5]);
    /// ```
    pub fn sort(&mut self)
        where T: PartialOrd
    {
        self.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    }

    /// Stable sort with a comparator.
    pub fn sort_by<F>(&mut self, mut compare: F)
        where F: FnMut(&T, &T) -> Ordering
    {
        infallible(self.try_sort_by(|a, b| Ok(compare(a, b))));
    }

    /// Stable sort with a fallible comparator.
    ///
    /// The order is worked out before anything moves, so a failing
    /// comparator leaves the deque as it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let mut deque: Deque<_> = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')].into();
    /// deque.try_sort_by::<(), _>(|x, y| Ok(x.0.cmp(&y.0))).unwrap();
    /// assert_eq!(deque, [(0, 'b'), (0, 'd'), (1, 'a'), (1, 'c')]);
    /// ```
    pub fn try_sort_by<E, F>(&mut self, mut compare: F) -> std::result::Result<(), E>
        where F: FnMut(&T, &T) -> std::result::Result<Ordering, E>
    {
        if self.len < 2 {
            return Ok(());
        }
        let order = {
            let this = &*self;
            sort::stable_order(this.len, |a, b| compare(&this[a], &this[b]))?
        };
        sort::apply_permutation(self.make_contiguous(), order);
        Ok(())
    }

    /// Returns a copy of a window of the sequence.
    ///
    /// A negative `start` counts from the back. `length` of `None` runs to
    /// the end, a negative `length` stops that many elements before the end.
    /// The window is clamped to the sequence.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![1, 2, 3, 4, 5].into();
    /// assert_eq!(deque.slice(1, Some(2)), [2, 3]);
    /// assert_eq!(deque.slice(-2, None), [4, 5]);
    /// assert_eq!(deque.slice(1, Some(-1)), [2, 3, 4]);
    /// assert!(deque.slice(3, Some(0)).is_empty());
    /// ```
    pub fn slice(&self, start: isize, length: Option<isize>) -> Deque<T>
        where T: Clone
    {
        let (offset, count) = normalize_window(start, length, self.len);
        let mut window = Deque::with_capacity(count + 1);
        window.extend(self.iter().skip(offset).take(count).cloned());
        window
    }

    /// Returns a new deque holding copies of this sequence followed by
    /// `other`. Neither operand changes.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let a: Deque<_> = vec![1, 2].into();
    /// let b: Deque<_> = vec![3, 4].into();
    /// assert_eq!(a.merge(&b), [1, 2, 3, 4]);
    /// assert_eq!(a.merge(&[5, 6]), [1, 2, 5, 6]);
    /// assert_eq!(a, [1, 2]);
    /// ```
    pub fn merge<'a, I>(&self, other: I) -> Deque<T>
        where T: Clone + 'a,
              I: IntoIterator<Item = &'a T>
    {
        let other = other.into_iter();
        let mut merged = Deque::with_capacity(self.len + other.size_hint().0 + 1);
        merged.extend(self.iter().cloned());
        merged.extend(other.cloned());
        merged
    }

    /// Concatenates the elements' `Display` output with `separator` between
    /// consecutive elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::Deque;
    ///
    /// let deque: Deque<_> = vec![1, 2, 3].into();
    /// assert_eq!(deque.join(","), "1,2,3");
    /// assert_eq!(Deque::<i32>::new().join(","), "");
    /// ```
    pub fn join(&self, separator: &str) -> String
        where T: Display
    {
        let mut joined = String::new();
        for (i, element) in self.iter().enumerate() {
            if i > 0 {
                joined.push_str(separator);
            }
            // writing into a String cannot fail
            let _ = write!(joined, "{}", element);
        }
        joined
    }

    /// Sums the elements' numeric values, starting from integer zero.
    ///
    /// Integer overflow and float operands promote the sum to a float.
    ///
    /// # Errors
    ///
    /// [`DequeError::NotNumeric`] naming the first element without a numeric
    /// value.
    ///
    /// # Examples
    ///
    /// ```
    /// use ringdeque::{Deque, Number, Value};
    ///
    /// let deque: Deque<Value> = vec![Value::from(1), Value::from("2"), Value::from(0.5)].into();
    /// assert_eq!(deque.sum().ok(), Some(Number::Float(3.5)));
    /// assert_eq!(Deque::<i32>::new().sum().ok(), Some(Number::Int(0)));
    /// ```
    pub fn sum(&self) -> Result<Number>
        where T: ToNumber
    {
        self.iter().enumerate().try_fold(Number::Int(0), |acc, (index, element)| {
            match element.to_number() {
                Some(n) => Ok(acc + n),
                None => Err(DequeError::NotNumeric { index }),
            }
        })
    }
}
