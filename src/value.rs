//! Capabilities the bulk operations ask of their elements.
//!
//! A dynamically typed host hands the deque values that can be copied,
//! compared, tested for truthiness, coerced to numbers and to strings. Copying
//! and comparing map onto `Clone` and `PartialEq`, string coercion onto
//! `Display`; the rest are the small traits below. [`Value`] implements all of
//! them and stands in for a host value.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// Truthiness test used by [`Deque::filter`](crate::Deque::filter).
pub trait Truthy {
    /// Returns `true` if the value counts as true.
    fn is_truthy(&self) -> bool;
}

/// Unset sentinel test used by [`Deque::isset`](crate::Deque::isset).
pub trait Nullable {
    /// Returns `true` if the value is the unset sentinel.
    fn is_null(&self) -> bool;
}

/// Numeric coercion used by [`Deque::sum`](crate::Deque::sum).
pub trait ToNumber {
    /// The numeric value, or `None` if the value is not numeric.
    fn to_number(&self) -> Option<Number>;
}

/// Integer or floating point number.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Number {
    /// A 64-bit integer.
    Int(i64),
    /// A 64-bit float.
    Float(f64),
}

impl Number {
    /// Widens to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

impl Default for Number {
    fn default() -> Number {
        Number::Int(0)
    }
}

/// Integer addition promotes to float on overflow; any float operand makes
/// the result a float.
impl Add for Number {
    type Output = Number;

    fn add(self, rhs: Number) -> Number {
        match (self, rhs) {
            (Number::Int(a), Number::Int(b)) => match a.checked_add(b) {
                Some(sum) => Number::Int(sum),
                None => Number::Float(a as f64 + b as f64),
            },
            (a, b) => Number::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

macro_rules! impl_integer {
    ($($t:ty)*) => {$(
        impl Truthy for $t {
            #[inline]
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        }

        impl Nullable for $t {
            #[inline]
            fn is_null(&self) -> bool {
                false
            }
        }

        impl ToNumber for $t {
            #[inline]
            fn to_number(&self) -> Option<Number> {
                Some(match i64::try_from(*self) {
                    Ok(i) => Number::Int(i),
                    Err(_) => Number::Float(*self as f64),
                })
            }
        }
    )*}
}

impl_integer!(i8 i16 i32 i64 isize u8 u16 u32 u64 usize);

macro_rules! impl_float {
    ($($t:ty)*) => {$(
        impl Truthy for $t {
            #[inline]
            fn is_truthy(&self) -> bool {
                *self != 0.0
            }
        }

        impl Nullable for $t {
            #[inline]
            fn is_null(&self) -> bool {
                false
            }
        }

        impl ToNumber for $t {
            #[inline]
            fn to_number(&self) -> Option<Number> {
                Some(Number::Float(*self as f64))
            }
        }
    )*}
}

impl_float!(f32 f64);

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Nullable for bool {
    fn is_null(&self) -> bool {
        false
    }
}

impl ToNumber for bool {
    fn to_number(&self) -> Option<Number> {
        Some(Number::Int(*self as i64))
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty() && self != "0"
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        self.as_str().is_truthy()
    }
}

impl<'a> Truthy for &'a str {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl Nullable for String {
    fn is_null(&self) -> bool {
        false
    }
}

impl<'a> Nullable for &'a str {
    fn is_null(&self) -> bool {
        false
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().map_or(false, Truthy::is_truthy)
    }
}

impl<T> Nullable for Option<T> {
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T: ToNumber> ToNumber for Option<T> {
    fn to_number(&self) -> Option<Number> {
        self.as_ref().and_then(ToNumber::to_number)
    }
}

fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    s.parse::<i64>()
        .map(Number::Int)
        .or_else(|_| s.parse::<f64>().map(Number::Float))
        .ok()
}

/// A dynamically typed value.
///
/// Equality is strict: values of different kinds are never equal, so
/// `Int(1) != Float(1.0)`. Ordering is total across kinds, ranking
/// `Null < Bool < numbers < Str < List`, with integers and floats compared by
/// numeric value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The unset sentinel.
    Null,
    /// A boolean.
    Bool(bool),
    /// An integer.
    Int(i64),
    /// A float.
    Float(f64),
    /// A string.
    Str(String),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    fn rank(&self) -> u8 {
        match *self {
            Value::Null => 0,
            Value::Bool(_) => 1,
            Value::Int(_) | Value::Float(_) => 2,
            Value::Str(_) => 3,
            Value::List(_) => 4,
        }
    }

    /// Total order over all values.
    ///
    /// Kinds rank `Null`, `Bool`, numbers, `Str`, `List`. Integers and floats
    /// compare numerically, so `Int(1)` and `Float(1.0)` are `Equal` here even
    /// though they are not `==`. Use it with `sort_by` for a mixed ordering.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        match (self, other) {
            (&Value::Bool(a), &Value::Bool(b)) => a.cmp(&b),
            (&Value::Int(a), &Value::Int(b)) => a.cmp(&b),
            (&Value::Float(a), &Value::Float(b)) => a.total_cmp(&b),
            (&Value::Int(a), &Value::Float(b)) => (a as f64).total_cmp(&b),
            (&Value::Float(a), &Value::Int(b)) => a.total_cmp(&(b as f64)),
            (&Value::Str(ref a), &Value::Str(ref b)) => a.cmp(b),
            (&Value::List(ref a), &Value::List(ref b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.total_cmp(y) {
                        Ordering::Equal => {}
                        unequal => return unequal,
                    }
                }
                a.len().cmp(&b.len())
            }
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

/// Follows [`Value::total_cmp`], except that pairs which compare `Equal`
/// without being `==` are incomparable, keeping `partial_cmp` consistent with
/// the strict equality.
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Value) -> Option<Ordering> {
        match self.total_cmp(other) {
            Ordering::Equal if self != other => None,
            ordering => Some(ordering),
        }
    }
}

impl Truthy for Value {
    fn is_truthy(&self) -> bool {
        match *self {
            Value::Null => false,
            Value::Bool(b) => b,
            Value::Int(i) => i != 0,
            Value::Float(f) => f != 0.0,
            Value::Str(ref s) => s.is_truthy(),
            Value::List(ref l) => !l.is_empty(),
        }
    }
}

impl Nullable for Value {
    fn is_null(&self) -> bool {
        *self == Value::Null
    }
}

/// `Null` counts as zero and booleans as zero or one. Strings are numeric only
/// when they parse as a number; lists never are.
impl ToNumber for Value {
    fn to_number(&self) -> Option<Number> {
        match *self {
            Value::Null => Some(Number::Int(0)),
            Value::Bool(b) => b.to_number(),
            Value::Int(i) => Some(Number::Int(i)),
            Value::Float(f) => Some(Number::Float(f)),
            Value::Str(ref s) => parse_number(s),
            Value::List(_) => None,
        }
    }
}

/// String coercion: `Null` and `false` are empty, `true` is `1`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Null | Value::Bool(false) => Ok(()),
            Value::Bool(true) => f.write_str("1"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(ref s) => f.write_str(s),
            Value::List(ref items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Value {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Value {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Value {
        Value::Int(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Value {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Str(s)
    }
}

impl<'a> From<&'a str> for Value {
    fn from(s: &'a str) -> Value {
        Value::Str(s.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Value {
        o.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Value {
        Value::List(v.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_addition_promotes() {
        assert_eq!(Number::Int(2) + Number::Int(3), Number::Int(5));
        assert_eq!(Number::Int(2) + Number::Float(0.5), Number::Float(2.5));
        assert_eq!(Number::Int(i64::MAX) + Number::Int(1),
                   Number::Float(i64::MAX as f64 + 1.0));
    }

    #[test]
    fn primitive_coercions() {
        assert!(3u8.is_truthy());
        assert!(!0i64.is_truthy());
        assert!(!0.0f64.is_truthy());
        assert!(!"".is_truthy());
        assert!(!"0".is_truthy());
        assert!("00".is_truthy());
        assert!(!None::<i32>.is_truthy());
        assert!(Some(1).is_truthy());
        assert!(None::<i32>.is_null());
        assert_eq!(u64::MAX.to_number(), Some(Number::Float(u64::MAX as f64)));
        assert_eq!(true.to_number(), Some(Number::Int(1)));
    }

    #[test]
    fn value_truthiness() {
        let falsy = [Value::Null, Value::Bool(false), Value::Int(0), Value::Float(0.0),
                     Value::from(""), Value::from("0"), Value::List(vec![])];
        for v in falsy.iter() {
            assert!(!v.is_truthy(), "{:?}", v);
        }
        let truthy = [Value::Bool(true), Value::Int(-1), Value::Float(0.1),
                      Value::from("a"), Value::from(vec![0])];
        for v in truthy.iter() {
            assert!(v.is_truthy(), "{:?}", v);
        }
    }

    #[test]
    fn value_numbers() {
        assert_eq!(Value::from(" 42 ").to_number(), Some(Number::Int(42)));
        assert_eq!(Value::from("1.5").to_number(), Some(Number::Float(1.5)));
        assert_eq!(Value::from("abc").to_number(), None);
        assert_eq!(Value::Null.to_number(), Some(Number::Int(0)));
        assert_eq!(Value::from(vec![1]).to_number(), None);
    }

    #[test]
    fn value_strict_equality() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::from("1"));
        assert_eq!(Value::from(vec![1, 2]), Value::from(vec![1, 2]));
    }

    #[test]
    fn value_order() {
        let mut values = vec![Value::from("b"), Value::Float(1.5), Value::Null,
                              Value::Int(1), Value::Bool(true), Value::from(vec![0]),
                              Value::Int(2), Value::from("a")];
        values.sort_by(Value::total_cmp);
        assert_eq!(values, vec![Value::Null, Value::Bool(true), Value::Int(1),
                                Value::Float(1.5), Value::Int(2), Value::from("a"),
                                Value::from("b"), Value::from(vec![0])]);
    }

    #[test]
    fn partial_order_agrees_with_equality() {
        let int = Value::Int(1);
        let float = Value::Float(1.0);
        assert_eq!(int.total_cmp(&float), Ordering::Equal);
        assert_ne!(int, float);
        assert_eq!(int.partial_cmp(&float), None);
        assert!(!(int <= float) && !(int >= float));

        let nan = Value::Float(f64::NAN);
        assert_eq!(nan.total_cmp(&nan), Ordering::Equal);
        assert_eq!(nan.partial_cmp(&nan), None);

        assert_eq!(int.partial_cmp(&Value::Int(1)), Some(Ordering::Equal));
        assert_eq!(int.partial_cmp(&Value::Float(1.5)), Some(Ordering::Less));
        assert_eq!(Value::from(vec![1]).partial_cmp(&Value::from(vec![1.0])), None);
        assert_eq!(Value::from(vec![1]).partial_cmp(&Value::from(vec![2.0])),
                   Some(Ordering::Less));
    }

    #[test]
    fn value_display() {
        assert_eq!(Value::Null.to_string(), "");
        assert_eq!(Value::Bool(true).to_string(), "1");
        assert_eq!(Value::Bool(false).to_string(), "");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::from(vec![Value::Int(1), Value::from("x")]).to_string(), "[1, x]");
    }
}
