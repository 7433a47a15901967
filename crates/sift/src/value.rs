//! Runtime value types for field comparison.
//!
//! The [`Value`] enum represents a field value (or an operand) at evaluation
//! time. Field types opt into comparison by implementing [`Matchable`], which
//! borrows the field as a [`Value`].

use std::borrow::Cow;
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};

/// Runtime value for comparison, borrowed from a record field or an operand.
///
/// Values of the same kind are ordered; values of different kinds never
/// compare (see [`Value::compare`]).
///
/// # Example
///
/// ```
/// use sift::{Matchable, Number, Value};
///
/// assert_eq!("Eden".to_value(), Value::String("Eden"));
/// assert_eq!(25u8.to_value(), Value::Number(Number::U64(25)));
/// assert_eq!(None::<i32>.to_value(), Value::None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// String value (borrowed).
    String(&'a str),
    /// Numeric value.
    Number(Number),
    /// Timestamp value (milliseconds since Unix epoch).
    Timestamp(Timestamp),
    /// Enum discriminant value.
    Enum(u32),
    /// Boolean value.
    Bool(bool),
    /// Ordered sequence of values.
    List(Vec<Value<'a>>),
    /// Absent value (`Option::None`).
    None,
}

impl<'a> Value<'a> {
    /// Returns `true` if this is a `None` value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    /// Returns `true` if this is a `String` value.
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if this is a `List` value.
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the list items, if present.
    pub fn as_list(&self) -> Option<&[Value<'a>]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Orders two values of the same kind.
    ///
    /// Returns `None` when the kinds differ or when a float comparison
    /// involves NaN. Lists compare lexicographically; two `None` values are
    /// equal.
    pub fn compare(&self, other: &Value<'_>) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(str::cmp(a, b)),
            (Value::Number(a), Value::Number(b)) => a.compare(*b),
            (Value::Timestamp(a), Value::Timestamp(b)) => Some(a.cmp(b)),
            (Value::Enum(a), Value::Enum(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::List(a), Value::List(b)) => compare_lists(a, b),
            (Value::None, Value::None) => Some(Ordering::Equal),
            _ => None,
        }
    }

    /// Returns `true` if the two values compare equal.
    pub fn same_as(&self, other: &Value<'_>) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

fn compare_lists(a: &[Value<'_>], b: &[Value<'_>]) -> Option<Ordering> {
    for (x, y) in a.iter().zip(b) {
        match x.compare(y)? {
            Ordering::Equal => continue,
            ordering => return Some(ordering),
        }
    }
    Some(a.len().cmp(&b.len()))
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
///
/// Comparisons between different numeric types are handled by converting
/// to the appropriate common type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64 for comparison.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),

            // Integers of different signedness compare exactly
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),

            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

fn compare_signed_unsigned(signed: i64, unsigned: u64) -> Ordering {
    match u64::try_from(signed) {
        Ok(signed) => signed.cmp(&unsigned),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident as $target:ty: $($source:ty),*) => {
        $(
            impl From<$source> for Number {
                fn from(n: $source) -> Self {
                    Number::$variant(n as $target)
                }
            }
        )*
    };
}

number_from!(I64 as i64: i8, i16, i32, i64, isize);
number_from!(U64 as u64: u8, u16, u32, u64, usize);
number_from!(F64 as f64: f32, f64);

/// Timestamp value represented as milliseconds since Unix epoch.
///
/// ```
/// use sift::Timestamp;
///
/// assert!(Timestamp(1000) < Timestamp(2000));
/// assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Creates a new timestamp from milliseconds since Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Creates a new timestamp from seconds since Unix epoch.
    ///
    /// Saturates at the bounds of the millisecond range.
    pub fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1000))
    }

    /// Returns the timestamp as milliseconds since Unix epoch.
    pub fn as_millis(self) -> i64 {
        self.0
    }

    /// Returns the timestamp as seconds since Unix epoch.
    pub fn as_secs(self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(millis: i64) -> Self {
        Timestamp(millis)
    }
}

impl From<SystemTime> for Timestamp {
    fn from(time: SystemTime) -> Self {
        match time.duration_since(UNIX_EPOCH) {
            Ok(after) => Timestamp(i64::try_from(after.as_millis()).unwrap_or(i64::MAX)),
            Err(before) => Timestamp(
                i64::try_from(before.duration().as_millis()).map_or(i64::MIN, |millis| -millis),
            ),
        }
    }
}

/// Types whose values can be compared by predicates.
///
/// Every field type used with a [`Field`](crate::Field) and every operand
/// passed to a predicate operator implements this trait. Implementations are
/// provided for strings, numbers, booleans, timestamps, options and
/// sequences.
///
/// For a field-less enum, expose a stable discriminant:
///
/// ```
/// use sift::{Matchable, Value};
///
/// #[derive(Clone, Copy)]
/// enum Status {
///     Pending = 0,
///     Active = 1,
/// }
///
/// impl Matchable for Status {
///     fn to_value(&self) -> Value<'_> {
///         Value::Enum(*self as u32)
///     }
/// }
///
/// assert_eq!(Status::Active.to_value(), Value::Enum(1));
/// ```
pub trait Matchable {
    /// Borrows this value as a comparison [`Value`].
    fn to_value(&self) -> Value<'_>;
}

impl Matchable for str {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl Matchable for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl Matchable for Cow<'_, str> {
    fn to_value(&self) -> Value<'_> {
        Value::String(self)
    }
}

impl<T: Matchable + ?Sized> Matchable for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: Matchable + ?Sized> Matchable for Box<T> {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

macro_rules! matchable_number {
    ($($ty:ty),*) => {
        $(
            impl Matchable for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

matchable_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Matchable for Number {
    fn to_value(&self) -> Value<'_> {
        Value::Number(*self)
    }
}

impl Matchable for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl Matchable for Timestamp {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(*self)
    }
}

impl Matchable for SystemTime {
    fn to_value(&self) -> Value<'_> {
        Value::Timestamp(Timestamp::from(*self))
    }
}

impl<T: Matchable> Matchable for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(value) => value.to_value(),
            None => Value::None,
        }
    }
}

impl<T: Matchable> Matchable for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(Matchable::to_value).collect())
    }
}

impl<T: Matchable> Matchable for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl<T: Matchable, const N: usize> Matchable for [T; N] {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}
