//! Typed field descriptors.
//!
//! A [`Field`] pairs a field name with a getter, so a predicate can only
//! reference fields that exist on its record type. Descriptors are usually
//! generated by `#[derive(Record)]` from the `sift-macros` crate, but can be
//! written by hand.

use std::fmt;

/// Descriptor of a field of type `V` on record type `Root`.
///
/// # Example
///
/// ```
/// use sift::Field;
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// impl User {
///     const NAME: Field<User, String> = Field::new("name", |user| &user.name);
///     const AGE: Field<User, u32> = Field::new("age", |user| &user.age);
/// }
///
/// let user = User { name: "Eden".into(), age: 25 };
/// assert_eq!(User::NAME.get(&user), "Eden");
/// assert_eq!(User::AGE.name(), "age");
/// ```
pub struct Field<Root, V> {
    name: &'static str,
    get: fn(&Root) -> &V,
}

impl<Root, V> Field<Root, V> {
    /// Creates a descriptor from a field name and a getter.
    pub const fn new(name: &'static str, get: fn(&Root) -> &V) -> Self {
        Field { name, get }
    }

    /// Returns the field name used in canonical text.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Reads the field from a record.
    pub fn get<'a>(&self, record: &'a Root) -> &'a V {
        (self.get)(record)
    }

    pub(crate) fn getter(&self) -> fn(&Root) -> &V {
        self.get
    }
}

impl<Root, V> Clone for Field<Root, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Root, V> Copy for Field<Root, V> {}

impl<Root, V> fmt::Debug for Field<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Field").field(&self.name).finish()
    }
}

/// Record types with a closed set of queryable fields.
///
/// Implemented by `#[derive(Record)]`, which also generates one
/// [`Field`] constant per field.
pub trait Record {
    /// Names of the queryable fields, in declaration order.
    const FIELDS: &'static [&'static str];

    /// Returns `true` if `name` is one of [`Record::FIELDS`].
    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}
