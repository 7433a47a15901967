//! sift - typed predicate expressions for in-memory records.
//!
//! sift builds `WHERE`-clause style predicates against Rust structs through
//! typed field descriptors, then evaluates them directly against records.
//! Operand values never end up in text: every predicate renders a canonical
//! form with positional placeholders and a separate parameter list.
//!
//! - Single-field predicates with comparison, string matching, glob, regex
//!   and membership operators
//! - ANY / ALL / NONE quantifiers over collection fields
//! - Case and diacritic insensitive string matching
//! - AND / OR / NOT composition into trees
//! - Filtering helpers over slices
//!
//! # Quick Start
//!
//! ```rust
//! use sift::{Evaluate, Field, Fold};
//!
//! struct User {
//!     name: String,
//!     age: u32,
//!     tags: Vec<String>,
//! }
//!
//! impl User {
//!     const NAME: Field<User, String> = Field::new("name", |u| &u.name);
//!     const AGE: Field<User, u32> = Field::new("age", |u| &u.age);
//!     const TAGS: Field<User, Vec<String>> = Field::new("tags", |u| &u.tags);
//! }
//!
//! let users = vec![
//!     User { name: "Eden".into(), age: 25, tags: vec!["swift".into()] },
//!     User { name: "Alice".into(), age: 20, tags: vec!["kotlin".into()] },
//!     User { name: "Bob".into(), age: 30, tags: vec!["dart".into()] },
//! ];
//!
//! let query = sift::select(User::AGE)
//!     .greater_than(20)
//!     .and(sift::any(User::TAGS).equal_to("swift".to_string()))
//!     .or(sift::select(User::NAME).begins_with("b".to_string(), Fold::Case));
//!
//! let names: Vec<&str> = query.filter(&users).iter().map(|u| u.name.as_str()).collect();
//! assert_eq!(names, ["Eden", "Bob"]);
//!
//! let form = query.canonical();
//! assert_eq!(
//!     form.text(),
//!     "(age > $1 AND ANY tags == $2) OR name BEGINSWITH[c] $3"
//! );
//! assert_eq!(form.params().len(), 3);
//! ```
//!
//! With the `macros` feature, `#[derive(sift::Record)]` generates the field
//! constants (`User::NAME`, ...) instead of writing them by hand.
//!
//! # Chains honor their first operator
//!
//! A predicate compiles to exactly one operation: the first operator after
//! the field selection. `select(AGE).greater_than(18).less_than(30)` behaves
//! as `age > 18`; the later operator is recorded but ignored. Combine
//! separate predicates with [`Predicate::and`] to express ranges. A chain
//! with no operator matches every record.
//!
//! # Compound semantics
//!
//! ```text
//! AND(c1, ..., cn) = c1 ∧ ... ∧ cn      (empty: true)
//! OR(c1, ..., cn)  = c1 ∨ ... ∨ cn      (empty: false)
//! NOT(c)           = ¬c
//! ```
//!
//! `or` builds a genuine disjunction; it is not an alias of `and`.
//!
//! # Operators
//!
//! | Operator | Builder | Applies to |
//! |----------|---------|------------|
//! | `==` `!=` | `equal_to`, `not_equal_to` | any value |
//! | `>` `>=` `<` `<=` | `greater_than`, ... | values of the same kind |
//! | `BEGINSWITH` `ENDSWITH` `CONTAINS` | `begins_with`, ... | strings, lists |
//! | `LIKE` | `like` | strings (`*`, `?` globs, case-sensitive) |
//! | `MATCHES` | `matches_regex` | strings (regex search) |
//! | `IN` | `is_in` | any value |

mod action;
mod compound;
mod error;
mod field;
mod filter;
mod observability;
mod op;
mod pattern;
mod predicate;
mod resolved;
mod text;
mod value;

// Re-export public API
pub use action::{Action, ActionSequence, Selector};
pub use compound::{CompoundPredicate, Connective, Expression, Visit};
pub use error::{Result, SiftError};
pub use field::{Field, Record};
pub use filter::{Evaluate, FilterExt};
pub use op::{Fold, Insensitivity, Op, Quantifier};
pub use pattern::Pattern;
pub use predicate::{all, any, none, not, select, Predicate};
pub use resolved::{CanonicalForm, Operand, ResolvedOperation};
pub use value::{Matchable, Number, Timestamp, Value};

#[cfg(feature = "macros")]
pub use sift_macros::Record;
