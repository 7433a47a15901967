//! Operators, quantifiers and insensitivity flags.
//!
//! [`Op`] is the compiled operator of a leaf predicate, [`Quantifier`] says
//! how it applies to the selected field, and [`Insensitivity`] carries the
//! folding flags of the string-matching operators.

use std::cmp::Ordering;
use std::fmt;
use std::ops::BitOr;

/// Comparison operator of a compiled predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Equal.
    Eq,
    /// Not equal.
    Ne,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// String or sequence starts with the operand.
    BeginsWith,
    /// String or sequence ends with the operand.
    EndsWith,
    /// String or sequence contains the operand.
    Contains,
    /// Glob match (`*` and `?` wildcards).
    Like,
    /// Regular expression search.
    Matches,
    /// Membership in a set of values.
    In,
    /// Universal true; the operation of a chain without an operator.
    True,
}

impl Op {
    /// Returns `true` for operators that accept insensitivity flags.
    pub fn is_text_op(self) -> bool {
        matches!(self, Op::BeginsWith | Op::EndsWith | Op::Contains)
    }

    /// Returns `true` for operators decided by the order of two values.
    pub fn is_ordering_op(self) -> bool {
        matches!(self, Op::Eq | Op::Ne | Op::Gt | Op::Gte | Op::Lt | Op::Lte)
    }

    /// Evaluates a comparison given an ordering result.
    pub fn eval_ordering(self, ordering: Ordering) -> bool {
        match self {
            Op::Eq => ordering == Ordering::Equal,
            Op::Ne => ordering != Ordering::Equal,
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            _ => false, // Not an ordering-based operator
        }
    }

    /// Returns the canonical symbol of this operator.
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Gt => ">",
            Op::Gte => ">=",
            Op::Lt => "<",
            Op::Lte => "<=",
            Op::BeginsWith => "BEGINSWITH",
            Op::EndsWith => "ENDSWITH",
            Op::Contains => "CONTAINS",
            Op::Like => "LIKE",
            Op::Matches => "MATCHES",
            Op::In => "IN",
            Op::True => "TRUEPREDICATE",
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an operator applies to the selected field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    /// Operator applies to the single field value.
    Plain,
    /// Operator must not hold for the single field value.
    Not,
    /// Operator holds for at least one element.
    Any,
    /// Operator holds for every element.
    All,
    /// Operator holds for no element.
    NoneOf,
}

impl Quantifier {
    /// Returns the canonical prefix; empty for [`Quantifier::Plain`].
    pub fn prefix(self) -> &'static str {
        match self {
            Quantifier::Plain => "",
            Quantifier::Not => "NOT",
            Quantifier::Any => "ANY",
            Quantifier::All => "ALL",
            Quantifier::NoneOf => "NONE",
        }
    }

    /// Returns `true` if this quantifier ranges over a collection field.
    pub fn is_collection(self) -> bool {
        matches!(self, Quantifier::Any | Quantifier::All | Quantifier::NoneOf)
    }
}

/// A single folding flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Fold {
    /// Compare without regard to letter case (`c`).
    Case,
    /// Compare without regard to diacritics (`d`).
    Diacritic,
}

impl Fold {
    /// Returns the flag letter used in canonical text.
    pub fn flag(self) -> char {
        match self {
            Fold::Case => 'c',
            Fold::Diacritic => 'd',
        }
    }
}

/// Set of [`Fold`] flags applied by string-matching operators.
///
/// ```
/// use sift::{Fold, Insensitivity};
///
/// let both = Insensitivity::from([Fold::Diacritic, Fold::Case]);
/// assert_eq!(both.flags(), "cd");
/// assert_eq!(Insensitivity::from(Fold::Case) | Fold::Diacritic, both);
/// assert!(Insensitivity::NONE.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Insensitivity {
    case: bool,
    diacritic: bool,
}

impl Insensitivity {
    /// Exact comparison.
    pub const NONE: Insensitivity = Insensitivity {
        case: false,
        diacritic: false,
    };

    /// Case-insensitive comparison.
    pub const CASE: Insensitivity = Insensitivity {
        case: true,
        diacritic: false,
    };

    /// Diacritic-insensitive comparison.
    pub const DIACRITIC: Insensitivity = Insensitivity {
        case: false,
        diacritic: true,
    };

    /// Returns `true` if no flag is set.
    pub fn is_empty(self) -> bool {
        !self.case && !self.diacritic
    }

    /// Returns `true` if `fold` is set.
    pub fn contains(self, fold: Fold) -> bool {
        match fold {
            Fold::Case => self.case,
            Fold::Diacritic => self.diacritic,
        }
    }

    /// Returns the set with `fold` added.
    pub fn with(mut self, fold: Fold) -> Self {
        match fold {
            Fold::Case => self.case = true,
            Fold::Diacritic => self.diacritic = true,
        }
        self
    }

    /// Iterates the set flags in canonical order (`c` before `d`).
    pub fn iter(self) -> impl Iterator<Item = Fold> {
        [Fold::Case, Fold::Diacritic]
            .into_iter()
            .filter(move |fold| self.contains(*fold))
    }

    /// Returns the flag letters in canonical order, e.g. `"cd"`.
    pub fn flags(self) -> String {
        self.iter().map(Fold::flag).collect()
    }
}

impl From<Fold> for Insensitivity {
    fn from(fold: Fold) -> Self {
        Insensitivity::NONE.with(fold)
    }
}

impl<const N: usize> From<[Fold; N]> for Insensitivity {
    fn from(folds: [Fold; N]) -> Self {
        folds.into_iter().collect()
    }
}

impl FromIterator<Fold> for Insensitivity {
    fn from_iter<I: IntoIterator<Item = Fold>>(iter: I) -> Self {
        iter.into_iter().fold(Insensitivity::NONE, Insensitivity::with)
    }
}

impl BitOr<Fold> for Insensitivity {
    type Output = Insensitivity;

    fn bitor(self, fold: Fold) -> Self::Output {
        self.with(fold)
    }
}

impl BitOr for Insensitivity {
    type Output = Insensitivity;

    fn bitor(self, other: Insensitivity) -> Self::Output {
        other.iter().fold(self, Insensitivity::with)
    }
}
