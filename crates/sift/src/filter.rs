//! Evaluating predicates over collections.

use crate::compound::{CompoundPredicate, Expression};
use crate::predicate::Predicate;
use crate::value::Matchable;

/// Anything that decides whether a record matches.
///
/// Implemented by [`Predicate`], [`CompoundPredicate`] and [`Expression`].
/// The provided methods apply the predicate to a slice, preserving order.
pub trait Evaluate<Root> {
    /// Returns `true` if `record` matches.
    fn evaluate(&self, record: &Root) -> bool;

    /// Returns references to the matching records.
    fn filter<'a>(&self, records: &'a [Root]) -> Vec<&'a Root> {
        records.iter().filter(|r| self.evaluate(r)).collect()
    }

    /// Returns clones of the matching records.
    fn filter_cloned(&self, records: &[Root]) -> Vec<Root>
    where
        Root: Clone,
    {
        records
            .iter()
            .filter(|r| self.evaluate(r))
            .cloned()
            .collect()
    }

    /// Removes the records that do not match.
    fn retain(&self, records: &mut Vec<Root>) {
        records.retain(|r| self.evaluate(r));
    }

    /// Counts the matching records.
    fn count(&self, records: &[Root]) -> usize {
        records.iter().filter(|r| self.evaluate(r)).count()
    }

    /// Returns the first matching record.
    fn find<'a>(&self, records: &'a [Root]) -> Option<&'a Root> {
        records.iter().find(|r| self.evaluate(r))
    }

    /// Returns the index of the first matching record.
    fn position(&self, records: &[Root]) -> Option<usize> {
        records.iter().position(|r| self.evaluate(r))
    }

    /// Returns `true` if at least one record matches.
    fn matches_any(&self, records: &[Root]) -> bool {
        records.iter().any(|r| self.evaluate(r))
    }

    /// Returns `true` if every record matches (vacuously for no records).
    fn matches_all(&self, records: &[Root]) -> bool {
        records.iter().all(|r| self.evaluate(r))
    }
}

impl<Root, V: Matchable> Evaluate<Root> for Predicate<Root, V> {
    fn evaluate(&self, record: &Root) -> bool {
        Predicate::evaluate(self, record)
    }
}

impl<Root> Evaluate<Root> for CompoundPredicate<Root> {
    fn evaluate(&self, record: &Root) -> bool {
        CompoundPredicate::evaluate(self, record)
    }
}

impl<Root> Evaluate<Root> for Expression<Root> {
    fn evaluate(&self, record: &Root) -> bool {
        Expression::evaluate(self, record)
    }
}

impl<Root, E: Evaluate<Root> + ?Sized> Evaluate<Root> for &E {
    fn evaluate(&self, record: &Root) -> bool {
        (**self).evaluate(record)
    }
}

/// Filtering sugar on slices.
///
/// ```
/// use sift::{Field, FilterExt, Predicate};
///
/// struct Task {
///     done: bool,
/// }
///
/// const DONE: Field<Task, bool> = Field::new("done", |task| &task.done);
///
/// let tasks = vec![Task { done: true }, Task { done: false }];
/// let open = tasks.filter_by(&Predicate::new(DONE).equal_to(false));
/// assert_eq!(open.len(), 1);
/// ```
pub trait FilterExt<T> {
    /// Returns references to the items matching `predicate`.
    fn filter_by<E>(&self, predicate: &E) -> Vec<&T>
    where
        E: Evaluate<T> + ?Sized;
}

impl<T> FilterExt<T> for [T] {
    fn filter_by<E>(&self, predicate: &E) -> Vec<&T>
    where
        E: Evaluate<T> + ?Sized,
    {
        predicate.filter(self)
    }
}
