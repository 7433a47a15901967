//! The fluent predicate builder.
//!
//! A [`Predicate`] starts with a field selection and records each fluent call
//! as an [`Action`]. Compilation resolves the chain to the first operator
//! after the selection; later operators are kept in the sequence but have no
//! effect:
//!
//! ```
//! use sift::{Field, Predicate};
//!
//! struct User {
//!     age: u32,
//! }
//!
//! const AGE: Field<User, u32> = Field::new("age", |user| &user.age);
//!
//! let chained = Predicate::new(AGE).equal_to(20).equal_to(25);
//! assert_eq!(chained.canonical().text(), "age == $1");
//! assert!(chained.evaluate(&User { age: 20 }));
//! assert!(!chained.evaluate(&User { age: 25 }));
//! ```

use std::fmt;

use crate::action::{Action, ActionSequence, Selector};
use crate::compound::{CompoundPredicate, Expression};
use crate::error::Result;
use crate::field::Field;
use crate::observability::{log_debug, log_trace};
use crate::op::Insensitivity;
use crate::pattern::Pattern;
use crate::resolved::{CanonicalForm, ResolvedOperation};
use crate::value::Matchable;

/// Builder for a single-field predicate over records of type `Root`.
///
/// `V` is the type of the compared values: the field type for plain and
/// negated selections, the element type for quantified ones.
pub struct Predicate<Root, V> {
    actions: ActionSequence<Root, V>,
}

impl<Root, V> Predicate<Root, V> {
    /// Starts a predicate on a single field.
    pub fn new(field: Field<Root, V>) -> Self {
        Predicate::selecting(Selector::plain(field))
    }

    /// Starts a predicate whose operator result is negated.
    ///
    /// `Predicate::negated(AGE).equal_to(5)` renders as `NOT age == $1`.
    pub fn negated(field: Field<Root, V>) -> Self {
        Predicate::selecting(Selector::negated(field))
    }

    /// Starts a predicate satisfied when any element of a collection field
    /// satisfies the operator. An empty collection never matches.
    pub fn any<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Predicate::selecting(Selector::any(field))
    }

    /// Same as [`Predicate::any`].
    pub fn some<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Predicate::any(field)
    }

    /// Starts a predicate satisfied when every element of a collection field
    /// satisfies the operator. An empty collection always matches.
    pub fn all<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Predicate::selecting(Selector::all(field))
    }

    /// Starts a predicate satisfied when no element of a collection field
    /// satisfies the operator. An empty collection always matches.
    pub fn none<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Predicate::selecting(Selector::none(field))
    }

    /// Wraps a raw action sequence.
    ///
    /// A sequence that is empty or does not start with a selection compiles
    /// to universal true.
    pub fn from_actions(actions: ActionSequence<Root, V>) -> Self {
        Predicate { actions }
    }

    fn selecting(selector: Selector<Root, V>) -> Self {
        Predicate {
            actions: ActionSequence::starting_with(selector),
        }
    }

    /// Returns the recorded actions, selection first.
    pub fn actions(&self) -> &ActionSequence<Root, V> {
        &self.actions
    }

    /// Consumes the predicate, returning its action sequence.
    pub fn into_actions(self) -> ActionSequence<Root, V> {
        self.actions
    }

    fn push(mut self, action: Action<Root, V>) -> Self {
        if action.is_operator() && self.actions.iter().any(Action::is_operator) {
            log_debug!(
                event = "operator_ignored",
                op = ?action.op(),
                position = self.actions.len()
            );
        }
        self.actions.append(action);
        self
    }

    /// Field equals `value`.
    pub fn equal_to(self, value: V) -> Self {
        self.push(Action::EqualTo(value))
    }

    /// Field differs from `value`.
    pub fn not_equal_to(self, value: V) -> Self {
        self.push(Action::NotEqualTo(value))
    }

    /// Field is greater than `value`.
    pub fn greater_than(self, value: V) -> Self {
        self.push(Action::GreaterThan(value))
    }

    /// Field is greater than or equal to `value`.
    pub fn greater_or_equal(self, value: V) -> Self {
        self.push(Action::GreaterOrEqual(value))
    }

    /// Field is less than `value`.
    pub fn less_than(self, value: V) -> Self {
        self.push(Action::LessThan(value))
    }

    /// Field is less than or equal to `value`.
    pub fn less_or_equal(self, value: V) -> Self {
        self.push(Action::LessOrEqual(value))
    }

    /// String field starts with `value`, or list field starts with the
    /// elements of `value`.
    pub fn begins_with(self, value: V, insensitivity: impl Into<Insensitivity>) -> Self {
        self.push(Action::BeginsWith(value, insensitivity.into()))
    }

    /// String field ends with `value`, or list field ends with the elements
    /// of `value`.
    pub fn ends_with(self, value: V, insensitivity: impl Into<Insensitivity>) -> Self {
        self.push(Action::EndsWith(value, insensitivity.into()))
    }

    /// String field contains `value`, or list field contains the elements of
    /// `value` as a contiguous run.
    pub fn contains(self, value: V, insensitivity: impl Into<Insensitivity>) -> Self {
        self.push(Action::Contains(value, insensitivity.into()))
    }

    /// Field equals one of `values`.
    pub fn is_in<I>(self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        self.push(Action::In(values.into_iter().collect()))
    }

    /// Field matches a glob where `*` matches any run of characters and `?`
    /// exactly one. Matching is case-sensitive and covers the whole string.
    ///
    /// A glob that cannot be compiled never matches.
    pub fn like(self, pattern: &str) -> Self
    where
        V: AsRef<str>,
    {
        self.push(Action::Like(Pattern::like_or_never(pattern)))
    }

    /// Field contains a match of the regular expression `pattern`.
    pub fn matches_regex(self, pattern: &str) -> Result<Self>
    where
        V: AsRef<str>,
    {
        let pattern = Pattern::regex(pattern)?;
        Ok(self.push(Action::Matches(pattern)))
    }

    /// Compiles the chain to its single effective operation.
    ///
    /// The result borrows from the predicate. An empty chain, a chain not
    /// led by a selection, and a selection without an operator all compile
    /// to universal true.
    pub fn compile(&self) -> ResolvedOperation<'_, Root, V> {
        let mut actions = self.actions.iter();

        let Some(Action::Select(selector)) = actions.next() else {
            log_trace!(event = "compile_fallback", reason = "missing_selection");
            return ResolvedOperation::universal();
        };

        match actions.find(|action| action.is_operator()) {
            Some(action) => ResolvedOperation::resolve(selector, action),
            None => {
                log_trace!(
                    event = "compile_fallback",
                    reason = "missing_operator",
                    field = selector.field()
                );
                ResolvedOperation::universal()
            }
        }
    }
}

impl<Root, V: Matchable> Predicate<Root, V> {
    /// Returns `true` if `record` satisfies the compiled operation.
    pub fn evaluate(&self, record: &Root) -> bool {
        self.compile().evaluate(record)
    }

    /// Renders the canonical text and parameters.
    pub fn canonical(&self) -> CanonicalForm<'_> {
        self.compile().canonical()
    }
}

impl<Root, V> Predicate<Root, V>
where
    Root: 'static,
    V: Matchable + Clone + Send + Sync + 'static,
{
    /// Combines with `other` into an AND compound.
    pub fn and(self, other: impl Into<Expression<Root>>) -> CompoundPredicate<Root> {
        CompoundPredicate::all_of([Expression::from(self), other.into()])
    }

    /// Combines with `other` into an OR compound.
    pub fn or(self, other: impl Into<Expression<Root>>) -> CompoundPredicate<Root> {
        CompoundPredicate::any_of([Expression::from(self), other.into()])
    }

    /// Wraps in a NOT compound.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> CompoundPredicate<Root> {
        CompoundPredicate::negate(self)
    }
}

impl<Root, V: Clone> Clone for Predicate<Root, V> {
    fn clone(&self) -> Self {
        Predicate {
            actions: self.actions.clone(),
        }
    }
}

impl<Root, V: fmt::Debug> fmt::Debug for Predicate<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("actions", &self.actions)
            .finish()
    }
}

impl<Root, V: Matchable> fmt::Display for Predicate<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.canonical(), f)
    }
}

/// Starts a predicate on a single field. Same as [`Predicate::new`].
pub fn select<Root, V>(field: Field<Root, V>) -> Predicate<Root, V> {
    Predicate::new(field)
}

/// Starts a negated predicate. Same as [`Predicate::negated`].
pub fn not<Root, V>(field: Field<Root, V>) -> Predicate<Root, V> {
    Predicate::negated(field)
}

/// Starts an ANY-quantified predicate. Same as [`Predicate::any`].
pub fn any<Root, C, V>(field: Field<Root, C>) -> Predicate<Root, V>
where
    Root: 'static,
    C: AsRef<[V]> + 'static,
{
    Predicate::any(field)
}

/// Starts an ALL-quantified predicate. Same as [`Predicate::all`].
pub fn all<Root, C, V>(field: Field<Root, C>) -> Predicate<Root, V>
where
    Root: 'static,
    C: AsRef<[V]> + 'static,
{
    Predicate::all(field)
}

/// Starts a NONE-quantified predicate. Same as [`Predicate::none`].
pub fn none<Root, C, V>(field: Field<Root, C>) -> Predicate<Root, V>
where
    Root: 'static,
    C: AsRef<[V]> + 'static,
{
    Predicate::none(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::op::{Fold, Op, Quantifier};
    use crate::value::{Number, Value};

    #[derive(Clone)]
    struct User {
        name: String,
        age: u32,
        tags: Vec<String>,
    }

    const NAME: Field<User, String> = Field::new("name", |user| &user.name);
    const AGE: Field<User, u32> = Field::new("age", |user| &user.age);
    const TAGS: Field<User, Vec<String>> = Field::new("tags", |user| &user.tags);

    fn eden() -> User {
        User {
            name: "Eden".to_string(),
            age: 25,
            tags: vec!["admin".to_string(), "ops".to_string()],
        }
    }

    #[test]
    fn selection_only_is_universal() {
        let predicate = Predicate::new(AGE);
        assert!(predicate.compile().is_universal());
        assert!(predicate.evaluate(&eden()));
        assert_eq!(predicate.canonical().text(), "TRUEPREDICATE");
    }

    #[test]
    fn empty_sequence_is_universal() {
        let predicate: Predicate<User, u32> = Predicate::from_actions(ActionSequence::new());
        assert!(predicate.compile().is_universal());
        assert!(predicate.evaluate(&eden()));
    }

    #[test]
    fn sequence_without_leading_selection_is_universal() {
        let mut actions = ActionSequence::new();
        actions.append(Action::EqualTo(99u32));
        let predicate = Predicate::from_actions(actions);

        assert!(predicate.compile().is_universal());
        assert!(predicate.evaluate(&eden()));
    }

    #[test]
    fn first_operator_wins() {
        let predicate = Predicate::new(AGE).greater_than(30).less_than(40);
        let compiled = predicate.compile();

        assert_eq!(compiled.op(), Op::Gt);
        assert!(!predicate.evaluate(&eden()));
        assert_eq!(predicate.actions().len(), 3);
    }

    #[test]
    fn canonical_binds_operand() {
        let predicate = Predicate::new(NAME).begins_with("ed".to_string(), Fold::Case);
        let form = predicate.canonical();

        assert_eq!(form.text(), "name BEGINSWITH[c] $1");
        assert_eq!(form.params(), &[Value::String("ed")]);
        assert!(predicate.evaluate(&eden()));
    }

    #[test]
    fn negated_selection() {
        let predicate = not(AGE).equal_to(25);
        assert_eq!(predicate.to_string(), "NOT age == $1");
        assert!(!predicate.evaluate(&eden()));
        assert_eq!(predicate.compile().quantifier(), Some(Quantifier::Not));
    }

    #[test]
    fn quantified_selection() {
        let any_admin = any(TAGS).equal_to("admin".to_string());
        assert_eq!(any_admin.to_string(), "ANY tags == $1");
        assert!(any_admin.evaluate(&eden()));

        let all_admin = all(TAGS).equal_to("admin".to_string());
        assert!(!all_admin.evaluate(&eden()));

        let none_root = none(TAGS).equal_to("root".to_string());
        assert!(none_root.evaluate(&eden()));
    }

    #[test]
    fn some_is_any() {
        let predicate = Predicate::some(TAGS).begins_with("OP".to_string(), Fold::Case);
        assert_eq!(predicate.canonical().text(), "ANY tags BEGINSWITH[c] $1");
        assert!(predicate.evaluate(&eden()));
    }

    #[test]
    fn like_matches_glob() {
        assert!(select(NAME).like("E?en").evaluate(&eden()));
        assert!(select(NAME).like("*n").evaluate(&eden()));
        assert!(!select(NAME).like("e*").evaluate(&eden()));
        assert_eq!(select(NAME).like("E*").to_string(), "name LIKE $1");
    }

    #[test]
    fn matches_regex_rejects_invalid_pattern() {
        assert!(select(NAME).matches_regex("[").is_err());

        let predicate = select(NAME).matches_regex("^E.e").unwrap();
        assert!(predicate.evaluate(&eden()));
    }

    #[test]
    fn is_in_membership() {
        let predicate = select(AGE).is_in([18, 25, 40]);
        assert!(predicate.evaluate(&eden()));
        assert_eq!(
            predicate.canonical().params(),
            &[Value::List(vec![
                Value::Number(Number::U64(18)),
                Value::Number(Number::U64(25)),
                Value::Number(Number::U64(40)),
            ])]
        );

        assert!(!select(AGE).is_in(Vec::new()).evaluate(&eden()));
    }

    #[test]
    fn clone_is_independent() {
        let base = select(AGE).equal_to(25);
        let copy = base.clone().greater_than(1);
        assert_eq!(base.actions().len(), 2);
        assert_eq!(copy.actions().len(), 3);
    }
}
