//! Builder actions.
//!
//! Every fluent call on a [`Predicate`](crate::Predicate) appends one
//! [`Action`] to its [`ActionSequence`]. A well-formed sequence starts with a
//! [`Action::Select`] followed by operator actions; compilation honors only
//! the first operator.

use std::fmt;
use std::sync::Arc;

use crate::field::Field;
use crate::op::{Insensitivity, Op, Quantifier};
use crate::pattern::Pattern;

type Elements<Root, V> = Arc<dyn for<'a> Fn(&'a Root) -> &'a [V] + Send + Sync>;

/// How a selector reaches the field value(s) of a record.
pub(crate) enum Access<Root, V> {
    /// Single value, plain or negated.
    Single(fn(&Root) -> &V),
    /// Elements of a collection field.
    Each(Elements<Root, V>),
}

impl<Root, V> Clone for Access<Root, V> {
    fn clone(&self) -> Self {
        match self {
            Access::Single(get) => Access::Single(*get),
            Access::Each(get) => Access::Each(Arc::clone(get)),
        }
    }
}

/// Field selection with its quantifier; the first action of a sequence.
pub struct Selector<Root, V> {
    field: &'static str,
    quantifier: Quantifier,
    access: Access<Root, V>,
}

impl<Root, V> Selector<Root, V> {
    /// Selects a single field value.
    pub fn plain(field: Field<Root, V>) -> Self {
        Selector {
            field: field.name(),
            quantifier: Quantifier::Plain,
            access: Access::Single(field.getter()),
        }
    }

    /// Selects a single field value, negating the operator result.
    pub fn negated(field: Field<Root, V>) -> Self {
        Selector {
            quantifier: Quantifier::Not,
            ..Selector::plain(field)
        }
    }

    /// Selects the elements of a collection field; at least one must match.
    pub fn any<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Selector::each(field, Quantifier::Any)
    }

    /// Selects the elements of a collection field; every one must match.
    pub fn all<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Selector::each(field, Quantifier::All)
    }

    /// Selects the elements of a collection field; none may match.
    pub fn none<C>(field: Field<Root, C>) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Selector::each(field, Quantifier::NoneOf)
    }

    fn each<C>(field: Field<Root, C>, quantifier: Quantifier) -> Self
    where
        Root: 'static,
        C: AsRef<[V]> + 'static,
    {
        Selector {
            field: field.name(),
            quantifier,
            access: Access::Each(elements(move |record| {
                AsRef::<[V]>::as_ref(field.get(record))
            })),
        }
    }

    /// Returns the selected field name.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Returns the quantifier.
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    pub(crate) fn access(&self) -> &Access<Root, V> {
        &self.access
    }
}

fn elements<Root, V, F>(get: F) -> Elements<Root, V>
where
    F: for<'a> Fn(&'a Root) -> &'a [V] + Send + Sync + 'static,
{
    Arc::new(get)
}

impl<Root, V> Clone for Selector<Root, V> {
    fn clone(&self) -> Self {
        Selector {
            field: self.field,
            quantifier: self.quantifier,
            access: self.access.clone(),
        }
    }
}

impl<Root, V> fmt::Debug for Selector<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Selector")
            .field("field", &self.field)
            .field("quantifier", &self.quantifier)
            .finish()
    }
}

/// One step contributed by the builder.
pub enum Action<Root, V> {
    /// Field selection; must come first.
    Select(Selector<Root, V>),
    /// `==`
    EqualTo(V),
    /// `!=`
    NotEqualTo(V),
    /// `>`
    GreaterThan(V),
    /// `>=`
    GreaterOrEqual(V),
    /// `<`
    LessThan(V),
    /// `<=`
    LessOrEqual(V),
    /// `BEGINSWITH`
    BeginsWith(V, Insensitivity),
    /// `ENDSWITH`
    EndsWith(V, Insensitivity),
    /// `CONTAINS`
    Contains(V, Insensitivity),
    /// `LIKE`
    Like(Pattern),
    /// `MATCHES`
    Matches(Pattern),
    /// `IN`
    In(Vec<V>),
}

impl<Root, V> Action<Root, V> {
    /// Returns the operator of an operator action, `None` for a selection.
    pub fn op(&self) -> Option<Op> {
        let op = match self {
            Action::Select(_) => return None,
            Action::EqualTo(_) => Op::Eq,
            Action::NotEqualTo(_) => Op::Ne,
            Action::GreaterThan(_) => Op::Gt,
            Action::GreaterOrEqual(_) => Op::Gte,
            Action::LessThan(_) => Op::Lt,
            Action::LessOrEqual(_) => Op::Lte,
            Action::BeginsWith(..) => Op::BeginsWith,
            Action::EndsWith(..) => Op::EndsWith,
            Action::Contains(..) => Op::Contains,
            Action::Like(_) => Op::Like,
            Action::Matches(_) => Op::Matches,
            Action::In(_) => Op::In,
        };
        Some(op)
    }

    /// Returns `true` for comparison and matching actions.
    pub fn is_operator(&self) -> bool {
        self.op().is_some()
    }
}

impl<Root, V: Clone> Clone for Action<Root, V> {
    fn clone(&self) -> Self {
        match self {
            Action::Select(selector) => Action::Select(selector.clone()),
            Action::EqualTo(v) => Action::EqualTo(v.clone()),
            Action::NotEqualTo(v) => Action::NotEqualTo(v.clone()),
            Action::GreaterThan(v) => Action::GreaterThan(v.clone()),
            Action::GreaterOrEqual(v) => Action::GreaterOrEqual(v.clone()),
            Action::LessThan(v) => Action::LessThan(v.clone()),
            Action::LessOrEqual(v) => Action::LessOrEqual(v.clone()),
            Action::BeginsWith(v, flags) => Action::BeginsWith(v.clone(), *flags),
            Action::EndsWith(v, flags) => Action::EndsWith(v.clone(), *flags),
            Action::Contains(v, flags) => Action::Contains(v.clone(), *flags),
            Action::Like(pattern) => Action::Like(pattern.clone()),
            Action::Matches(pattern) => Action::Matches(pattern.clone()),
            Action::In(values) => Action::In(values.clone()),
        }
    }
}

impl<Root, V: fmt::Debug> fmt::Debug for Action<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Select(selector) => f.debug_tuple("Select").field(selector).finish(),
            Action::EqualTo(v) => f.debug_tuple("EqualTo").field(v).finish(),
            Action::NotEqualTo(v) => f.debug_tuple("NotEqualTo").field(v).finish(),
            Action::GreaterThan(v) => f.debug_tuple("GreaterThan").field(v).finish(),
            Action::GreaterOrEqual(v) => f.debug_tuple("GreaterOrEqual").field(v).finish(),
            Action::LessThan(v) => f.debug_tuple("LessThan").field(v).finish(),
            Action::LessOrEqual(v) => f.debug_tuple("LessOrEqual").field(v).finish(),
            Action::BeginsWith(v, flags) => {
                f.debug_tuple("BeginsWith").field(v).field(flags).finish()
            }
            Action::EndsWith(v, flags) => f.debug_tuple("EndsWith").field(v).field(flags).finish(),
            Action::Contains(v, flags) => f.debug_tuple("Contains").field(v).field(flags).finish(),
            Action::Like(pattern) => f.debug_tuple("Like").field(pattern).finish(),
            Action::Matches(pattern) => f.debug_tuple("Matches").field(pattern).finish(),
            Action::In(values) => f.debug_tuple("In").field(values).finish(),
        }
    }
}

/// Ordered, append-only list of actions.
pub struct ActionSequence<Root, V> {
    actions: Vec<Action<Root, V>>,
}

impl<Root, V> ActionSequence<Root, V> {
    /// Creates an empty sequence.
    ///
    /// An empty sequence compiles to the universal-true operation.
    pub fn new() -> Self {
        ActionSequence {
            actions: Vec::new(),
        }
    }

    pub(crate) fn starting_with(selector: Selector<Root, V>) -> Self {
        ActionSequence {
            actions: vec![Action::Select(selector)],
        }
    }

    /// Appends an action to the end of the sequence.
    pub fn append(&mut self, action: Action<Root, V>) {
        self.actions.push(action);
    }

    /// Returns the actions in insertion order.
    pub fn as_slice(&self) -> &[Action<Root, V>] {
        &self.actions
    }

    /// Iterates the actions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Action<Root, V>> {
        self.actions.iter()
    }

    /// Returns the number of actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns `true` if the sequence holds no action.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl<Root, V> Default for ActionSequence<Root, V> {
    fn default() -> Self {
        ActionSequence::new()
    }
}

impl<Root, V: Clone> Clone for ActionSequence<Root, V> {
    fn clone(&self) -> Self {
        ActionSequence {
            actions: self.actions.clone(),
        }
    }
}

impl<Root, V: fmt::Debug> fmt::Debug for ActionSequence<Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.actions).finish()
    }
}
