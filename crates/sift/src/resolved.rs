//! Compiled leaf operations.
//!
//! [`Predicate::compile`](crate::Predicate::compile) reduces an action
//! sequence to one [`ResolvedOperation`]. The operation evaluates records
//! directly and renders a [`CanonicalForm`]: text with positional
//! placeholders plus the bound parameters, so operand values never end up
//! inside the text.

use std::fmt;

use crate::action::{Access, Action, Selector};
use crate::op::{Insensitivity, Op, Quantifier};
use crate::pattern::Pattern;
use crate::text::fold;
use crate::value::{Matchable, Value};

/// Operand of a resolved operation, borrowed from the predicate.
pub enum Operand<'p, V> {
    /// No operand (universal true).
    None,
    /// Single comparison value.
    Value(&'p V),
    /// Candidate set of `IN`.
    Set(&'p [V]),
    /// Compiled pattern of `LIKE` / `MATCHES`.
    Pattern(&'p Pattern),
}

impl<V> Clone for Operand<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Operand<'_, V> {}

impl<V: fmt::Debug> fmt::Debug for Operand<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::None => f.write_str("None"),
            Operand::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Operand::Set(values) => f.debug_tuple("Set").field(values).finish(),
            Operand::Pattern(pattern) => f.debug_tuple("Pattern").field(pattern).finish(),
        }
    }
}

/// The single operation a predicate chain compiles to.
pub struct ResolvedOperation<'p, Root, V> {
    selector: Option<&'p Selector<Root, V>>,
    op: Op,
    operand: Operand<'p, V>,
    insensitivity: Insensitivity,
}

impl<'p, Root, V> ResolvedOperation<'p, Root, V> {
    /// The operation that holds for every record.
    pub fn universal() -> Self {
        ResolvedOperation {
            selector: None,
            op: Op::True,
            operand: Operand::None,
            insensitivity: Insensitivity::NONE,
        }
    }

    /// Resolves `action` applied to `selector`.
    ///
    /// A selection action in operator position resolves to universal true.
    pub(crate) fn resolve(selector: &'p Selector<Root, V>, action: &'p Action<Root, V>) -> Self {
        let none = Insensitivity::NONE;
        let (op, operand, insensitivity) = match action {
            Action::Select(_) => return ResolvedOperation::universal(),
            Action::EqualTo(v) => (Op::Eq, Operand::Value(v), none),
            Action::NotEqualTo(v) => (Op::Ne, Operand::Value(v), none),
            Action::GreaterThan(v) => (Op::Gt, Operand::Value(v), none),
            Action::GreaterOrEqual(v) => (Op::Gte, Operand::Value(v), none),
            Action::LessThan(v) => (Op::Lt, Operand::Value(v), none),
            Action::LessOrEqual(v) => (Op::Lte, Operand::Value(v), none),
            Action::BeginsWith(v, flags) => (Op::BeginsWith, Operand::Value(v), *flags),
            Action::EndsWith(v, flags) => (Op::EndsWith, Operand::Value(v), *flags),
            Action::Contains(v, flags) => (Op::Contains, Operand::Value(v), *flags),
            Action::Like(pattern) => (Op::Like, Operand::Pattern(pattern), none),
            Action::Matches(pattern) => (Op::Matches, Operand::Pattern(pattern), none),
            Action::In(values) => (Op::In, Operand::Set(values), none),
        };

        ResolvedOperation {
            selector: Some(selector),
            op,
            operand,
            insensitivity,
        }
    }

    /// Returns `true` for the universal-true operation.
    pub fn is_universal(&self) -> bool {
        self.selector.is_none()
    }

    /// Returns the selected field, `None` for universal true.
    pub fn field(&self) -> Option<&'static str> {
        self.selector.map(Selector::field)
    }

    /// Returns the quantifier, `None` for universal true.
    pub fn quantifier(&self) -> Option<Quantifier> {
        self.selector.map(Selector::quantifier)
    }

    /// Returns the operator.
    pub fn op(&self) -> Op {
        self.op
    }

    /// Returns the operand.
    pub fn operand(&self) -> Operand<'p, V> {
        self.operand
    }

    /// Returns the insensitivity flags (empty for non-text operators).
    pub fn insensitivity(&self) -> Insensitivity {
        self.insensitivity
    }
}

impl<'p, Root, V: Matchable> ResolvedOperation<'p, Root, V> {
    /// Evaluates the operation against a record.
    pub fn evaluate(&self, record: &Root) -> bool {
        let Some(selector) = self.selector else {
            return true;
        };

        match (selector.access(), selector.quantifier()) {
            (Access::Single(get), Quantifier::Not) => !self.holds(get(record)),
            (Access::Single(get), _) => self.holds(get(record)),
            (Access::Each(get), Quantifier::All) => get(record).iter().all(|v| self.holds(v)),
            (Access::Each(get), Quantifier::NoneOf) => !get(record).iter().any(|v| self.holds(v)),
            (Access::Each(get), _) => get(record).iter().any(|v| self.holds(v)),
        }
    }

    /// Returns `true` if the operator holds for one subject value.
    fn holds(&self, subject: &V) -> bool {
        let subject = subject.to_value();

        match self.operand {
            Operand::None => true,
            Operand::Value(operand) => {
                let operand = operand.to_value();
                if self.op.is_text_op() {
                    text_match(self.op, &subject, &operand, self.insensitivity)
                } else {
                    compare(self.op, &subject, &operand)
                }
            }
            Operand::Set(values) => values.iter().any(|v| subject.same_as(&v.to_value())),
            Operand::Pattern(pattern) => subject.as_str().is_some_and(|s| pattern.is_match(s)),
        }
    }

    /// Appends the canonical text of this operation to `out`.
    pub fn write_canonical(&self, out: &mut CanonicalForm<'p>) {
        let Some(selector) = self.selector else {
            out.push_text(Op::True.as_str());
            return;
        };

        let prefix = selector.quantifier().prefix();
        if !prefix.is_empty() {
            out.push_text(prefix);
            out.push_text(" ");
        }
        out.push_text(selector.field());
        out.push_text(" ");
        out.push_text(self.op.as_str());
        if self.op.is_text_op() && !self.insensitivity.is_empty() {
            out.push_text("[");
            out.push_text(&self.insensitivity.flags());
            out.push_text("]");
        }
        out.push_text(" ");

        let param = match self.operand {
            Operand::None => Value::None,
            Operand::Value(v) => v.to_value(),
            Operand::Set(values) => values.to_value(),
            Operand::Pattern(pattern) => Value::String(pattern.as_str()),
        };
        out.bind(param);
    }

    /// Renders the canonical form of this operation.
    pub fn canonical(&self) -> CanonicalForm<'p> {
        let mut out = CanonicalForm::new();
        self.write_canonical(&mut out);
        out
    }
}

impl<Root, V> fmt::Debug for ResolvedOperation<'_, Root, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedOperation")
            .field("field", &self.field())
            .field("quantifier", &self.quantifier())
            .field("op", &self.op)
            .field("insensitivity", &self.insensitivity)
            .finish()
    }
}

fn compare(op: Op, subject: &Value<'_>, operand: &Value<'_>) -> bool {
    match op {
        Op::Eq => subject.same_as(operand),
        Op::Ne => !subject.same_as(operand),
        _ => subject
            .compare(operand)
            .is_some_and(|ordering| op.eval_ordering(ordering)),
    }
}

fn text_match(op: Op, subject: &Value<'_>, operand: &Value<'_>, flags: Insensitivity) -> bool {
    match (subject, operand) {
        (Value::String(subject), Value::String(operand)) => {
            let subject = fold(subject, flags);
            let operand = fold(operand, flags);
            match op {
                Op::BeginsWith => subject.starts_with(&*operand),
                Op::EndsWith => subject.ends_with(&*operand),
                Op::Contains => subject.contains(&*operand),
                _ => false,
            }
        }
        (Value::List(items), Value::List(needle)) => {
            let run_matches = |run: &[Value<'_>]| {
                run.iter()
                    .zip(needle)
                    .all(|(a, b)| elements_equal(a, b, flags))
            };
            if needle.len() > items.len() {
                return false;
            }
            match op {
                Op::BeginsWith => run_matches(&items[..needle.len()]),
                Op::EndsWith => run_matches(&items[items.len() - needle.len()..]),
                Op::Contains => needle.is_empty() || items.windows(needle.len()).any(run_matches),
                _ => false,
            }
        }
        _ => false,
    }
}

fn elements_equal(a: &Value<'_>, b: &Value<'_>, flags: Insensitivity) -> bool {
    match (a, b) {
        (Value::String(a), Value::String(b)) if !flags.is_empty() => fold(a, flags) == fold(b, flags),
        _ => a.same_as(b),
    }
}

/// Canonical text plus bound parameters.
///
/// Placeholders are numbered `$1`, `$2`, ... in rendering order; the `n`th
/// placeholder refers to `params()[n - 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalForm<'p> {
    text: String,
    params: Vec<Value<'p>>,
}

impl<'p> CanonicalForm<'p> {
    pub(crate) fn new() -> Self {
        CanonicalForm::default()
    }

    /// Returns the text with placeholders.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the bound parameters in placeholder order.
    pub fn params(&self) -> &[Value<'p>] {
        &self.params
    }

    /// Splits into text and parameters.
    pub fn into_parts(self) -> (String, Vec<Value<'p>>) {
        (self.text, self.params)
    }

    pub(crate) fn push_text(&mut self, text: &str) {
        self.text.push_str(text);
    }

    /// Binds a parameter and writes its placeholder.
    pub(crate) fn bind(&mut self, param: Value<'p>) {
        self.params.push(param);
        self.text.push('$');
        self.text.push_str(&self.params.len().to_string());
    }
}

impl fmt::Display for CanonicalForm<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
