//! Boolean composition of predicates.
//!
//! A [`CompoundPredicate`] is a tree of AND, OR and NOT nodes whose leaves
//! are single-field predicates. Leaves may compare values of different types,
//! so children are held as type-erased [`Expression`]s.
//!
//! AND is satisfied when every child is, OR when at least one child is, NOT
//! when its child is not. Children evaluate left to right and stop at the
//! first decisive result.

use std::fmt;

use crate::observability::log_trace;
use crate::predicate::Predicate;
use crate::resolved::CanonicalForm;
use crate::value::Matchable;

/// A leaf of the tree with its value type erased.
trait Leaf<Root>: Send + Sync {
    fn evaluate(&self, record: &Root) -> bool;

    fn write_canonical<'p>(&'p self, out: &mut CanonicalForm<'p>);

    fn clone_leaf(&self) -> Box<dyn Leaf<Root>>;
}

impl<Root, V> Leaf<Root> for Predicate<Root, V>
where
    Root: 'static,
    V: Matchable + Clone + Send + Sync + 'static,
{
    fn evaluate(&self, record: &Root) -> bool {
        Predicate::evaluate(self, record)
    }

    fn write_canonical<'p>(&'p self, out: &mut CanonicalForm<'p>) {
        self.compile().write_canonical(out);
    }

    fn clone_leaf(&self) -> Box<dyn Leaf<Root>> {
        Box::new(self.clone())
    }
}

enum Node<Root> {
    Simple(Box<dyn Leaf<Root>>),
    Compound(CompoundPredicate<Root>),
}

/// Either a single-field predicate or a compound predicate.
///
/// Built through `From`/`Into` from [`Predicate`] and [`CompoundPredicate`].
pub struct Expression<Root> {
    node: Node<Root>,
}

impl<Root> Expression<Root> {
    /// Returns `true` if `record` satisfies the expression.
    pub fn evaluate(&self, record: &Root) -> bool {
        match &self.node {
            Node::Simple(leaf) => leaf.evaluate(record),
            Node::Compound(compound) => compound.evaluate(record),
        }
    }

    /// Returns the compound predicate if this is one.
    pub fn as_compound(&self) -> Option<&CompoundPredicate<Root>> {
        match &self.node {
            Node::Simple(_) => None,
            Node::Compound(compound) => Some(compound),
        }
    }

    /// Returns `true` for compound expressions.
    pub fn is_compound(&self) -> bool {
        self.as_compound().is_some()
    }

    /// Appends the canonical text of this expression to `out`.
    pub fn write_canonical<'p>(&'p self, out: &mut CanonicalForm<'p>) {
        match &self.node {
            Node::Simple(leaf) => leaf.write_canonical(out),
            Node::Compound(compound) => compound.write_canonical(out),
        }
    }

    /// Renders the canonical text and parameters.
    pub fn canonical(&self) -> CanonicalForm<'_> {
        let mut out = CanonicalForm::new();
        self.write_canonical(&mut out);
        out
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(Visit<'a, Root>),
    {
        match &self.node {
            Node::Simple(_) => visit(Visit::Leaf { expr: self, depth }),
            Node::Compound(compound) => compound.walk_at(depth, visit),
        }
    }
}

impl<Root, V> From<Predicate<Root, V>> for Expression<Root>
where
    Root: 'static,
    V: Matchable + Clone + Send + Sync + 'static,
{
    fn from(predicate: Predicate<Root, V>) -> Self {
        Expression {
            node: Node::Simple(Box::new(predicate)),
        }
    }
}

impl<Root> From<CompoundPredicate<Root>> for Expression<Root> {
    fn from(compound: CompoundPredicate<Root>) -> Self {
        Expression {
            node: Node::Compound(compound),
        }
    }
}

impl<Root> Clone for Expression<Root> {
    fn clone(&self) -> Self {
        let node = match &self.node {
            Node::Simple(leaf) => Node::Simple(leaf.clone_leaf()),
            Node::Compound(compound) => Node::Compound(compound.clone()),
        };
        Expression { node }
    }
}

impl<Root> fmt::Display for Expression<Root> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.canonical(), f)
    }
}

impl<Root> fmt::Debug for Expression<Root> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression")
            .field(&self.canonical().text())
            .finish()
    }
}

/// Logical connective of a compound node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Connective {
    /// Conjunction of every child.
    And,
    /// Disjunction of the children.
    Or,
    /// Negation of the single child.
    Not,
}

impl Connective {
    /// Returns the canonical keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
            Connective::Not => "NOT",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Node reported by [`CompoundPredicate::walk`].
pub enum Visit<'a, Root> {
    /// A compound node, reported before its children.
    Compound {
        node: &'a CompoundPredicate<Root>,
        depth: usize,
    },
    /// A single-field predicate.
    Leaf {
        expr: &'a Expression<Root>,
        depth: usize,
    },
}

impl<Root> Visit<'_, Root> {
    /// Nesting depth; the root is at depth 0.
    pub fn depth(&self) -> usize {
        match self {
            Visit::Compound { depth, .. } | Visit::Leaf { depth, .. } => *depth,
        }
    }
}

/// AND / OR / NOT over predicates.
///
/// ```
/// use sift::{Field, Predicate};
///
/// struct User {
///     name: String,
///     age: u32,
/// }
///
/// const NAME: Field<User, String> = Field::new("name", |user| &user.name);
/// const AGE: Field<User, u32> = Field::new("age", |user| &user.age);
///
/// let query = Predicate::new(AGE)
///     .greater_than(60)
///     .or(Predicate::new(NAME).equal_to("Eden".to_string()));
///
/// let eden = User { name: "Eden".into(), age: 25 };
/// assert!(query.evaluate(&eden));
/// assert_eq!(query.canonical().text(), "age > $1 OR name == $2");
/// ```
pub enum CompoundPredicate<Root> {
    /// Every child holds. An empty AND holds.
    And(Vec<Expression<Root>>),
    /// At least one child holds. An empty OR never holds.
    Or(Vec<Expression<Root>>),
    /// The child does not hold.
    Not(Box<Expression<Root>>),
}

impl<Root> CompoundPredicate<Root> {
    /// AND over `children`.
    pub fn all_of<I, E>(children: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expression<Root>>,
    {
        CompoundPredicate::And(children.into_iter().map(Into::into).collect())
    }

    /// OR over `children`.
    pub fn any_of<I, E>(children: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Expression<Root>>,
    {
        CompoundPredicate::Or(children.into_iter().map(Into::into).collect())
    }

    /// NOT of `child`.
    pub fn negate(child: impl Into<Expression<Root>>) -> Self {
        CompoundPredicate::Not(Box::new(child.into()))
    }

    /// Combines with `other` under AND. An AND node takes `other` as a new
    /// last child instead of nesting.
    pub fn and(self, other: impl Into<Expression<Root>>) -> Self {
        match self {
            CompoundPredicate::And(mut children) => {
                children.push(other.into());
                CompoundPredicate::And(children)
            }
            compound => CompoundPredicate::And(vec![compound.into(), other.into()]),
        }
    }

    /// Combines with `other` under OR. An OR node takes `other` as a new
    /// last child instead of nesting.
    pub fn or(self, other: impl Into<Expression<Root>>) -> Self {
        match self {
            CompoundPredicate::Or(mut children) => {
                children.push(other.into());
                CompoundPredicate::Or(children)
            }
            compound => CompoundPredicate::Or(vec![compound.into(), other.into()]),
        }
    }

    /// Wraps in a NOT node.
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        CompoundPredicate::negate(self)
    }

    /// Returns the connective of this node.
    pub fn connective(&self) -> Connective {
        match self {
            CompoundPredicate::And(_) => Connective::And,
            CompoundPredicate::Or(_) => Connective::Or,
            CompoundPredicate::Not(_) => Connective::Not,
        }
    }

    /// Returns the direct children; a NOT node has exactly one.
    pub fn children(&self) -> &[Expression<Root>] {
        match self {
            CompoundPredicate::And(children) | CompoundPredicate::Or(children) => children,
            CompoundPredicate::Not(child) => std::slice::from_ref(&**child),
        }
    }

    /// Returns `true` if `record` satisfies the tree.
    pub fn evaluate(&self, record: &Root) -> bool {
        let matched = match self {
            CompoundPredicate::And(children) => children.iter().all(|c| c.evaluate(record)),
            CompoundPredicate::Or(children) => children.iter().any(|c| c.evaluate(record)),
            CompoundPredicate::Not(child) => !child.evaluate(record),
        };
        log_trace!(
            event = "compound_evaluated",
            connective = self.connective().as_str(),
            matched
        );
        matched
    }

    /// Appends the canonical text of the tree to `out`.
    ///
    /// Nested AND/OR children are parenthesized; NOT renders as
    /// `NOT (child)`. An empty AND renders `TRUEPREDICATE` and an empty OR
    /// `FALSEPREDICATE`.
    pub fn write_canonical<'p>(&'p self, out: &mut CanonicalForm<'p>) {
        match self {
            CompoundPredicate::And(children) | CompoundPredicate::Or(children) => {
                if children.is_empty() {
                    out.push_text(match self.connective() {
                        Connective::Or => "FALSEPREDICATE",
                        _ => "TRUEPREDICATE",
                    });
                    return;
                }
                let separator = match self.connective() {
                    Connective::Or => " OR ",
                    _ => " AND ",
                };
                for (index, child) in children.iter().enumerate() {
                    if index > 0 {
                        out.push_text(separator);
                    }
                    write_child(child, out);
                }
            }
            CompoundPredicate::Not(child) => {
                out.push_text("NOT (");
                child.write_canonical(out);
                out.push_text(")");
            }
        }
    }

    /// Renders the canonical text and parameters.
    pub fn canonical(&self) -> CanonicalForm<'_> {
        let mut out = CanonicalForm::new();
        self.write_canonical(&mut out);
        out
    }

    /// Visits every node in pre-order: a compound node before its children,
    /// children left to right.
    pub fn walk<'a, F>(&'a self, mut visit: F)
    where
        F: FnMut(Visit<'a, Root>),
    {
        self.walk_at(0, &mut visit);
    }

    fn walk_at<'a, F>(&'a self, depth: usize, visit: &mut F)
    where
        F: FnMut(Visit<'a, Root>),
    {
        visit(Visit::Compound { node: self, depth });
        for child in self.children() {
            child.walk_at(depth + 1, visit);
        }
    }
}

fn write_child<'p, Root>(child: &'p Expression<Root>, out: &mut CanonicalForm<'p>) {
    let grouped = child
        .as_compound()
        .is_some_and(|c| c.connective() != Connective::Not);
    if grouped {
        out.push_text("(");
        child.write_canonical(out);
        out.push_text(")");
    } else {
        child.write_canonical(out);
    }
}

impl<Root> Clone for CompoundPredicate<Root> {
    fn clone(&self) -> Self {
        match self {
            CompoundPredicate::And(children) => CompoundPredicate::And(children.clone()),
            CompoundPredicate::Or(children) => CompoundPredicate::Or(children.clone()),
            CompoundPredicate::Not(child) => CompoundPredicate::Not(child.clone()),
        }
    }
}

impl<Root> fmt::Debug for CompoundPredicate<Root> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(match self.connective() {
            Connective::And => "And",
            Connective::Or => "Or",
            Connective::Not => "Not",
        })
        .field(&self.children())
        .finish()
    }
}

impl<Root> fmt::Display for CompoundPredicate<Root> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.canonical(), f)
    }
}
