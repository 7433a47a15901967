//! Property-based tests for sift using proptest.

use proptest::prelude::*;
use sift::{not, select, CompoundPredicate, Evaluate, Field, Fold, Predicate};

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    value: i64,
    name: String,
    active: bool,
    scores: Vec<i64>,
}

const VALUE: Field<TestItem, i64> = Field::new("value", |item| &item.value);
const NAME: Field<TestItem, String> = Field::new("name", |item| &item.name);
const ACTIVE: Field<TestItem, bool> = Field::new("active", |item| &item.active);
const SCORES: Field<TestItem, Vec<i64>> = Field::new("scores", |item| &item.scores);

// Strategy to generate test items
fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (
        -1000i64..1000,
        "[a-zA-Z]{1,10}",
        any::<bool>(),
        prop::collection::vec(-100i64..100, 0..8),
    )
        .prop_map(|(value, name, active, scores)| TestItem {
            value,
            name,
            active,
            scores,
        })
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// NOT inverts its child for every record.
    #[test]
    fn not_inverts(
        item in test_item_strategy(),
        threshold in -1000i64..1000,
    ) {
        let predicate = select(VALUE).greater_than(threshold);
        let expected = !predicate.evaluate(&item);
        prop_assert_eq!(predicate.not().evaluate(&item), expected);
    }

    /// AND is the conjunction of its operands.
    #[test]
    fn and_is_conjunction(
        item in test_item_strategy(),
        threshold in -1000i64..1000,
        active in any::<bool>(),
    ) {
        let p = select(VALUE).less_or_equal(threshold);
        let q = select(ACTIVE).equal_to(active);
        let expected = p.evaluate(&item) && q.evaluate(&item);
        prop_assert_eq!(p.and(q).evaluate(&item), expected);
    }

    /// OR is the disjunction of its operands.
    #[test]
    fn or_is_disjunction(
        item in test_item_strategy(),
        threshold in -1000i64..1000,
        prefix in "[a-z]{1,3}",
    ) {
        let p = select(VALUE).greater_or_equal(threshold);
        let q = select(NAME).begins_with(prefix, Fold::Case);
        let expected = p.evaluate(&item) || q.evaluate(&item);
        prop_assert_eq!(p.or(q).evaluate(&item), expected);
    }

    /// Double negation through two NOT nodes restores the verdict.
    #[test]
    fn double_not_restores(
        item in test_item_strategy(),
        threshold in -1000i64..1000,
    ) {
        let predicate = select(VALUE).not_equal_to(threshold);
        let expected = predicate.evaluate(&item);
        prop_assert_eq!(predicate.not().not().evaluate(&item), expected);
    }

    /// A negated selection is the negation of the plain one.
    #[test]
    fn negated_selection_matches_not(
        item in test_item_strategy(),
        threshold in -1000i64..1000,
    ) {
        let plain = select(VALUE).less_than(threshold).evaluate(&item);
        let negated = not(VALUE).less_than(threshold).evaluate(&item);
        prop_assert_eq!(negated, !plain);
    }

    /// Only the first operator of a chain is honored.
    #[test]
    fn first_operator_wins(
        item in test_item_strategy(),
        low in -1000i64..1000,
        high in -1000i64..1000,
    ) {
        let chained = select(VALUE).greater_than(low).less_than(high);
        let first = select(VALUE).greater_than(low);
        prop_assert_eq!(chained.evaluate(&item), first.evaluate(&item));
        prop_assert_eq!(chained.canonical(), first.canonical());
    }

    /// Compiling twice yields the same canonical form.
    #[test]
    fn compile_is_idempotent(
        threshold in -1000i64..1000,
        prefix in "[a-z]{0,5}",
    ) {
        let predicate = select(VALUE)
            .greater_than(threshold)
            .or(select(NAME).contains(prefix, [Fold::Case, Fold::Diacritic]));
        let form = predicate.canonical();
        prop_assert_eq!(&form, &predicate.canonical());
        prop_assert_eq!(predicate.to_string(), form.text());
    }

    /// ANY agrees with an iterator `any` over the elements.
    #[test]
    fn any_quantifier_agrees_with_iterator(
        item in test_item_strategy(),
        threshold in -100i64..100,
    ) {
        let predicate: Predicate<TestItem, i64> = sift::any(SCORES).greater_than(threshold);
        let expected = item.scores.iter().any(|s| *s > threshold);
        prop_assert_eq!(predicate.evaluate(&item), expected);
    }

    /// ALL agrees with an iterator `all` over the elements.
    #[test]
    fn all_quantifier_agrees_with_iterator(
        item in test_item_strategy(),
        threshold in -100i64..100,
    ) {
        let predicate: Predicate<TestItem, i64> = sift::all(SCORES).greater_than(threshold);
        let expected = item.scores.iter().all(|s| *s > threshold);
        prop_assert_eq!(predicate.evaluate(&item), expected);
    }

    /// NONE is the negation of ANY.
    #[test]
    fn none_is_not_any(
        item in test_item_strategy(),
        target in -100i64..100,
    ) {
        let none_match: Predicate<TestItem, i64> = sift::none(SCORES).equal_to(target);
        let any_match: Predicate<TestItem, i64> = sift::any(SCORES).equal_to(target);
        prop_assert_eq!(none_match.evaluate(&item), !any_match.evaluate(&item));
    }

    /// Case-insensitive prefix matching ignores the case of both sides.
    #[test]
    fn case_insensitive_prefix(
        name in "[a-zA-Z]{1,10}",
        len in 1usize..10,
    ) {
        let prefix: String = name.chars().take(len).collect::<String>().to_uppercase();
        let item = TestItem { value: 0, name, active: false, scores: vec![] };
        prop_assert!(select(NAME).begins_with(prefix, Fold::Case).evaluate(&item));
    }

    /// Filter never grows the collection and keeps input order.
    #[test]
    fn filter_keeps_order(
        items in prop::collection::vec(test_item_strategy(), 0..50),
        threshold in -1000i64..1000,
    ) {
        let predicate = select(VALUE).greater_than(threshold);
        let results = predicate.filter(&items);

        prop_assert!(results.len() <= items.len());
        prop_assert_eq!(results.len(), predicate.count(&items));

        let expected: Vec<i64> = items.iter().filter(|i| i.value > threshold).map(|i| i.value).collect();
        let actual: Vec<i64> = results.iter().map(|i| i.value).collect();
        prop_assert_eq!(actual, expected);
    }

    /// find() agrees with filter().first().
    #[test]
    fn find_consistent_with_filter(
        items in prop::collection::vec(test_item_strategy(), 0..50),
        active in any::<bool>(),
    ) {
        let predicate = select(ACTIVE).equal_to(active);
        let found = predicate.find(&items).map(|i| i.value);
        let first = predicate.filter(&items).first().map(|i| i.value);
        prop_assert_eq!(found, first);
    }

    /// An empty AND keeps everything, an empty OR keeps nothing.
    #[test]
    fn empty_compounds(
        items in prop::collection::vec(test_item_strategy(), 0..20),
    ) {
        let everything = CompoundPredicate::<TestItem>::all_of(Vec::<Predicate<TestItem, i64>>::new());
        let nothing = CompoundPredicate::<TestItem>::any_of(Vec::<Predicate<TestItem, i64>>::new());
        prop_assert_eq!(everything.count(&items), items.len());
        prop_assert_eq!(nothing.count(&items), 0);
    }
}
