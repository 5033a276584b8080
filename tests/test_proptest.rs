// Property-Based Testing with Proptest
// Run with: cargo test --test test_proptest

use near_sdk::test_utils::VMContextBuilder;
use near_sdk::testing_env;
use proptest::prelude::*;
use swap_order_near::{
    coerce_percentage, validator, AssetDescriptor, PaymentSplit, SplitCollection, SplitField,
    SwapOrder, MAX_SPLITS, MIN_SPLITS,
};

#[derive(Clone, Debug)]
enum Op {
    Add,
    Remove(usize),
    SetPercentage(usize, String),
    SetRecipient(usize, String),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        (0usize..8).prop_map(Op::Remove),
        (0usize..8, "-?[0-9]{0,4}|[a-z]{0,3}").prop_map(|(i, v)| Op::SetPercentage(i, v)),
        (0usize..8, "[a-z.]{0,6}").prop_map(|(i, v)| Op::SetRecipient(i, v)),
    ]
}

fn apply(collection: &mut SplitCollection, op: &Op) {
    match op {
        Op::Add => {
            collection.add();
        }
        Op::Remove(i) => {
            collection.remove(*i);
        }
        Op::SetPercentage(i, v) => {
            collection.update(*i, SplitField::Percentage, v);
        }
        Op::SetRecipient(i, v) => {
            collection.update(*i, SplitField::Recipient, v);
        }
    }
}

// ============================================================
// SPLIT COLLECTION PROPERTY TESTS
// ============================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Property: 1 <= len <= 5 after any sequence of mutations
    #[test]
    fn prop_length_stays_in_bounds(ops in prop::collection::vec(op(), 0..40)) {
        let mut collection = SplitCollection::new();
        for op in &ops {
            apply(&mut collection, op);
            prop_assert!(collection.len() >= MIN_SPLITS);
            prop_assert!(collection.len() <= MAX_SPLITS);
        }
    }

    /// Property: add() on a full collection changes nothing
    #[test]
    fn prop_add_at_capacity_is_noop(ops in prop::collection::vec(op(), 0..20)) {
        let mut collection = SplitCollection::new();
        for op in &ops {
            apply(&mut collection, op);
        }
        while collection.can_add() {
            collection.add();
        }
        let before = collection.clone();
        prop_assert!(!collection.add());
        prop_assert_eq!(collection, before);
    }

    /// Property: total equals the plain sum and is stable across recomputation
    #[test]
    fn prop_total_is_sum(ops in prop::collection::vec(op(), 0..40)) {
        let mut collection = SplitCollection::new();
        for op in &ops {
            apply(&mut collection, op);
        }
        let expected: i64 = collection.iter().map(|s| s.percentage as i64).sum();
        prop_assert_eq!(collection.total_percentage(), expected);
        prop_assert_eq!(
            validator::total_percentage(collection.splits()),
            collection.total_percentage()
        );
    }

    /// Property: coercion never panics and round-trips plain integers
    #[test]
    fn prop_coerce_integers(n in any::<i32>()) {
        prop_assert_eq!(coerce_percentage(&n.to_string()), n);
    }

    /// Property: non-numeric percentage input becomes 0
    #[test]
    fn prop_coerce_garbage_is_zero(s in "[a-zA-Z%]{1,8}") {
        prop_assert_eq!(coerce_percentage(&s), 0);
    }

    /// Property: an order builds iff assets are well-formed, total is 100 and
    /// every recipient is set
    #[test]
    fn prop_build_matches_invariants(
        entries in prop::collection::vec(("[a-z]{0,3}", 0i32..=100), 1..=5),
        offered_amount in "-?[0-9]{1,3}(\\.[0-9]{1,2})?",
    ) {
        // Fresh context per case so receipt log limits are never reached
        testing_env!(VMContextBuilder::new().build());

        let splits: Vec<PaymentSplit> = entries
            .iter()
            .map(|(r, p)| PaymentSplit::new(r.clone(), *p))
            .collect();
        let total: i64 = splits.iter().map(|s| s.percentage as i64).sum();
        let recipients_set = splits.iter().all(|s| !s.recipient.is_empty());

        let offered = AssetDescriptor::native(offered_amount);
        let expected = offered.is_well_formed() && total == 100 && recipients_set;

        let result = SwapOrder::build(
            offered,
            AssetDescriptor::non_fungible("nft.testnet", "1"),
            SplitCollection::from_splits(splits).unwrap(),
        );
        prop_assert_eq!(result.is_ok(), expected);
    }
}
