//! Property-based tests for the grouped aggregation fold.
//!
//! The fold promises four things for any batch: totals at every level are
//! consistent, no record is lost or duplicated, sibling order is first-seen,
//! and the whole thing is deterministic.

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{Value, json};

use super::selector::{KeySelector, MeasureSelector};
use super::service::Aggregator;
use super::tree::GroupNode;

/// Strategy for a bank name, including the empty value so the sentinel
/// bucket shows up in generated batches.
fn bank_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("BNB".to_string()),
        Just("BCB".to_string()),
        Just("BGF".to_string()),
        Just("IBB".to_string()),
        Just(String::new()),
    ]
}

/// Strategy for a payment day within one week, as the wire's ISO string.
fn day() -> impl Strategy<Value = String> {
    (1u32..=7).prop_map(|d| format!("2024-01-{d:02}"))
}

/// Strategy for an amount in whole francs, negatives included.
fn amount() -> impl Strategy<Value = i64> {
    -1_000_000i64..1_000_000i64
}

/// Strategy for one wire record.
fn record() -> impl Strategy<Value = Value> {
    (bank_name(), day(), amount()).prop_map(|(banque, date, montant)| {
        json!({"banque": banque, "date": date, "montant": montant})
    })
}

fn batch() -> impl Strategy<Value = Vec<Value>> {
    proptest::collection::vec(record(), 0..60)
}

fn bank_date_aggregator() -> Aggregator<Value> {
    Aggregator::new(
        vec![KeySelector::field("banque"), KeySelector::field("date")],
        vec![MeasureSelector::field("montant")],
    )
}

/// A node is consistent when its count and every measure total agree with
/// its children (or with its own items at the deepest level).
fn subtree_consistent(node: &GroupNode<Value>) -> bool {
    if node.children.is_empty() {
        let item_sum: Decimal = node
            .items
            .iter()
            .map(|record| super::json::decimal_field(record, "montant"))
            .sum();
        node.count == node.items.len() && node.totals.get("montant") == item_sum
    } else {
        let child_sum: Decimal = node.children.iter().map(|c| c.totals.get("montant")).sum();
        let child_count: usize = node.children.iter().map(|c| c.count).sum();
        node.items.is_empty()
            && node.totals.get("montant") == child_sum
            && node.count == child_count
            && node.children.iter().all(subtree_consistent)
    }
}

/// Serialized form of every record, sorted, for multiset comparison.
fn fingerprint<'r>(records: impl Iterator<Item = &'r Value>) -> Vec<String> {
    let mut out: Vec<String> = records.map(ToString::to_string).collect();
    out.sort();
    out
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: the root total equals the flat sum over the batch, and
    /// every node's total equals the sum of its children's.
    #[test]
    fn prop_totals_are_consistent(records in batch()) {
        let expected: i64 = records
            .iter()
            .filter_map(|r| r["montant"].as_i64())
            .sum();

        let tree = bank_date_aggregator().aggregate(records);

        prop_assert_eq!(tree.totals.get("montant"), Decimal::from(expected));
        let child_sum: Decimal = tree.children.iter().map(|c| c.totals.get("montant")).sum();
        prop_assert_eq!(tree.totals.get("montant"), child_sum);
        prop_assert!(tree.children.iter().all(subtree_consistent));
    }

    /// Property 2: aggregation partitions the batch. Every record lands in
    /// exactly one deepest-level group, none dropped, none duplicated.
    #[test]
    fn prop_no_record_lost_or_duplicated(records in batch()) {
        let before = fingerprint(records.iter());

        let tree = bank_date_aggregator().aggregate(records);

        prop_assert_eq!(tree.records().len(), tree.count);
        let after = fingerprint(tree.records().into_iter());
        prop_assert_eq!(before, after);
    }

    /// Property 3: the same batch aggregates to a structurally equal tree
    /// on every run.
    #[test]
    fn prop_deterministic(records in batch()) {
        let aggregator = bank_date_aggregator();
        let first = aggregator.aggregate(records.clone());
        let second = aggregator.aggregate(records);
        prop_assert_eq!(first, second);
    }

    /// Property 4: sibling groups appear in first-seen order of their keys.
    #[test]
    fn prop_group_order_is_first_seen(records in batch()) {
        let mut expected: Vec<String> = Vec::new();
        for record in &records {
            let banque = record["banque"].as_str().unwrap_or_default().to_string();
            if !expected.contains(&banque) {
                expected.push(banque);
            }
        }

        let tree = bank_date_aggregator().aggregate(records);

        let keys: Vec<String> = tree.children.iter().map(|n| n.key.to_string()).collect();
        prop_assert_eq!(keys, expected);
    }

    /// Property 5: explicit re-sorting reorders groups but never changes
    /// totals, counts, or membership.
    #[test]
    fn prop_sorting_preserves_content(records in batch()) {
        let tree = bank_date_aggregator().aggregate(records);
        let mut sorted = tree.clone();
        sorted.sort_by_key();
        sorted.sort_by_total("montant");

        prop_assert_eq!(sorted.count, tree.count);
        prop_assert_eq!(&sorted.totals, &tree.totals);
        prop_assert_eq!(
            fingerprint(sorted.records().into_iter()),
            fingerprint(tree.records().into_iter())
        );
    }
}
