//! Single-pass grouped aggregation.

use cumul_shared::Totals;
use rust_decimal::Decimal;

use super::selector::{KeySelector, MeasureSelector};
use super::tree::{GroupNode, GroupTree};

/// Folds a flat batch of records into a [`GroupTree`].
///
/// An aggregator is configured once with grouping levels (outermost first)
/// and measures, then applied to each fresh batch. The fold is one forward
/// pass in input order: every record's measures are added to the root and to
/// every node along its key path, and the record itself moves into the
/// deepest node it falls under. Sibling groups appear in first-seen order.
///
/// The fold is total. It never fails, touches nothing but its inputs, and
/// two runs over the same batch produce structurally equal trees.
pub struct Aggregator<R> {
    levels: Vec<KeySelector<R>>,
    measures: Vec<MeasureSelector<R>>,
    measure_names: Vec<String>,
}

impl<R> Aggregator<R> {
    /// Creates an aggregator from grouping levels (outermost first) and
    /// measures. Either list may be empty.
    #[must_use]
    pub fn new(levels: Vec<KeySelector<R>>, measures: Vec<MeasureSelector<R>>) -> Self {
        let measure_names = measures.iter().map(|m| m.name().to_owned()).collect();
        Self {
            levels,
            measures,
            measure_names,
        }
    }

    /// Level names, outermost first.
    pub fn level_names(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(KeySelector::name)
    }

    /// Measure names in declaration order.
    #[must_use]
    pub fn measure_names(&self) -> &[String] {
        &self.measure_names
    }

    /// Aggregates one batch of records, consuming it.
    ///
    /// Empty input yields a tree with zero count, no children, and every
    /// configured measure total at zero. With no levels configured the
    /// records collect in the root's `items`.
    #[must_use]
    pub fn aggregate(&self, records: Vec<R>) -> GroupTree<R> {
        let mut tree = GroupTree::empty(&self.measure_names);

        for record in records {
            let values: Vec<Decimal> = self
                .measures
                .iter()
                .map(|measure| measure.value_for(&record))
                .collect();

            tree.count += 1;
            add_values(&mut tree.totals, &self.measure_names, &values);

            if self.levels.is_empty() {
                tree.items.push(record);
                continue;
            }

            let mut siblings = &mut tree.children;
            for (depth, level) in self.levels.iter().enumerate() {
                let key = level.key_for(&record);
                let index = match siblings.iter().position(|node| node.key == key) {
                    Some(index) => index,
                    None => {
                        siblings.push(GroupNode::new(key, level.name(), &self.measure_names));
                        siblings.len() - 1
                    }
                };

                let node = &mut siblings[index];
                node.count += 1;
                add_values(&mut node.totals, &self.measure_names, &values);

                if depth + 1 == self.levels.len() {
                    node.items.push(record);
                    break;
                }
                siblings = &mut node.children;
            }
        }

        tree
    }
}

fn add_values(totals: &mut Totals, names: &[String], values: &[Decimal]) {
    for (name, value) in names.iter().zip(values) {
        totals.add(name, *value);
    }
}

impl<R> std::fmt::Debug for Aggregator<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Aggregator")
            .field("levels", &self.levels)
            .field("measures", &self.measure_names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};

    fn bank_date_aggregator() -> Aggregator<Value> {
        Aggregator::new(
            vec![KeySelector::field("banque"), KeySelector::field("date")],
            vec![MeasureSelector::field("montant")],
        )
    }

    fn bank_records() -> Vec<Value> {
        vec![
            json!({"banque": "BNB", "date": "2024-01-10", "montant": 1000}),
            json!({"banque": "BNB", "date": "2024-01-10", "montant": 500}),
            json!({"banque": "BNB", "date": "2024-01-11", "montant": 250}),
            json!({"banque": "BCB", "date": "2024-01-10", "montant": 750}),
        ]
    }

    #[test]
    fn test_two_level_bank_scenario() {
        let tree = bank_date_aggregator().aggregate(bank_records());

        assert_eq!(tree.count, 4);
        assert_eq!(tree.totals.get("montant"), dec!(2500));

        let banks: Vec<&str> = tree.children.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(banks, vec!["BNB", "BCB"]);

        let bnb = tree.child("BNB").unwrap();
        assert_eq!(bnb.totals.get("montant"), dec!(1750));
        assert_eq!(bnb.count, 3);
        let bnb_dates: Vec<&str> = bnb.children.iter().map(|n| n.key.as_str()).collect();
        assert_eq!(bnb_dates, vec!["2024-01-10", "2024-01-11"]);
        assert_eq!(bnb.child("2024-01-10").unwrap().totals.get("montant"), dec!(1500));
        assert_eq!(bnb.child("2024-01-10").unwrap().items.len(), 2);
        assert_eq!(bnb.child("2024-01-11").unwrap().totals.get("montant"), dec!(250));

        let bcb = tree.child("BCB").unwrap();
        assert_eq!(bcb.totals.get("montant"), dec!(750));
        assert_eq!(bcb.child("2024-01-10").unwrap().totals.get("montant"), dec!(750));
    }

    #[test]
    fn test_empty_input_yields_zeroed_tree() {
        let tree = bank_date_aggregator().aggregate(Vec::new());

        assert!(tree.is_empty());
        assert_eq!(tree.totals.get("montant"), dec!(0));
        assert_eq!(tree.totals.names().collect::<Vec<_>>(), vec!["montant"]);
        assert!(tree.children.is_empty());
        assert!(tree.items.is_empty());
    }

    #[test]
    fn test_missing_key_groups_under_sentinel() {
        let tree = bank_date_aggregator().aggregate(vec![
            json!({"date": "2024-01-10", "montant": 100}),
            json!({"banque": null, "date": "2024-01-10", "montant": 50}),
            json!({"banque": "BNB", "date": "2024-01-10", "montant": 7}),
        ]);

        assert_eq!(tree.count, 3);
        let sentinel = tree.child("").unwrap();
        assert!(sentinel.key.is_missing());
        assert_eq!(sentinel.count, 2);
        assert_eq!(sentinel.totals.get("montant"), dec!(150));
    }

    #[test]
    fn test_missing_measure_contributes_zero() {
        let tree = bank_date_aggregator().aggregate(vec![
            json!({"banque": "BNB", "date": "2024-01-10"}),
            json!({"banque": "BNB", "date": "2024-01-10", "montant": "not a number"}),
            json!({"banque": "BNB", "date": "2024-01-10", "montant": 40}),
        ]);

        assert_eq!(tree.totals.get("montant"), dec!(40));
        assert_eq!(tree.child("BNB").unwrap().count, 3);
    }

    #[test]
    fn test_no_levels_collects_items_at_root() {
        let aggregator = Aggregator::new(Vec::new(), vec![MeasureSelector::field("montant")]);
        let tree = aggregator.aggregate(vec![
            json!({"montant": 10}),
            json!({"montant": 20}),
        ]);

        assert_eq!(tree.count, 2);
        assert_eq!(tree.items.len(), 2);
        assert!(tree.children.is_empty());
        assert_eq!(tree.totals.get("montant"), dec!(30));
    }

    #[test]
    fn test_no_measures_counts_only() {
        let aggregator: Aggregator<Value> =
            Aggregator::new(vec![KeySelector::field("banque")], Vec::new());
        let tree = aggregator.aggregate(bank_records());

        assert_eq!(tree.count, 4);
        assert!(tree.totals.is_empty());
        assert_eq!(tree.child("BNB").unwrap().count, 3);
        assert_eq!(tree.child("BCB").unwrap().count, 1);
    }

    #[test]
    fn test_three_level_nesting() {
        let aggregator = Aggregator::new(
            vec![
                KeySelector::field("banque"),
                KeySelector::field("mode"),
                KeySelector::field("date"),
            ],
            vec![MeasureSelector::field("montant")],
        );
        let tree = aggregator.aggregate(vec![
            json!({"banque": "BNB", "mode": "Cheque", "date": "2024-01-10", "montant": 100}),
            json!({"banque": "BNB", "mode": "Espece", "date": "2024-01-10", "montant": 30}),
            json!({"banque": "BNB", "mode": "Cheque", "date": "2024-01-11", "montant": 5}),
        ]);

        let cheque = tree.child("BNB").unwrap().child("Cheque").unwrap();
        assert_eq!(cheque.totals.get("montant"), dec!(105));
        assert_eq!(cheque.children.len(), 2);
        assert_eq!(cheque.child("2024-01-10").unwrap().items.len(), 1);
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let aggregator = bank_date_aggregator();
        let first = aggregator.aggregate(bank_records());
        let second = aggregator.aggregate(bank_records());
        assert_eq!(first, second);
    }
}
