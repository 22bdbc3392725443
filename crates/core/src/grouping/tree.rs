//! The aggregated group tree.
//!
//! Sibling groups keep first-seen order. Nothing here re-sorts implicitly;
//! the `sort_by_*` helpers are the only way order changes, so a caller that
//! wants wire order keeps it by simply not calling them.

use cumul_shared::{GroupKey, Totals};
use serde::{Deserialize, Serialize};

/// Root of an aggregated tree: grand totals plus the first grouping level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupTree<R> {
    /// Grand totals across all records.
    pub totals: Totals,
    /// Number of records aggregated.
    pub count: usize,
    /// First-level groups in first-seen order.
    pub children: Vec<GroupNode<R>>,
    /// The records themselves, kept at the root only when no grouping
    /// levels are configured.
    pub items: Vec<R>,
}

/// One group at one level.
///
/// Intermediate levels hold child groups; the deepest level holds the
/// records that fell into the group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupNode<R> {
    /// Bucket key of this group.
    pub key: GroupKey,
    /// Name of the level that produced this group (for example "banque").
    pub level: String,
    /// Running totals over every record under this group.
    pub totals: Totals,
    /// Number of records under this group.
    pub count: usize,
    /// Child groups in first-seen order.
    pub children: Vec<GroupNode<R>>,
    /// Records of this group when it is at the deepest level.
    pub items: Vec<R>,
}

impl<R> GroupTree<R> {
    /// Creates an empty tree with every given measure preset to zero.
    #[must_use]
    pub fn empty(measures: &[String]) -> Self {
        Self {
            totals: Totals::zeroed(measures),
            count: 0,
            children: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Returns true if no records were aggregated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Looks up a first-level group by key.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&GroupNode<R>> {
        self.children.iter().find(|node| node.key.as_str() == key)
    }

    /// Collects every aggregated record depth-first in group order.
    #[must_use]
    pub fn records(&self) -> Vec<&R> {
        let mut out: Vec<&R> = self.items.iter().collect();
        collect_records(&self.children, &mut out);
        out
    }

    /// Re-sorts every sibling list ascending by key.
    pub fn sort_by_key(&mut self) {
        sort_nodes_by_key(&mut self.children);
    }

    /// Re-sorts every sibling list descending by one measure's total.
    ///
    /// Groups tied on the measure keep their relative order.
    pub fn sort_by_total(&mut self, measure: &str) {
        sort_nodes_by_total(&mut self.children, measure);
    }
}

impl<R> GroupNode<R> {
    /// Creates an empty group with every given measure preset to zero.
    #[must_use]
    pub fn new(key: GroupKey, level: impl Into<String>, measures: &[String]) -> Self {
        Self {
            key,
            level: level.into(),
            totals: Totals::zeroed(measures),
            count: 0,
            children: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Looks up a child group by key.
    #[must_use]
    pub fn child(&self, key: &str) -> Option<&GroupNode<R>> {
        self.children.iter().find(|node| node.key.as_str() == key)
    }

    /// Collects every record under this group depth-first in group order.
    #[must_use]
    pub fn records(&self) -> Vec<&R> {
        let mut out: Vec<&R> = self.items.iter().collect();
        collect_records(&self.children, &mut out);
        out
    }
}

fn collect_records<'t, R>(nodes: &'t [GroupNode<R>], out: &mut Vec<&'t R>) {
    for node in nodes {
        out.extend(node.items.iter());
        collect_records(&node.children, out);
    }
}

fn sort_nodes_by_key<R>(nodes: &mut [GroupNode<R>]) {
    nodes.sort_by(|a, b| a.key.cmp(&b.key));
    for node in nodes {
        sort_nodes_by_key(&mut node.children);
    }
}

fn sort_nodes_by_total<R>(nodes: &mut [GroupNode<R>], measure: &str) {
    nodes.sort_by(|a, b| b.totals.get(measure).cmp(&a.totals.get(measure)));
    for node in nodes {
        sort_nodes_by_total(&mut node.children, measure);
    }
}
