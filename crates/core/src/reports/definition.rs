//! Declarative definitions for ad-hoc JSON reports.
//!
//! A definition names a report and lists its grouping and measure fields.
//! Deserializing one from configuration and turning it into an aggregator is
//! how one-off reports run without a typed record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grouping::{Aggregator, KeySelector, MeasureSelector};

/// Grouping levels and measures of one ad-hoc report, by field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Report name, for display only.
    pub name: String,
    /// Field names to group by, outermost first.
    #[serde(default)]
    pub levels: Vec<String>,
    /// Field names to total.
    #[serde(default)]
    pub measures: Vec<String>,
}

impl ReportDefinition {
    /// Builds the aggregator this definition describes.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator<Value> {
        let levels = self
            .levels
            .iter()
            .map(|field| KeySelector::field(field))
            .collect();
        let measures = self
            .measures
            .iter()
            .map(|field| MeasureSelector::field(field))
            .collect();
        Aggregator::new(levels, measures)
    }
}
