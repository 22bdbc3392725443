//! Named key and measure selectors.
//!
//! A selector pairs a name with a closure over the record type. Grouping
//! levels and measures are both plain functions, so a derived measure (for
//! example an invoiced amount that is paid minus overpayment) needs no
//! special support: its closure does the arithmetic.

use cumul_shared::GroupKey;
use rust_decimal::Decimal;
use serde_json::Value;

use super::json;

/// One grouping level: the level name plus the function extracting the
/// bucket key from a record.
pub struct KeySelector<R> {
    name: String,
    select: Box<dyn Fn(&R) -> GroupKey + Send + Sync>,
}

impl<R> KeySelector<R> {
    /// Creates a named level from a key function.
    pub fn new<F>(name: impl Into<String>, select: F) -> Self
    where
        F: Fn(&R) -> GroupKey + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            select: Box::new(select),
        }
    }

    /// Level name (for example "banque").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extracts the bucket key for one record.
    #[must_use]
    pub fn key_for(&self, record: &R) -> GroupKey {
        (self.select)(record)
    }
}

impl KeySelector<Value> {
    /// Level reading a top-level field of a JSON record.
    ///
    /// Null, absent, and non-scalar values map to the missing-key sentinel.
    #[must_use]
    pub fn field(name: &str) -> Self {
        let field = name.to_owned();
        Self::new(name, move |record: &Value| json::key_field(record, &field))
    }

    /// Level reading a nested path of a JSON record.
    #[must_use]
    pub fn at(name: &str, path: &[&str]) -> Self {
        let path: Vec<String> = path.iter().map(|s| (*s).to_owned()).collect();
        Self::new(name, move |record: &Value| json::key_at(record, &path))
    }
}

impl<R> std::fmt::Debug for KeySelector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeySelector").field("name", &self.name).finish_non_exhaustive()
    }
}

/// One measure: the measure name plus the function extracting the amount a
/// record contributes.
pub struct MeasureSelector<R> {
    name: String,
    select: Box<dyn Fn(&R) -> Decimal + Send + Sync>,
}

impl<R> MeasureSelector<R> {
    /// Creates a named measure from an amount function.
    pub fn new<F>(name: impl Into<String>, select: F) -> Self
    where
        F: Fn(&R) -> Decimal + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            select: Box::new(select),
        }
    }

    /// Measure name (for example "montantPaye").
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Extracts the amount one record contributes to this measure.
    #[must_use]
    pub fn value_for(&self, record: &R) -> Decimal {
        (self.select)(record)
    }
}

impl MeasureSelector<Value> {
    /// Measure reading a top-level field of a JSON record.
    ///
    /// Absent and non-numeric values contribute zero.
    #[must_use]
    pub fn field(name: &str) -> Self {
        let field = name.to_owned();
        Self::new(name, move |record: &Value| json::decimal_field(record, &field))
    }

    /// Measure reading a nested path of a JSON record.
    #[must_use]
    pub fn at(name: &str, path: &[&str]) -> Self {
        let path: Vec<String> = path.iter().map(|s| (*s).to_owned()).collect();
        Self::new(name, move |record: &Value| json::decimal_at(record, &path))
    }
}

impl<R> std::fmt::Debug for MeasureSelector<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MeasureSelector").field("name", &self.name).finish_non_exhaustive()
    }
}
