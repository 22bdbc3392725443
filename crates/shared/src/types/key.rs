//! Group keys labeling aggregation buckets.
//!
//! A key is the string form of whatever grouping value a record carried
//! (bank name, payment mode, ISO date). Records with a null, absent, or
//! empty grouping value are still grouped: they share the empty-string
//! sentinel instead of disappearing from the report.

use serde::{Deserialize, Serialize};

/// Label of one aggregation bucket at one grouping level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    /// Creates a key from a string-like value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The sentinel key under which records without a usable grouping value
    /// are collected.
    #[must_use]
    pub const fn missing() -> Self {
        Self(String::new())
    }

    /// Returns true if this is the missing-value sentinel.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
