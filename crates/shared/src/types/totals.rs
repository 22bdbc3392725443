//! Running totals keyed by measure name.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` throughout.

use rust_decimal::Decimal;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Insertion-ordered map of measure name to accumulated amount.
///
/// Report columns keep the order in which their measures were declared, so
/// this deliberately does not sort or hash its keys. Equality is
/// order-sensitive for the same reason.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Totals {
    entries: Vec<(String, Decimal)>,
}

impl Totals {
    /// Creates an empty totals map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a totals map with every given measure preset to zero, in the
    /// given order.
    #[must_use]
    pub fn zeroed<S: AsRef<str>>(names: &[S]) -> Self {
        Self {
            entries: names
                .iter()
                .map(|name| (name.as_ref().to_owned(), Decimal::ZERO))
                .collect(),
        }
    }

    /// Returns the accumulated amount for a measure, zero when the measure
    /// is unknown.
    #[must_use]
    pub fn get(&self, name: &str) -> Decimal {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map_or(Decimal::ZERO, |(_, amount)| *amount)
    }

    /// Adds an amount to a measure, registering the measure at the end on
    /// first sight.
    pub fn add(&mut self, name: &str, amount: Decimal) {
        match self.entries.iter_mut().find(|(entry, _)| entry == name) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((name.to_owned(), amount)),
        }
    }

    /// Number of measures tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no measures are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if every tracked measure is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.entries.iter().all(|(_, amount)| amount.is_zero())
    }

    /// Iterates `(name, amount)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.entries.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    /// Iterates measure names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for Totals {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, amount) in &self.entries {
            map.serialize_entry(name, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Totals {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TotalsVisitor;

        impl<'de> Visitor<'de> for TotalsVisitor {
            type Value = Totals;

            fn expecting(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str("a map of measure names to decimal amounts")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut totals = Totals::new();
                while let Some((name, amount)) = access.next_entry::<String, Decimal>()? {
                    totals.add(&name, amount);
                }
                Ok(totals)
            }
        }

        deserializer.deserialize_map(TotalsVisitor)
    }
}
