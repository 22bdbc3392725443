//! Shared value types for Cumul.
//!
//! This crate provides common types used across all other crates:
//! - Group keys labeling aggregation buckets
//! - Insertion-ordered running totals with decimal precision
//! - Fetch tokens correlating data loads with refresh requests

pub mod types;

pub use types::{FetchToken, GroupKey, Totals};
