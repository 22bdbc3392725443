//! Grouped aggregation of flat records into ordered trees.
//!
//! This module implements the core reporting fold:
//! - Key and measure selectors (named closures over the record type)
//! - The group tree with per-node running totals
//! - The single-pass aggregator
//! - Field access helpers for `serde_json::Value` records

pub mod json;
pub mod selector;
pub mod service;
pub mod tree;

#[cfg(test)]
mod service_props;

pub use selector::{KeySelector, MeasureSelector};
pub use service::Aggregator;
pub use tree::{GroupNode, GroupTree};
