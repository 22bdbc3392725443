//! Current-tree ownership and refresh staleness.

pub mod service;

pub use service::{RefreshOutcome, ReportSession};
