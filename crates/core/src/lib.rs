//! Core aggregation logic for Cumul.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All grouping, report, and refresh-session types live here.
//!
//! # Modules
//!
//! - `grouping` - Grouped aggregation of flat records into ordered trees
//! - `reports` - The typed report catalogue of the cash and stock desks
//! - `session` - Current-tree ownership and refresh staleness

pub mod grouping;
pub mod reports;
pub mod session;
