//! Financial report assembly.
//!
//! This module provides pure business logic for the desk reports:
//! - Cashier summary (bank, then payment mode)
//! - Bank daily summary (bank, then payment date)
//! - Cash receipts with the VAT split
//! - Stock movement summary (category, then warehouse)
//! - Reporting period validation and filtering
//! - Declarative definitions for ad-hoc JSON reports

pub mod definition;
pub mod error;
pub mod period;
pub mod service;
pub mod types;


pub use definition::ReportDefinition;
pub use error::ReportError;
pub use period::{Dated, ReportPeriod};
pub use service::ReportService;
pub use types::*;
