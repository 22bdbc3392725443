//! Common types used across the application.

pub mod id;
pub mod key;
pub mod totals;

pub use id::FetchToken;
pub use key::GroupKey;
pub use totals::Totals;
