//! # smartenergy-adapter-storage-csv
//!
//! Durable decision log backed by a delimiter-separated file, written with
//! the [csv](https://docs.rs/csv) crate.
//!
//! ## Responsibilities
//! - Implement the `DecisionLog` port defined in `smartenergy-app::ports`
//! - Write the header row once, when the file is created
//! - Append one row per decision record, in insertion order
//! - Delete the file on reset
//!
//! ## Dependency rule
//! Depends on `smartenergy-app` (for port traits) and `smartenergy-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod decision_log;
pub mod error;
mod row;

pub use decision_log::CsvDecisionLog;
pub use error::LogError;
pub use row::HEADER;
