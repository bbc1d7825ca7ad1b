//! Core records, error type, configuration and lenient field parsing.
//!
//! Everything in here is independent of the XML layer: the record types are
//! what the extraction and reconciliation stages produce, and the parsers
//! turn the vendor's loosely formatted field values into typed values
//! without ever failing.

mod config;
mod error;
pub mod parse;
mod types;

pub use config::*;
pub use error::*;
pub use types::*;
