//! Batch orchestration against a fragile upstream.
//!
//! A date range is split into windows that are fetched strictly one after
//! another with a pause in between. Extraction results accumulate in an
//! [`AllocationStore`]; reconciliation output is handed to a
//! [`ReceivableSink`] in a single call.

mod batch;
mod config;
mod runner;
mod store;

pub use batch::{BatchPlan, DateWindow};
pub use config::{SyncConfig, SyncConfigBuilder};
pub use runner::{ExtractionRun, ReceivableSink, VoucherSource, WindowRun, publish, run_extraction};
pub use store::AllocationStore;
