//! # voucherbook
//!
//! Voucher extraction and bill-wise receivable reconciliation for XML
//! exports of an accounting system.
//!
//! Raw exports are sanitized, parsed and turned into normalized
//! [`VoucherFacts`](crate::core::VoucherFacts) with stable identity keys plus
//! the [`BillAllocation`](crate::core::BillAllocation)s they carry. The
//! reconciliation engine nets allocations and opening balances per
//! `(ledger, bill)` into outstanding receivables.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//!
//! ## Quick Start
//!
//! ```rust
//! use voucherbook::core::{ExtractConfig, ReconConfig};
//! use voucherbook::recon::reconcile;
//! use voucherbook::voucher::extract_vouchers;
//! use rust_decimal_macros::dec;
//!
//! let xml = r#"<ENVELOPE><HEADER><STATUS>1</STATUS></HEADER><BODY><DATA>
//!   <VOUCHER VCHTYPE="Sales">
//!     <DATE>20251013</DATE>
//!     <VOUCHERNUMBER>S-101</VOUCHERNUMBER>
//!     <PARTYLEDGERNAME>Acme Distributors</PARTYLEDGERNAME>
//!     <ALLLEDGERENTRIES.LIST>
//!       <LEDGERNAME>Acme Distributors</LEDGERNAME>
//!       <AMOUNT>-1180.00</AMOUNT>
//!       <BILLALLOCATIONS.LIST>
//!         <NAME>S-101</NAME>
//!         <BILLTYPE>New Ref</BILLTYPE>
//!         <AMOUNT>-1180.00</AMOUNT>
//!       </BILLALLOCATIONS.LIST>
//!     </ALLLEDGERENTRIES.LIST>
//!   </VOUCHER>
//! </DATA></BODY></ENVELOPE>"#;
//!
//! let extraction = extract_vouchers(xml, &ExtractConfig::default()).unwrap();
//! let recon = reconcile(&extraction.bills, &[], &ReconConfig::default());
//!
//! assert_eq!(recon.receivables.len(), 1);
//! assert_eq!(recon.receivables[0].pending_amount, dec!(1180.00));
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` | Records, errors, configuration, field parsers |
//! | `extract` (default) | XML sanitizer, voucher and bill extraction, identity keys |
//! | `recon` (default) | Bill netting, opening balances, outstanding report |
//! | `sync` | Date-range batching, allocation store, TOML config |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "extract")]
pub mod xml;

#[cfg(feature = "extract")]
pub mod voucher;

#[cfg(feature = "recon")]
pub mod recon;

#[cfg(feature = "sync")]
pub mod sync;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
