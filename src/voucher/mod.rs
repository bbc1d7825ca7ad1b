//! Voucher extraction: facts, identity keys and bill allocations.
//!
//! A single call to [`extract_vouchers`] takes a raw export and returns both
//! record streams; nothing is cached between calls.
//!
//! # Example
//!
//! ```
//! use voucherbook::core::ExtractConfig;
//! use voucherbook::voucher::extract_vouchers;
//!
//! let xml = r#"<ENVELOPE><HEADER><STATUS>1</STATUS></HEADER><BODY><DATA>
//!   <VOUCHER VCHTYPE="Sales">
//!     <DATE>20251013</DATE>
//!     <VOUCHERNUMBER>S-101</VOUCHERNUMBER>
//!     <PARTYLEDGERNAME>Acme Distributors</PARTYLEDGERNAME>
//!     <ALLLEDGERENTRIES.LIST>
//!       <LEDGERNAME>Acme Distributors</LEDGERNAME>
//!       <AMOUNT>-1234.50</AMOUNT>
//!     </ALLLEDGERENTRIES.LIST>
//!   </VOUCHER>
//! </DATA></BODY></ENVELOPE>"#;
//!
//! let extraction = extract_vouchers(xml, &ExtractConfig::default()).unwrap();
//! assert_eq!(extraction.vouchers[0].identity_key, "Sales/S-101/2025-10-13/Acme Distributors");
//! assert_eq!(extraction.vouchers[0].total.to_string(), "1234.50");
//! ```

mod amount;
mod bills;
mod extract;
mod header;
mod identity;
mod lines;

pub use amount::{AmountCandidates, ResolvedAmount, resolve_amount};
pub use bills::extract_bill_allocations;
pub use extract::{Extraction, extract_voucher, extract_vouchers};
pub use header::VoucherHeader;
pub use identity::{IdentityFields, IdentityStrategy, identity_key, resolve_identity};
pub use lines::inventory_lines;

/// Element names of the vendor's voucher export.
pub mod tags {
    pub const VOUCHER: &str = "VOUCHER";
    /// Ledger-entry container used by invoice-mode vouchers.
    pub const LEDGER_ENTRIES: &str = "LEDGERENTRIES.LIST";
    /// Ledger-entry container used by all other vouchers.
    pub const ALL_LEDGER_ENTRIES: &str = "ALLLEDGERENTRIES.LIST";
    pub const ALL_INVENTORY_ENTRIES: &str = "ALLINVENTORYENTRIES.LIST";
    pub const INVENTORY_ENTRIES: &str = "INVENTORYENTRIES.LIST";
    pub const BILL_ALLOCATIONS: &str = "BILLALLOCATIONS.LIST";
    pub const LEDGER_NAME: &str = "LEDGERNAME";
    pub const AMOUNT: &str = "AMOUNT";
}
