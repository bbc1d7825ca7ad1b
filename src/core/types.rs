use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Counterparty name used when a voucher names none.
pub const UNKNOWN_COUNTERPARTY: &str = "UNKNOWN";

/// One source transaction, normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherFacts {
    /// Voucher type as named in the source ("Sales", "Receipt", ...). Open vocabulary.
    pub voucher_type: String,
    /// Voucher number; empty when the source has none.
    pub voucher_number: String,
    /// Voucher date.
    pub date: NaiveDate,
    /// Party name; [`UNKNOWN_COUNTERPARTY`] when the source has none.
    pub counterparty_name: String,
    /// Stable unique key, see [`crate::voucher::identity_key`].
    pub identity_key: String,
    /// Pre-tax amount.
    pub subtotal: Decimal,
    /// Post-tax amount.
    pub total: Decimal,
    /// Which candidate source produced `subtotal`/`total`.
    pub amount_source: AmountSource,
    /// Stock item lines, in source order.
    pub inventory_lines: Vec<LineFact>,
    /// Vendor-native identifier (GUID / remote id), if present.
    pub vendor_id: Option<String>,
    /// Supplier or reference number.
    pub reference: Option<String>,
    pub narration: Option<String>,
    /// Vendor alteration counter, useful for change detection.
    pub alter_id: Option<u64>,
    pub is_cancelled: bool,
    pub is_optional: bool,
}

impl VoucherFacts {
    /// `total - subtotal`; zero when no tax split could be resolved.
    pub fn tax(&self) -> Decimal {
        self.total - self.subtotal
    }
}

/// Where a voucher's amount was taken from, in resolution priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AmountSource {
    /// Inventory lines for the subtotal, party ledger or bill allocation for the total.
    InventoryAndParty,
    /// The party's ledger line (or the largest ledger line).
    PartyLedger,
    /// The first non-zero bill allocation.
    BillAllocation,
    /// Sum of inventory lines.
    Inventory,
    /// Header-level AMOUNT field, often blank.
    Header,
}

/// A stock item line inside a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineFact {
    pub stock_item: String,
    /// Billed quantity as the source renders it, e.g. "10 Nos".
    pub billed_qty: String,
    /// Rate as the source renders it, e.g. "125.00/Nos".
    pub rate: String,
    /// Signed line amount.
    pub amount: Decimal,
    pub discount: Decimal,
}

/// Bill allocation type.
///
/// The source uses free text; the four known values are modelled explicitly
/// and anything else is kept verbatim in [`BillType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillType {
    /// "New Ref": creates a new outstanding bill.
    NewRef,
    /// "Agst Ref": settles or adjusts an existing bill.
    AgstRef,
    Advance,
    Opening,
    /// e.g. "On Account".
    Other(String),
}

impl BillType {
    /// Map the source's BILLTYPE text. Blank means "New Ref".
    pub fn from_source(raw: &str) -> Self {
        let folded: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric())
            .flat_map(char::to_lowercase)
            .collect();
        match folded.as_str() {
            "" | "newref" => Self::NewRef,
            "agstref" | "againstref" => Self::AgstRef,
            "advance" => Self::Advance,
            "opening" => Self::Opening,
            _ => Self::Other(raw.trim().to_string()),
        }
    }

    /// The label the source uses.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NewRef => "New Ref",
            Self::AgstRef => "Agst Ref",
            Self::Advance => "Advance",
            Self::Opening => "Opening",
            Self::Other(s) => s,
        }
    }

    /// NewRef, Advance and Opening create a receivable.
    pub fn is_originating(&self) -> bool {
        matches!(self, Self::NewRef | Self::Advance | Self::Opening)
    }

    pub fn is_adjusting(&self) -> bool {
        matches!(self, Self::AgstRef)
    }
}

impl std::fmt::Display for BillType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One bill-reference line item found in a voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillAllocation {
    /// Key of the voucher this allocation belongs to.
    pub voucher_identity_key: String,
    pub voucher_date: NaiveDate,
    pub ledger_name: String,
    pub bill_name: String,
    /// Signed as in the source. Receivable-creating entries are negative.
    pub amount: Decimal,
    pub bill_type: BillType,
    pub credit_period_days: Option<u32>,
}

impl BillAllocation {
    pub fn key(&self) -> BillKey {
        BillKey::new(&self.ledger_name, &self.bill_name)
    }
}

/// A bill's balance as of the ledger's opening date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningBillBalance {
    pub ledger_name: String,
    pub bill_name: String,
    /// Bill date recorded on the ledger master, if any.
    pub bill_date: Option<NaiveDate>,
    /// Signed as in the source.
    pub opening_balance: Decimal,
    pub credit_period_days: Option<u32>,
    pub is_advance: bool,
}

impl OpeningBillBalance {
    pub fn key(&self) -> BillKey {
        BillKey::new(&self.ledger_name, &self.bill_name)
    }
}

/// Reconciliation key: bill names are only unique within a ledger.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BillKey {
    pub ledger_name: String,
    pub bill_name: String,
}

impl BillKey {
    pub fn new(ledger_name: impl Into<String>, bill_name: impl Into<String>) -> Self {
        Self {
            ledger_name: ledger_name.into(),
            bill_name: bill_name.into(),
        }
    }
}

impl std::fmt::Display for BillKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.ledger_name, self.bill_name)
    }
}

/// Reporting label of an outstanding bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReceivableKind {
    /// Originated (at least partly) from the opening snapshot.
    Opening,
    NewRef,
}

impl ReceivableKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Opening => "Opening",
            Self::NewRef => "New Ref",
        }
    }
}

/// One bill that is still (partly) unpaid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutstandingReceivable {
    pub ledger_name: String,
    pub bill_name: String,
    /// Latest originating date (or latest adjusting date if none is known).
    pub bill_date: Option<NaiveDate>,
    /// `bill_date + credit period` when both are known.
    pub due_date: Option<NaiveDate>,
    /// Magnitude of all originating entries.
    pub original_amount: Decimal,
    /// Magnitude of all adjusting entries.
    pub adjusted_amount: Decimal,
    /// Still unsettled; always strictly positive.
    pub pending_amount: Decimal,
    pub bill_type: ReceivableKind,
    pub is_advance: bool,
    pub last_adjusted_date: Option<NaiveDate>,
}

impl OutstandingReceivable {
    pub fn key(&self) -> BillKey {
        BillKey::new(&self.ledger_name, &self.bill_name)
    }

    /// Days past due as of `as_of`; `None` when there is no due date or
    /// the bill is not yet due.
    pub fn days_overdue(&self, as_of: NaiveDate) -> Option<i64> {
        let due = self.due_date?;
        let days = (as_of - due).num_days();
        (days > 0).then_some(days)
    }
}
