//! Amount resolution.
//!
//! The source puts the authoritative figure in different places depending on
//! voucher type and export report. Each candidate is computed independently,
//! then an ordered list of strategies picks the first one that applies.

use rust_decimal::Decimal;

use crate::core::parse::parse_amount;
use crate::core::{AmountSource, ExtractConfig};
use crate::xml::Element;

use super::header::VoucherHeader;
use super::lines::inventory_lines;
use super::tags;

/// Independently computed amount candidates for one voucher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AmountCandidates {
    /// Signed sum of inventory lines (pre-tax). Zero when there are none.
    pub inventory_total: Decimal,
    /// Signed amount of the party's ledger line, or of the largest ledger
    /// line when the party cannot be found. `None` when zero or absent.
    pub ledger_total: Option<Decimal>,
    /// Magnitude of the first non-zero bill allocation.
    pub bill_alloc_amount: Option<Decimal>,
    /// Header AMOUNT field.
    pub header_amount: Decimal,
}

/// Outcome of amount resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedAmount {
    pub subtotal: Decimal,
    pub total: Decimal,
    pub source: AmountSource,
}

impl AmountCandidates {
    pub fn collect(voucher: &Element, header: &VoucherHeader, config: &ExtractConfig) -> Self {
        Self {
            inventory_total: inventory_lines(voucher).iter().map(|l| l.amount).sum(),
            ledger_total: party_ledger_amount(voucher, header, config),
            bill_alloc_amount: first_bill_amount(voucher),
            header_amount: header.header_amount,
        }
    }
}

type Strategy = fn(&AmountCandidates) -> Option<(Decimal, Decimal)>;

/// Strategies in priority order, each yielding `(subtotal, total)`.
const STRATEGIES: &[(AmountSource, Strategy)] = &[
    (AmountSource::InventoryAndParty, inventory_and_party),
    (AmountSource::PartyLedger, party_ledger),
    (AmountSource::BillAllocation, bill_allocation),
    (AmountSource::Inventory, inventory_only),
];

fn inventory_and_party(c: &AmountCandidates) -> Option<(Decimal, Decimal)> {
    if c.inventory_total.is_zero() {
        return None;
    }
    let total = c.ledger_total.map(|a| a.abs()).or(c.bill_alloc_amount)?;
    Some((c.inventory_total, total))
}

fn party_ledger(c: &AmountCandidates) -> Option<(Decimal, Decimal)> {
    c.ledger_total.map(|a| (a.abs(), a.abs()))
}

fn bill_allocation(c: &AmountCandidates) -> Option<(Decimal, Decimal)> {
    c.bill_alloc_amount.map(|a| (a, a))
}

fn inventory_only(c: &AmountCandidates) -> Option<(Decimal, Decimal)> {
    (!c.inventory_total.is_zero()).then_some((c.inventory_total, c.inventory_total))
}

/// Apply the strategies in order; fall back to the header AMOUNT.
pub fn resolve_amount(candidates: &AmountCandidates) -> ResolvedAmount {
    STRATEGIES
        .iter()
        .find_map(|(source, strategy)| {
            strategy(candidates).map(|(subtotal, total)| ResolvedAmount {
                subtotal,
                total,
                source: *source,
            })
        })
        .unwrap_or(ResolvedAmount {
            subtotal: candidates.header_amount,
            total: candidates.header_amount,
            source: AmountSource::Header,
        })
}

/// Ledger-entry containers to search, type-appropriate one first.
fn ledger_containers(header: &VoucherHeader) -> [&'static str; 2] {
    if header.is_invoice_type() {
        [tags::LEDGER_ENTRIES, tags::ALL_LEDGER_ENTRIES]
    } else {
        [tags::ALL_LEDGER_ENTRIES, tags::LEDGER_ENTRIES]
    }
}

fn entry_amount(entry: &Element) -> Decimal {
    entry
        .child_text(tags::AMOUNT)
        .map(parse_amount)
        .unwrap_or_default()
}

fn party_ledger_amount(
    voucher: &Element,
    header: &VoucherHeader,
    config: &ExtractConfig,
) -> Option<Decimal> {
    let entries: Vec<&Element> = ledger_containers(header)
        .iter()
        .flat_map(|tag| voucher.descendants(tag))
        .collect();

    if let Some(party) = header.party_name.as_deref() {
        let party_line = entries.iter().find(|e| {
            e.child_text(tags::LEDGER_NAME)
                .is_some_and(|name| names_match(name, party, config.party_prefix_len))
        });
        if let Some(line) = party_line {
            let amount = entry_amount(line);
            return (!amount.is_zero()).then_some(amount);
        }
    }

    // No party line: the largest movement is the best proxy. First seen wins ties.
    let mut largest: Option<Decimal> = None;
    for entry in &entries {
        let amount = entry_amount(entry);
        match largest {
            Some(best) if amount.abs() <= best.abs() => {}
            _ => largest = Some(amount),
        }
    }
    largest.filter(|a| !a.is_zero())
}

/// Case-insensitive exact match, or equal first `prefix_len` characters
/// (the source truncates long ledger names).
fn names_match(ledger: &str, party: &str, prefix_len: usize) -> bool {
    let ledger = ledger.trim().to_lowercase();
    let party = party.trim().to_lowercase();
    ledger == party
        || ledger
            .chars()
            .take(prefix_len)
            .eq(party.chars().take(prefix_len))
}

fn first_bill_amount(voucher: &Element) -> Option<Decimal> {
    voucher
        .descendants(tags::BILL_ALLOCATIONS)
        .into_iter()
        .map(entry_amount)
        .find(|a| !a.is_zero())
        .map(|a| a.abs())
}
