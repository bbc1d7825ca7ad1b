//! Bill-wise receivable reconciliation.
//!
//! Two paths produce the same [`Reconciliation`]: netting of bill
//! allocations plus opening balances ([`reconcile`]), or the vendor's own
//! outstanding report ([`parse_outstanding_report`]).
//! [`outstanding_receivables`] picks between them.

mod netting;
mod opening;
mod outstanding;

pub use netting::reconcile;
pub use opening::parse_opening_balances;
pub use outstanding::{outstanding_receivables, parse_outstanding_report};

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{BillKey, OutstandingReceivable, ReconWarning};
use crate::xml::Element;

/// Which path produced a [`Reconciliation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceivableSource {
    /// Netted from bill allocations and opening balances.
    Netting,
    /// Taken from the vendor's outstanding-receivables report.
    Report,
}

/// Complete outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub source: ReceivableSource,
    /// Sorted by `(ledger_name, bill_name)`; every row has positive pending.
    pub receivables: Vec<OutstandingReceivable>,
    pub warnings: Vec<ReconWarning>,
}

impl Reconciliation {
    pub fn get(&self, ledger_name: &str, bill_name: &str) -> Option<&OutstandingReceivable> {
        self.receivables
            .iter()
            .find(|r| r.ledger_name == ledger_name && r.bill_name == bill_name)
    }

    pub fn total_pending(&self) -> Decimal {
        self.receivables.iter().map(|r| r.pending_amount).sum()
    }

    /// Keys that were outstanding before and no longer are.
    ///
    /// Reconciliation never deletes; the persistence side uses this to mark
    /// the missing bills as settled.
    pub fn settled_since<'a>(&self, previous: impl IntoIterator<Item = &'a BillKey>) -> Vec<BillKey> {
        let current: BTreeSet<BillKey> = self.receivables.iter().map(|r| r.key()).collect();
        previous
            .into_iter()
            .filter(|key| !current.contains(*key))
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

/// `(ledger name, bill allocation)` pairs of a ledger-master style export.
///
/// Both the opening-balance export and the outstanding report list `LEDGER`
/// elements carrying a `NAME` attribute with nested bill allocations.
fn ledger_bill_lists(root: &Element) -> Vec<(&str, &Element)> {
    let ledgers = if root.name == "LEDGER" {
        vec![root]
    } else {
        root.descendants("LEDGER")
    };
    ledgers
        .into_iter()
        .filter_map(|ledger| {
            let name = ledger.attr("NAME")?;
            Some((name, ledger))
        })
        .flat_map(|(name, ledger)| {
            ledger
                .descendants("BILLALLOCATIONS.LIST")
                .into_iter()
                .map(move |bill| (name, bill))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ReceivableKind;
    use rust_decimal_macros::dec;

    fn receivable(ledger: &str, bill: &str, pending: Decimal) -> OutstandingReceivable {
        OutstandingReceivable {
            ledger_name: ledger.into(),
            bill_name: bill.into(),
            bill_date: None,
            due_date: None,
            original_amount: pending,
            adjusted_amount: Decimal::ZERO,
            pending_amount: pending,
            bill_type: ReceivableKind::NewRef,
            is_advance: false,
            last_adjusted_date: None,
        }
    }

    #[test]
    fn settled_since_lists_missing_keys() {
        let recon = Reconciliation {
            source: ReceivableSource::Netting,
            receivables: vec![receivable("Acme", "INV-2", dec!(50))],
            warnings: Vec::new(),
        };
        let previous = [
            BillKey::new("Acme", "INV-2"),
            BillKey::new("Acme", "INV-1"),
            BillKey::new("Acme", "INV-1"),
        ];
        assert_eq!(recon.settled_since(&previous), vec![BillKey::new("Acme", "INV-1")]);
        assert_eq!(recon.total_pending(), dec!(50));
        assert!(recon.get("Acme", "INV-2").is_some());
        assert!(recon.get("Acme", "INV-1").is_none());
    }
}
