use crate::core::BillAllocation;

use super::batch::DateWindow;

/// Accumulated bill allocations across sync runs.
///
/// Allocations are append-only within one extraction, but a re-processed
/// window fully replaces what was stored for it.
#[derive(Debug, Clone, Default)]
pub struct AllocationStore {
    bills: Vec<BillAllocation>,
}

impl AllocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every stored allocation dated inside `window` with `bills`.
    ///
    /// Returns how many stored allocations were removed.
    pub fn supersede(
        &mut self,
        window: &DateWindow,
        bills: impl IntoIterator<Item = BillAllocation>,
    ) -> usize {
        let before = self.bills.len();
        self.bills.retain(|b| !window.contains(b.voucher_date));
        let removed = before - self.bills.len();
        self.bills.extend(bills);
        removed
    }

    pub fn all(&self) -> &[BillAllocation] {
        &self.bills
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BillType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, d).unwrap()
    }

    fn bill(name: &str, on: NaiveDate) -> BillAllocation {
        BillAllocation {
            voucher_identity_key: name.into(),
            voucher_date: on,
            ledger_name: "Acme".into(),
            bill_name: name.into(),
            amount: dec!(-10),
            bill_type: BillType::NewRef,
            credit_period_days: None,
        }
    }

    #[test]
    fn reprocessed_window_replaces_its_bills() {
        let mut store = AllocationStore::new();
        let first = DateWindow { from: date(1), to: date(15) };
        let second = DateWindow { from: date(16), to: date(30) };
        store.supersede(&first, vec![bill("A", date(3)), bill("B", date(10))]);
        store.supersede(&second, vec![bill("C", date(20))]);
        assert_eq!(store.len(), 3);

        let removed = store.supersede(&first, vec![bill("B", date(10))]);
        assert_eq!(removed, 2);
        let names: Vec<_> = store.all().iter().map(|b| b.bill_name.as_str()).collect();
        assert_eq!(names, ["C", "B"]);
    }
}
