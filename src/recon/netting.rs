use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::core::{
    BillAllocation, BillKey, BillType, OpeningBillBalance, OutstandingReceivable, ReceivableKind,
    ReconConfig, ReconWarning, WarningKind,
};

use super::{ReceivableSource, Reconciliation};

/// Running sums of one `(ledger, bill)` group.
#[derive(Debug, Default)]
struct BillGroup {
    billed: Decimal,
    adjusted: Decimal,
    originating: usize,
    adjusting: usize,
    bill_date: Option<NaiveDate>,
    last_adjusted: Option<NaiveDate>,
    credit_period_days: Option<u32>,
    is_advance: bool,
    from_opening: bool,
}

impl BillGroup {
    fn originate(
        &mut self,
        amount: Decimal,
        date: Option<NaiveDate>,
        credit_period_days: Option<u32>,
        is_advance: bool,
        from_opening: bool,
    ) {
        self.billed += amount;
        self.originating += 1;
        self.bill_date = self.bill_date.max(date);
        self.credit_period_days = self.credit_period_days.max(credit_period_days);
        self.is_advance |= is_advance;
        self.from_opening |= from_opening;
    }

    fn adjust(&mut self, amount: Decimal, date: NaiveDate) {
        self.adjusted += amount;
        self.adjusting += 1;
        self.last_adjusted = self.last_adjusted.max(Some(date));
    }
}

/// Net bill allocations and opening balances into outstanding receivables.
///
/// Originating entries (New Ref, Advance, Opening) and adjusting entries
/// (Agst Ref) are summed per `(ledger, bill)`. A bill is outstanding while
/// `billed + adjusted < 0`; settled and over-settled bills are left out.
/// Other bill types (e.g. "On Account") do not take part.
pub fn reconcile(
    bills: &[BillAllocation],
    openings: &[OpeningBillBalance],
    config: &ReconConfig,
) -> Reconciliation {
    let mut groups: BTreeMap<BillKey, BillGroup> = BTreeMap::new();

    for opening in openings {
        if opening.bill_name.trim().is_empty() || opening.opening_balance.is_zero() {
            continue;
        }
        groups.entry(opening.key()).or_default().originate(
            opening.opening_balance,
            opening.bill_date.or(config.opening_date),
            opening.credit_period_days,
            opening.is_advance,
            true,
        );
    }

    for bill in bills {
        match &bill.bill_type {
            BillType::AgstRef => groups
                .entry(bill.key())
                .or_default()
                .adjust(bill.amount, bill.voucher_date),
            BillType::Other(kind) => {
                log::debug!("{}: bill type {kind:?} not netted", bill.key());
            }
            kind => groups.entry(bill.key()).or_default().originate(
                bill.amount,
                Some(bill.voucher_date),
                bill.credit_period_days,
                *kind == BillType::Advance,
                *kind == BillType::Opening,
            ),
        }
    }

    let mut receivables = Vec::new();
    let mut warnings = Vec::new();
    for (key, group) in groups {
        if let Some(receivable) = settle(key, group, config, &mut warnings) {
            receivables.push(receivable);
        }
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::debug!(
        "netting kept {} outstanding bills, {} warnings",
        receivables.len(),
        warnings.len()
    );

    Reconciliation {
        source: ReceivableSource::Netting,
        receivables,
        warnings,
    }
}

fn settle(
    key: BillKey,
    group: BillGroup,
    config: &ReconConfig,
    warnings: &mut Vec<ReconWarning>,
) -> Option<OutstandingReceivable> {
    if group.originating == 0 {
        warnings.push(ReconWarning::new(
            &key.ledger_name,
            &key.bill_name,
            WarningKind::OrphanAdjustment,
            format!(
                "{} adjusting entries totalling {} with no originating entry",
                group.adjusting, group.adjusted
            ),
        ));
        return None;
    }

    let outstanding = -(group.billed + group.adjusted);
    if outstanding <= Decimal::ZERO {
        return None;
    }

    // Compare before rounding; each figure is rounded once afterwards.
    let scale = config.amount_scale;
    let original = group.billed.abs().round_dp(scale);
    let adjusted = group.adjusted.abs().round_dp(scale);
    let pending = if group.billed.abs() - group.adjusted.abs() == outstanding {
        original - adjusted
    } else {
        warnings.push(ReconWarning::new(
            &key.ledger_name,
            &key.bill_name,
            WarningKind::PendingMismatch,
            format!(
                "original {} - adjusted {} != pending {outstanding}",
                group.billed.abs(),
                group.adjusted.abs()
            ),
        ));
        outstanding.round_dp(scale)
    };
    if pending <= Decimal::ZERO {
        return None;
    }

    let bill_date = group.bill_date.or(group.last_adjusted);
    let due_date = bill_date
        .zip(group.credit_period_days)
        .and_then(|(date, days)| date.checked_add_days(Days::new(u64::from(days))));

    Some(OutstandingReceivable {
        ledger_name: key.ledger_name,
        bill_name: key.bill_name,
        bill_date,
        due_date,
        original_amount: original,
        adjusted_amount: adjusted,
        pending_amount: pending,
        bill_type: if group.from_opening {
            ReceivableKind::Opening
        } else {
            ReceivableKind::NewRef
        },
        is_advance: group.is_advance,
        last_adjusted_date: group.last_adjusted,
    })
}
