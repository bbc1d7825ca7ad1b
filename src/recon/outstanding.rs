use std::collections::BTreeMap;

use chrono::Days;
use rust_decimal::Decimal;

use crate::core::parse::{parse_amount, parse_bool, parse_credit_period, parse_date};
use crate::core::{
    BillAllocation, BillKey, OpeningBillBalance, OutstandingReceivable, ReceivableKind,
    ReconConfig, ReconWarning, Result, WarningKind,
};
use crate::xml::{Element, ensure_status_ok, parse_sanitized};

use super::{ReceivableSource, Reconciliation, ledger_bill_lists, reconcile};

/// Receivables straight from the vendor's outstanding-receivables report.
///
/// The report already carries per-bill original and pending amounts, so no
/// netting happens. Rows with nothing pending are omitted; when a bill is
/// listed twice the first row wins.
pub fn parse_outstanding_report(raw: &str, config: &ReconConfig) -> Result<Reconciliation> {
    let root = parse_sanitized(raw)?;
    ensure_status_ok(&root)?;

    let mut rows: BTreeMap<BillKey, OutstandingReceivable> = BTreeMap::new();
    let mut warnings = Vec::new();
    for (ledger, bill) in ledger_bill_lists(&root) {
        let Some(row) = read_row(ledger, bill, config, &mut warnings) else {
            continue;
        };
        rows.entry(row.key()).or_insert(row);
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }
    log::debug!("outstanding report lists {} open bills", rows.len());

    Ok(Reconciliation {
        source: ReceivableSource::Report,
        receivables: rows.into_values().collect(),
        warnings,
    })
}

fn read_row(
    ledger: &str,
    bill: &Element,
    config: &ReconConfig,
    warnings: &mut Vec<ReconWarning>,
) -> Option<OutstandingReceivable> {
    let bill_name = bill.child_text("NAME")?;
    let scale = config.amount_scale;

    let amount = bill.child_text("AMOUNT").map(parse_amount).unwrap_or_default();
    let opening = bill
        .child_text("OPENINGBALANCE")
        .map(parse_amount)
        .unwrap_or_default();
    let pending = amount.abs().round_dp(scale);
    if pending.is_zero() {
        return None;
    }
    let original = (if opening.is_zero() { amount } else { opening })
        .abs()
        .round_dp(scale);

    let adjusted = if original < pending {
        warnings.push(ReconWarning::new(
            ledger,
            bill_name,
            WarningKind::ReportInconsistent,
            format!("original {original} is below pending {pending}"),
        ));
        Decimal::ZERO
    } else {
        original - pending
    };

    let bill_date = bill.child_text("BILLDATE").and_then(parse_date);
    let due_date = bill_date
        .zip(bill.child_text("BILLCREDITPERIOD").and_then(parse_credit_period))
        .and_then(|(date, days)| date.checked_add_days(Days::new(u64::from(days))));
    let bill_type = match bill.child_text("BILLTYPE") {
        Some(kind) if kind.eq_ignore_ascii_case("opening") => ReceivableKind::Opening,
        _ => ReceivableKind::NewRef,
    };

    Some(OutstandingReceivable {
        ledger_name: ledger.to_string(),
        bill_name: bill_name.to_string(),
        bill_date,
        due_date,
        original_amount: original,
        adjusted_amount: adjusted,
        pending_amount: pending,
        bill_type,
        is_advance: bill.child_text("ISADVANCE").is_some_and(parse_bool),
        last_adjusted_date: None,
    })
}

/// Outstanding receivables from the best available source.
///
/// A report that parses is authoritative, even when it lists nothing.
/// Without one, or when it cannot be read, bills and openings are netted.
pub fn outstanding_receivables(
    report: Option<&str>,
    bills: &[BillAllocation],
    openings: &[OpeningBillBalance],
    config: &ReconConfig,
) -> Reconciliation {
    if let Some(raw) = report {
        match parse_outstanding_report(raw, config) {
            Ok(recon) => return recon,
            Err(e) => log::warn!("outstanding report unusable, netting instead: {e}"),
        }
    }
    reconcile(bills, openings, config)
}
