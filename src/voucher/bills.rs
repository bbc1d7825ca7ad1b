use chrono::NaiveDate;

use crate::core::parse::{parse_amount, parse_credit_period};
use crate::core::{BillAllocation, BillType};
use crate::xml::Element;

use super::tags;

/// Bill allocations of one voucher, in document order.
///
/// Each allocation is attributed to the nearest enclosing element that names
/// a ledger, or to `counterparty` when none does. Allocations without a bill
/// name are dropped; a missing bill type means "New Ref".
pub fn extract_bill_allocations(
    voucher: &Element,
    identity_key: &str,
    date: NaiveDate,
    counterparty: &str,
) -> Vec<BillAllocation> {
    let mut out = Vec::new();
    let ctx = Context {
        identity_key,
        date,
    };
    collect(voucher, counterparty, &ctx, &mut out);
    out
}

struct Context<'a> {
    identity_key: &'a str,
    date: NaiveDate,
}

fn collect(el: &Element, ledger: &str, ctx: &Context<'_>, out: &mut Vec<BillAllocation>) {
    for child in &el.children {
        if child.name == tags::BILL_ALLOCATIONS {
            if let Some(bill) = read_allocation(child, ledger, ctx) {
                out.push(bill);
            }
            continue;
        }
        let ledger = child.child_text(tags::LEDGER_NAME).unwrap_or(ledger);
        collect(child, ledger, ctx, out);
    }
}

fn read_allocation(el: &Element, ledger: &str, ctx: &Context<'_>) -> Option<BillAllocation> {
    let bill_name = el.first_child_text(&["NAME", "BILLNAME"])?;
    Some(BillAllocation {
        voucher_identity_key: ctx.identity_key.to_string(),
        voucher_date: ctx.date,
        ledger_name: ledger.to_string(),
        bill_name: bill_name.to_string(),
        amount: el.child_text(tags::AMOUNT).map(parse_amount).unwrap_or_default(),
        bill_type: BillType::from_source(el.child_text("BILLTYPE").unwrap_or_default()),
        credit_period_days: el.child_text("BILLCREDITPERIOD").and_then(parse_credit_period),
    })
}
