use crate::core::parse::{parse_amount, parse_bool, parse_credit_period, parse_date};
use crate::core::{OpeningBillBalance, Result};
use crate::xml::{ensure_status_ok, parse_sanitized};

use super::ledger_bill_lists;

/// Opening bill balances from a ledger-master export.
///
/// Every bill allocation nested under a named `LEDGER` becomes one record,
/// blank names and zero balances included; [`super::reconcile`] decides
/// what to skip.
pub fn parse_opening_balances(raw: &str) -> Result<Vec<OpeningBillBalance>> {
    let root = parse_sanitized(raw)?;
    ensure_status_ok(&root)?;

    let balances: Vec<OpeningBillBalance> = ledger_bill_lists(&root)
        .into_iter()
        .map(|(ledger, bill)| OpeningBillBalance {
            ledger_name: ledger.to_string(),
            bill_name: bill.child_text("NAME").unwrap_or_default().to_string(),
            bill_date: bill.child_text("BILLDATE").and_then(parse_date),
            opening_balance: bill
                .child_text("OPENINGBALANCE")
                .map(parse_amount)
                .unwrap_or_default(),
            credit_period_days: bill.child_text("BILLCREDITPERIOD").and_then(parse_credit_period),
            is_advance: bill.child_text("ISADVANCE").is_some_and(parse_bool),
        })
        .collect();

    log::debug!("parsed {} opening bill balances", balances.len());
    Ok(balances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn reads_ledger_bills() {
        let xml = r#"<ENVELOPE><BODY><DATA>
            <LEDGER NAME="Acme Distributors">
              <PARENT>Sundry Debtors</PARENT>
              <BILLALLOCATIONS.LIST>
                <NAME>OB-1</NAME>
                <BILLDATE>20250331</BILLDATE>
                <OPENINGBALANCE>-10,000.00</OPENINGBALANCE>
                <BILLCREDITPERIOD>45 Days</BILLCREDITPERIOD>
                <ISADVANCE>No</ISADVANCE>
              </BILLALLOCATIONS.LIST>
              <BILLALLOCATIONS.LIST>
                <NAME>ADV-1</NAME>
                <OPENINGBALANCE>500</OPENINGBALANCE>
                <ISADVANCE>Yes</ISADVANCE>
              </BILLALLOCATIONS.LIST>
            </LEDGER>
            <LEDGER><BILLALLOCATIONS.LIST><NAME>X</NAME></BILLALLOCATIONS.LIST></LEDGER>
        </DATA></BODY></ENVELOPE>"#;
        let balances = parse_opening_balances(xml).unwrap();
        assert_eq!(balances.len(), 2);
        let ob = &balances[0];
        assert_eq!(ob.ledger_name, "Acme Distributors");
        assert_eq!(ob.bill_name, "OB-1");
        assert_eq!(ob.bill_date, NaiveDate::from_ymd_opt(2025, 3, 31));
        assert_eq!(ob.opening_balance, dec!(-10000.00));
        assert_eq!(ob.credit_period_days, Some(45));
        assert!(!ob.is_advance);
        assert!(balances[1].is_advance);
        assert_eq!(balances[1].bill_date, None);
    }

    #[test]
    fn status_error_propagates() {
        let xml = "<ENVELOPE><HEADER><STATUS>0</STATUS></HEADER></ENVELOPE>";
        assert!(parse_opening_balances(xml).is_err());
    }
}
