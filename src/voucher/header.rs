use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::parse::{parse_alter_id, parse_amount, parse_bool, parse_date};
use crate::core::{Result, VoucherError};
use crate::xml::Element;

/// Header-level fields of one voucher element, before any resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherHeader {
    pub voucher_type: String,
    pub voucher_number: String,
    pub date: NaiveDate,
    /// Party name as given; `None` when the voucher names no party.
    pub party_name: Option<String>,
    /// GUID child, else GUID attribute, else REMOTEID attribute.
    pub vendor_id: Option<String>,
    /// Header AMOUNT, usually blank on day-book exports.
    pub header_amount: Decimal,
    pub reference: Option<String>,
    pub narration: Option<String>,
    pub alter_id: Option<u64>,
    pub is_cancelled: bool,
    pub is_optional: bool,
}

impl VoucherHeader {
    /// Read the header of a `VOUCHER` element.
    ///
    /// The date is the only required field; without it no stable identity
    /// can be derived, so its absence rejects the document.
    pub fn read(voucher: &Element) -> Result<Self> {
        let voucher_type = voucher
            .attr("VCHTYPE")
            .or_else(|| voucher.first_child_text(&["VOUCHERTYPENAME", "VCHTYPE"]))
            .unwrap_or_default()
            .to_string();
        let voucher_number = voucher
            .attr("VCHNUMBER")
            .or_else(|| voucher.first_child_text(&["VOUCHERNUMBER", "VCHNUMBER"]))
            .unwrap_or_default()
            .to_string();
        let vendor_id = voucher
            .child_text("GUID")
            .or_else(|| voucher.attr("GUID"))
            .or_else(|| voucher.attr("REMOTEID"))
            .map(str::to_string);

        let context = || {
            format!(
                "voucher {}",
                vendor_id
                    .clone()
                    .unwrap_or_else(|| format!("{voucher_type}/{voucher_number}"))
            )
        };
        let raw_date = voucher
            .child_text("DATE")
            .ok_or_else(|| VoucherError::MissingField {
                field: "DATE",
                context: context(),
            })?;
        let date = parse_date(raw_date).ok_or_else(|| VoucherError::InvalidDate(raw_date.into()))?;

        Ok(Self {
            party_name: voucher
                .first_child_text(&["PARTYLEDGERNAME", "PARTYNAME"])
                .map(str::to_string),
            header_amount: voucher.child_text("AMOUNT").map(parse_amount).unwrap_or_default(),
            reference: voucher
                .first_child_text(&["REFERENCE", "REFERENCENUMBER"])
                .map(str::to_string),
            narration: voucher.child_text("NARRATION").map(str::to_string),
            alter_id: voucher
                .child_text("ALTERID")
                .or_else(|| voucher.attr("ALTERID"))
                .and_then(parse_alter_id),
            is_cancelled: voucher.child_text("ISCANCELLED").is_some_and(parse_bool),
            is_optional: voucher.child_text("ISOPTIONAL").is_some_and(parse_bool),
            voucher_type,
            voucher_number,
            date,
            vendor_id,
        })
    }

    /// The type decides which ledger-entry container holds the party line.
    pub fn is_invoice_type(&self) -> bool {
        self.voucher_type.trim().eq_ignore_ascii_case("Invoice")
    }
}
