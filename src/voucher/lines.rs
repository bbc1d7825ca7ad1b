use crate::core::LineFact;
use crate::core::parse::parse_amount;
use crate::xml::Element;

use super::tags;

/// Stock item lines of a voucher.
///
/// Exports carry the lines in one of two containers; the invoice-style
/// container wins when both are present so lines are never counted twice.
/// Entries without a stock item name are skipped.
pub fn inventory_lines(voucher: &Element) -> Vec<LineFact> {
    let mut entries = voucher.descendants(tags::ALL_INVENTORY_ENTRIES);
    if entries.is_empty() {
        entries = voucher.descendants(tags::INVENTORY_ENTRIES);
    }

    entries
        .into_iter()
        .filter_map(|entry| {
            let stock_item = entry.first_child_text(&["STOCKITEMNAME", "NAME"])?;
            Some(LineFact {
                stock_item: stock_item.to_string(),
                billed_qty: entry.child_text("BILLEDQTY").unwrap_or_default().to_string(),
                rate: entry.child_text("RATE").unwrap_or_default().to_string(),
                amount: entry.child_text(tags::AMOUNT).map(parse_amount).unwrap_or_default(),
                discount: entry.child_text("DISCOUNT").map(parse_amount).unwrap_or_default(),
            })
        })
        .collect()
}
