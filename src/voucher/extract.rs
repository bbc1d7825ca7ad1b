use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::{BillAllocation, ExtractConfig, Result, VoucherError, VoucherFacts};
use crate::xml::{Element, ensure_status_ok, parse_sanitized};

use super::amount::{AmountCandidates, resolve_amount};
use super::bills::extract_bill_allocations;
use super::header::VoucherHeader;
use super::identity::{IdentityFields, resolve_identity};
use super::lines::inventory_lines;
use super::tags;

/// Both record streams of one export document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub vouchers: Vec<VoucherFacts>,
    pub bills: Vec<BillAllocation>,
    /// One message per voucher left out because its header was unusable.
    #[serde(default)]
    pub skipped: Vec<String>,
}

/// Extract every voucher in a raw export.
///
/// The document is sanitized, parsed and status-checked first; any failure
/// there rejects the whole batch. A voucher whose DATE is missing or
/// unparseable is skipped with a warning and recorded in
/// [`Extraction::skipped`]; the rest of the document is still extracted.
/// Vouchers that resolve to an identity key already seen in this document
/// are skipped (the first one wins).
pub fn extract_vouchers(raw: &str, config: &ExtractConfig) -> Result<Extraction> {
    config.validate()?;
    let root = parse_sanitized(raw)?;
    ensure_status_ok(&root)?;

    let elements = if root.name == tags::VOUCHER {
        vec![&root]
    } else {
        root.descendants(tags::VOUCHER)
    };

    let mut extraction = Extraction::default();
    let mut seen = HashSet::new();
    for element in elements {
        let (facts, bills) = match extract_voucher(element, config) {
            Ok(extracted) => extracted,
            Err(e @ (VoucherError::MissingField { .. } | VoucherError::InvalidDate(_))) => {
                log::warn!("skipping voucher: {e}");
                extraction.skipped.push(e.to_string());
                continue;
            }
            Err(e) => return Err(e),
        };
        if !seen.insert(facts.identity_key.clone()) {
            log::warn!("duplicate voucher key {} skipped", facts.identity_key);
            continue;
        }
        extraction.vouchers.push(facts);
        extraction.bills.extend(bills);
    }

    log::debug!(
        "extracted {} vouchers, {} bill allocations, {} skipped",
        extraction.vouchers.len(),
        extraction.bills.len(),
        extraction.skipped.len()
    );
    Ok(extraction)
}

/// Extract one `VOUCHER` element.
pub fn extract_voucher(
    voucher: &Element,
    config: &ExtractConfig,
) -> Result<(VoucherFacts, Vec<BillAllocation>)> {
    let header = VoucherHeader::read(voucher)?;

    let counterparty = match header.party_name.as_deref() {
        Some(name) => name.to_string(),
        None => {
            log::warn!(
                "{} {} on {} has no party, using {}",
                header.voucher_type,
                header.voucher_number,
                header.date,
                config.unknown_counterparty
            );
            config.unknown_counterparty.clone()
        }
    };

    let resolved = resolve_amount(&AmountCandidates::collect(voucher, &header, config));
    if resolved.total.is_zero() {
        log::warn!(
            "{} {} on {}: no amount could be resolved",
            header.voucher_type,
            header.voucher_number,
            header.date
        );
    }

    let (strategy, identity_key) = resolve_identity(
        &IdentityFields {
            vendor_id: header.vendor_id.as_deref(),
            voucher_type: &header.voucher_type,
            voucher_number: &header.voucher_number,
            date: header.date,
            counterparty: &counterparty,
            amount: resolved.total,
        },
        config,
    );
    log::trace!("{identity_key}: {strategy:?} key, amount from {:?}", resolved.source);

    let bills = extract_bill_allocations(voucher, &identity_key, header.date, &counterparty);

    let facts = VoucherFacts {
        voucher_type: header.voucher_type,
        voucher_number: header.voucher_number,
        date: header.date,
        counterparty_name: counterparty,
        identity_key,
        subtotal: resolved.subtotal,
        total: resolved.total,
        amount_source: resolved.source,
        inventory_lines: inventory_lines(voucher),
        vendor_id: header.vendor_id,
        reference: header.reference,
        narration: header.narration,
        alter_id: header.alter_id,
        is_cancelled: header.is_cancelled,
        is_optional: header.is_optional,
    };
    Ok((facts, bills))
}
