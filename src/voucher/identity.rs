//! Stable identity keys for vouchers.
//!
//! Keys are derived from content only, so re-extracting the same document
//! always yields the same keys. Strategies are tried in order of how much the
//! source can be trusted to keep the value stable.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::ExtractConfig;

/// Fields that feed the identity key.
#[derive(Debug, Clone, Copy)]
pub struct IdentityFields<'a> {
    pub vendor_id: Option<&'a str>,
    pub voucher_type: &'a str,
    pub voucher_number: &'a str,
    pub date: NaiveDate,
    /// Resolved counterparty, already defaulted when the source has none.
    pub counterparty: &'a str,
    /// Resolved total.
    pub amount: Decimal,
}

/// Which rule produced a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdentityStrategy {
    /// Vendor GUID, used verbatim.
    VendorId,
    /// `type/number/date/counterparty`.
    VoucherNumber,
    /// `type/date/counterparty#<hash>`.
    ContentHash,
}

type KeyStrategy = fn(&IdentityFields<'_>) -> Option<String>;

const STRATEGIES: &[(IdentityStrategy, KeyStrategy)] = &[
    (IdentityStrategy::VendorId, vendor_id_key),
    (IdentityStrategy::VoucherNumber, voucher_number_key),
];

fn vendor_id_key(fields: &IdentityFields<'_>) -> Option<String> {
    fields
        .vendor_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

fn voucher_number_key(fields: &IdentityFields<'_>) -> Option<String> {
    let number = fields.voucher_number.trim();
    (!number.is_empty()).then(|| {
        format!(
            "{}/{}/{}/{}",
            fields.voucher_type, number, fields.date, fields.counterparty
        )
    })
}

/// Content hash over `type|date|counterparty|amount`, hex encoded and cut
/// to `config.hash_prefix_len` characters. Always succeeds.
fn content_hash_key(fields: &IdentityFields<'_>, config: &ExtractConfig) -> String {
    let payload = format!(
        "{}|{}|{}|{:.2}",
        fields.voucher_type, fields.date, fields.counterparty, fields.amount
    );
    let digest = Sha256::digest(payload.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{b:02x}")).collect();
    let len = config.hash_prefix_len.clamp(1, hex.len());
    format!(
        "{}/{}/{}#{}",
        fields.voucher_type,
        fields.date,
        fields.counterparty,
        &hex[..len]
    )
}

/// Pick the first applicable strategy and build the key.
pub fn resolve_identity(
    fields: &IdentityFields<'_>,
    config: &ExtractConfig,
) -> (IdentityStrategy, String) {
    STRATEGIES
        .iter()
        .find_map(|(strategy, build)| build(fields).map(|key| (*strategy, key)))
        .unwrap_or_else(|| {
            (
                IdentityStrategy::ContentHash,
                content_hash_key(fields, config),
            )
        })
}

/// Identity key of a voucher.
pub fn identity_key(fields: &IdentityFields<'_>, config: &ExtractConfig) -> String {
    resolve_identity(fields, config).1
}
