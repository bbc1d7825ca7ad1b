use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::{Result, VoucherError};
use super::types::UNKNOWN_COUNTERPARTY;

/// Settings for voucher extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Number of leading characters compared when matching the counterparty
    /// against ledger-entry names (the source truncates long names).
    pub party_prefix_len: usize,
    /// Hex characters of the content hash kept in fallback identity keys.
    pub hash_prefix_len: usize,
    /// Counterparty name used when a voucher names none.
    pub unknown_counterparty: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            party_prefix_len: 15,
            hash_prefix_len: 16,
            unknown_counterparty: UNKNOWN_COUNTERPARTY.into(),
        }
    }
}

impl ExtractConfig {
    pub fn validate(&self) -> Result<()> {
        if self.party_prefix_len == 0 {
            return Err(VoucherError::Config(
                "party_prefix_len must be at least 1".into(),
            ));
        }
        if !(1..=64).contains(&self.hash_prefix_len) {
            return Err(VoucherError::Config(format!(
                "hash_prefix_len must be within 1..=64, got {}",
                self.hash_prefix_len
            )));
        }
        if self.unknown_counterparty.trim().is_empty() {
            return Err(VoucherError::Config(
                "unknown_counterparty must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Settings for bill reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconConfig {
    /// Date of the opening-balance snapshot. Opening bills without their own
    /// bill date are dated here.
    pub opening_date: Option<NaiveDate>,
    /// Decimal places kept on output amounts.
    pub amount_scale: u32,
}

impl Default for ReconConfig {
    fn default() -> Self {
        Self {
            opening_date: None,
            amount_scale: 2,
        }
    }
}
