use serde::{Deserialize, Serialize};

use crate::core::{ExtractConfig, ReconConfig, Result, VoucherError};

/// Settings for a batched sync run.
///
/// Loadable from TOML; every field has a default, so an empty document is
/// a valid configuration:
///
/// ```toml
/// batch_days = 7
/// batch_pause_ms = 2000
///
/// [extract]
/// hash_prefix_len = 20
///
/// [recon]
/// opening_date = "2025-04-01"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Days per fetch window.
    pub batch_days: u32,
    /// Pause between windows, in milliseconds.
    pub batch_pause_ms: u64,
    pub extract: ExtractConfig,
    pub recon: ReconConfig,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            batch_days: 15,
            batch_pause_ms: 1000,
            extract: ExtractConfig::default(),
            recon: ReconConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SyncConfig =
            toml::from_str(input).map_err(|e| VoucherError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.batch_days == 0 {
            return Err(VoucherError::Config("batch_days must be at least 1".into()));
        }
        self.extract.validate()
    }
}

/// Builder for [`SyncConfig`].
///
/// # Example
///
/// ```
/// use voucherbook::sync::SyncConfigBuilder;
/// use chrono::NaiveDate;
///
/// let config = SyncConfigBuilder::new()
///     .batch_days(7)
///     .batch_pause_ms(0)
///     .opening_date(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap())
///     .build()
///     .unwrap();
/// assert_eq!(config.batch_days, 7);
/// ```
#[derive(Debug, Default)]
pub struct SyncConfigBuilder {
    config: SyncConfig,
}

impl SyncConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_days(mut self, days: u32) -> Self {
        self.config.batch_days = days;
        self
    }

    pub fn batch_pause_ms(mut self, ms: u64) -> Self {
        self.config.batch_pause_ms = ms;
        self
    }

    pub fn party_prefix_len(mut self, len: usize) -> Self {
        self.config.extract.party_prefix_len = len;
        self
    }

    pub fn hash_prefix_len(mut self, len: usize) -> Self {
        self.config.extract.hash_prefix_len = len;
        self
    }

    pub fn unknown_counterparty(mut self, name: impl Into<String>) -> Self {
        self.config.extract.unknown_counterparty = name.into();
        self
    }

    /// Date assigned to opening bills that carry none of their own.
    pub fn opening_date(mut self, date: chrono::NaiveDate) -> Self {
        self.config.recon.opening_date = Some(date);
        self
    }

    pub fn amount_scale(mut self, scale: u32) -> Self {
        self.config.recon.amount_scale = scale;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<SyncConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_toml_is_default() {
        let cfg = SyncConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, SyncConfig::default());
        assert_eq!(cfg.batch_days, 15);
        assert_eq!(cfg.batch_pause_ms, 1000);
    }

    #[test]
    fn nested_sections() {
        let cfg = SyncConfig::from_toml_str(
            r#"
            batch_days = 7
            batch_pause_ms = 250

            [extract]
            hash_prefix_len = 20

            [recon]
            opening_date = "2025-04-01"
            amount_scale = 3
            "#,
        )
        .unwrap();
        assert_eq!(cfg.batch_days, 7);
        assert_eq!(cfg.batch_pause_ms, 250);
        assert_eq!(cfg.extract.hash_prefix_len, 20);
        assert_eq!(cfg.extract.party_prefix_len, 15);
        assert_eq!(cfg.recon.opening_date, NaiveDate::from_ymd_opt(2025, 4, 1));
        assert_eq!(cfg.recon.amount_scale, 3);
    }

    #[test]
    fn rejects_zero_batch_days() {
        let err = SyncConfig::from_toml_str("batch_days = 0").unwrap_err();
        assert!(matches!(err, VoucherError::Config(_)));
        assert!(SyncConfigBuilder::new().hash_prefix_len(0).build().is_err());
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(matches!(
            SyncConfig::from_toml_str("batch_days = \"many\""),
            Err(VoucherError::Config(_))
        ));
    }
}
