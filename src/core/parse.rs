//! Lenient parsers for vendor field values.
//!
//! None of these fail: unparseable input maps to a default and is logged.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Date formats seen in exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y%m%d", "%Y-%m-%d", "%d-%b-%Y", "%d/%m/%Y", "%d-%m-%Y"];

/// Parse a monetary value.
///
/// Strips thousands separators, whitespace and currency symbols, reads a value
/// fully wrapped in parentheses as negative, accepts the vendor's `(-)` minus
/// marker. Anything else that does not parse is `0`.
pub fn parse_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let (negative, body) = match trimmed
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
    {
        Some(inner) => (true, inner),
        None => (false, trimmed),
    };

    let cleaned: String = body
        .replace("(-)", "-")
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, ',' | '₹' | '$' | '€' | '£' | '¥'))
        .collect();

    match Decimal::from_str(&cleaned).or_else(|_| Decimal::from_scientific(&cleaned)) {
        Ok(value) if negative => -value,
        Ok(value) => value,
        Err(_) => {
            log::warn!("unparseable amount {raw:?}, using 0");
            Decimal::ZERO
        }
    }
}

/// Parse a date in any of the accepted formats.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok());
    if parsed.is_none() {
        log::warn!("unparseable date {raw:?}");
    }
    parsed
}

/// "Yes"/"Y"/"true"/"1" (any case) are true, everything else false.
pub fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

/// Leading integer of a credit period such as `"30"` or `"30 Days"`.
pub fn parse_credit_period(raw: &str) -> Option<u32> {
    let digits: String = raw
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// Alteration counters are sometimes rendered with group separators ("1 234").
pub fn parse_alter_id(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect();
    cleaned.parse().ok()
}
