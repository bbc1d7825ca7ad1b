//! XML plumbing for vendor exports.
//!
//! The vendor emits control characters and character references that XML 1.0
//! forbids, so every document goes through [`sanitize`] before
//! [`parse_document`] builds a small owned element tree from it.

mod sanitize;
mod status;
mod tree;

pub use sanitize::{is_xml_char, sanitize};
pub use status::ensure_status_ok;
pub use tree::{Element, parse_document};

/// Sanitize, then parse.
pub fn parse_sanitized(raw: &str) -> crate::core::Result<Element> {
    parse_document(&sanitize(raw))
}
