use super::tree::Element;
use crate::core::{Result, VoucherError};

/// Reject a response whose STATUS is present and not "1".
///
/// Older servers omit STATUS on success, so absence is accepted. An empty
/// export with STATUS 1 is fine too; the caller just gets no vouchers.
pub fn ensure_status_ok(root: &Element) -> Result<()> {
    let status = if root.name == "STATUS" {
        Some(root)
    } else {
        root.find("STATUS")
    };
    let Some(status) = status else {
        return Ok(());
    };
    let value = status.text.trim();
    if value == "1" {
        return Ok(());
    }

    let message = ["LINEERROR", "ERROR"]
        .iter()
        .find_map(|tag| root.find(tag).and_then(Element::trimmed_text))
        .map(str::to_string);
    log::warn!("upstream STATUS={value}: {message:?}");
    Err(VoucherError::Status {
        status: value.to_string(),
        message,
    })
}
