#![no_main]

use libfuzzer_sys::fuzz_target;
use voucherbook::core::{ExtractConfig, ReconConfig};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic; errors are fine, panics are bugs.
        if let Ok(extraction) = voucherbook::voucher::extract_vouchers(s, &ExtractConfig::default()) {
            let recon = voucherbook::recon::reconcile(&extraction.bills, &[], &ReconConfig::default());
            assert!(recon
                .receivables
                .iter()
                .all(|r| r.pending_amount.is_sign_positive() && !r.pending_amount.is_zero()));
        }
    }
});
