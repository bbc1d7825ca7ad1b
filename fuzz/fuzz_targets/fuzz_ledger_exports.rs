#![no_main]

use libfuzzer_sys::fuzz_target;
use voucherbook::core::ReconConfig;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = voucherbook::recon::parse_opening_balances(s);
        let _ = voucherbook::recon::parse_outstanding_report(s, &ReconConfig::default());
    }
});
