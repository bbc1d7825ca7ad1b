use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::core::{OutstandingReceivable, Result, VoucherFacts};
use crate::recon::Reconciliation;
use crate::voucher::{Extraction, extract_vouchers};

use super::batch::{BatchPlan, DateWindow};
use super::config::SyncConfig;
use super::store::AllocationStore;

/// Fetches raw voucher exports from the upstream system.
pub trait VoucherSource {
    /// Raw XML export of every voucher dated inside `window`.
    fn fetch_vouchers(&mut self, window: &DateWindow) -> Result<String>;
}

/// Persists reconciliation output.
pub trait ReceivableSink {
    /// Replace the whole outstanding set in one step.
    fn replace_all(&mut self, receivables: &[OutstandingReceivable]) -> Result<()>;
}

/// Extraction output of one window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRun {
    pub window: DateWindow,
    pub extraction: Extraction,
}

/// Result of [`run_extraction`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractionRun {
    /// Completed windows, in plan order.
    pub windows: Vec<WindowRun>,
    /// The stop flag ended the run before the plan was exhausted.
    pub stopped: bool,
}

impl ExtractionRun {
    pub fn voucher_count(&self) -> usize {
        self.windows.iter().map(|w| w.extraction.vouchers.len()).sum()
    }

    /// Supersede each completed window in `store` and return the vouchers.
    pub fn apply(self, store: &mut AllocationStore) -> Vec<VoucherFacts> {
        let mut vouchers = Vec::new();
        for run in self.windows {
            store.supersede(&run.window, run.extraction.bills);
            vouchers.extend(run.extraction.vouchers);
        }
        vouchers
    }
}

/// Fetch and extract every window of `plan`, one at a time.
///
/// Windows are separated by `config.batch_pause_ms`. `stop` is checked
/// before each window; once set, the run ends cleanly with the windows
/// completed so far. The first fetch or extraction error ends the run and
/// nothing from it is returned, so no partial batch reaches a store.
pub fn run_extraction<S: VoucherSource + ?Sized>(
    source: &mut S,
    plan: &BatchPlan,
    config: &SyncConfig,
    stop: &AtomicBool,
) -> Result<ExtractionRun> {
    config.validate()?;
    let pause = Duration::from_millis(config.batch_pause_ms);
    let mut run = ExtractionRun::default();

    for (i, window) in plan.windows().iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            std::thread::sleep(pause);
        }
        if stop.load(Ordering::Relaxed) {
            log::info!("sync stopped before {window}, {} of {} windows done", i, plan.len());
            run.stopped = true;
            break;
        }

        let raw = source.fetch_vouchers(window)?;
        let extraction = extract_vouchers(&raw, &config.extract)?;
        log::info!(
            "window {window}: {} vouchers, {} bill allocations, {} skipped",
            extraction.vouchers.len(),
            extraction.bills.len(),
            extraction.skipped.len()
        );
        run.windows.push(WindowRun {
            window: *window,
            extraction,
        });
    }
    Ok(run)
}

/// Hand a complete reconciliation to the sink.
pub fn publish<K: ReceivableSink + ?Sized>(sink: &mut K, recon: &Reconciliation) -> Result<()> {
    sink.replace_all(&recon.receivables)?;
    log::info!(
        "published {} outstanding receivables ({:?})",
        recon.receivables.len(),
        recon.source
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::VoucherError;
    use crate::recon::ReceivableSource;
    use chrono::NaiveDate;

    struct Canned {
        calls: Vec<DateWindow>,
        fail_on: Option<usize>,
    }

    impl VoucherSource for Canned {
        fn fetch_vouchers(&mut self, window: &DateWindow) -> Result<String> {
            self.calls.push(*window);
            if self.fail_on == Some(self.calls.len()) {
                return Err(VoucherError::Source("timeout".into()));
            }
            Ok(format!(
                "<ENVELOPE><HEADER><STATUS>1</STATUS></HEADER><BODY><DATA>\
                 <VOUCHER VCHTYPE=\"Sales\"><DATE>{}</DATE><VOUCHERNUMBER>S-{}</VOUCHERNUMBER>\
                 <PARTYLEDGERNAME>Acme</PARTYLEDGERNAME><AMOUNT>10</AMOUNT></VOUCHER>\
                 </DATA></BODY></ENVELOPE>",
                window.from.format("%Y%m%d"),
                self.calls.len()
            ))
        }
    }

    fn plan() -> BatchPlan {
        BatchPlan::new(
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 30).unwrap(),
            10,
        )
        .unwrap()
    }

    fn config() -> SyncConfig {
        SyncConfig {
            batch_pause_ms: 0,
            ..Default::default()
        }
    }

    #[test]
    fn runs_windows_in_order() {
        let mut source = Canned { calls: Vec::new(), fail_on: None };
        let run = run_extraction(&mut source, &plan(), &config(), &AtomicBool::new(false)).unwrap();
        assert!(!run.stopped);
        assert_eq!(run.windows.len(), 3);
        assert_eq!(run.voucher_count(), 3);
        assert_eq!(source.calls, plan().windows());
    }

    #[test]
    fn halts_on_first_error() {
        let mut source = Canned { calls: Vec::new(), fail_on: Some(2) };
        let err = run_extraction(&mut source, &plan(), &config(), &AtomicBool::new(false)).unwrap_err();
        assert!(matches!(err, VoucherError::Source(_)));
        assert_eq!(source.calls.len(), 2);
    }

    #[test]
    fn stop_flag_ends_cleanly() {
        let mut source = Canned { calls: Vec::new(), fail_on: None };
        let run = run_extraction(&mut source, &plan(), &config(), &AtomicBool::new(true)).unwrap();
        assert!(run.stopped);
        assert!(run.windows.is_empty());
        assert!(source.calls.is_empty());
    }

    struct Recording(Vec<Vec<OutstandingReceivable>>);

    impl ReceivableSink for Recording {
        fn replace_all(&mut self, receivables: &[OutstandingReceivable]) -> Result<()> {
            self.0.push(receivables.to_vec());
            Ok(())
        }
    }

    #[test]
    fn publish_hands_over_everything_once() {
        let recon = Reconciliation {
            source: ReceivableSource::Netting,
            receivables: Vec::new(),
            warnings: Vec::new(),
        };
        let mut sink = Recording(Vec::new());
        publish(&mut sink, &recon).unwrap();
        assert_eq!(sink.0.len(), 1);
    }
}
