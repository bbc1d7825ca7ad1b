use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::{Result, VoucherError};

/// Inclusive date range fetched in one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from <= date && date <= self.to
    }

    /// Number of calendar days covered.
    pub fn days(&self) -> i64 {
        (self.to - self.from).num_days() + 1
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from, self.to)
    }
}

/// Consecutive, non-overlapping windows covering a date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    windows: Vec<DateWindow>,
}

impl BatchPlan {
    /// Split `from..=to` into windows of at most `batch_days` days.
    pub fn new(from: NaiveDate, to: NaiveDate, batch_days: u32) -> Result<Self> {
        if batch_days == 0 {
            return Err(VoucherError::Config("batch_days must be at least 1".into()));
        }
        if from > to {
            return Err(VoucherError::Config(format!(
                "batch range starts after it ends: {from} > {to}"
            )));
        }

        let span = Days::new(u64::from(batch_days - 1));
        let mut windows = Vec::new();
        let mut start = from;
        loop {
            let end = start.checked_add_days(span).map_or(to, |d| d.min(to));
            windows.push(DateWindow { from: start, to: end });
            match end.succ_opt() {
                Some(next) if end < to => start = next,
                _ => break,
            }
        }
        Ok(Self { windows })
    }

    pub fn windows(&self) -> &[DateWindow] {
        &self.windows
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn splits_into_fifteen_day_windows() {
        let plan = BatchPlan::new(date(2025, 4, 1), date(2025, 4, 30), 15).unwrap();
        assert_eq!(
            plan.windows(),
            &[
                DateWindow { from: date(2025, 4, 1), to: date(2025, 4, 15) },
                DateWindow { from: date(2025, 4, 16), to: date(2025, 4, 30) },
            ]
        );
    }

    #[test]
    fn last_window_is_clipped() {
        let plan = BatchPlan::new(date(2025, 4, 1), date(2025, 4, 20), 15).unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.windows()[1].days(), 5);
        assert!(plan.windows()[1].contains(date(2025, 4, 20)));
    }

    #[test]
    fn single_day() {
        let plan = BatchPlan::new(date(2025, 4, 1), date(2025, 4, 1), 15).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.windows()[0].days(), 1);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(BatchPlan::new(date(2025, 4, 2), date(2025, 4, 1), 15).is_err());
        assert!(BatchPlan::new(date(2025, 4, 1), date(2025, 4, 2), 0).is_err());
    }
}
