//! Immutable run configuration

use crate::{Authority, WindowScheduler};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Parameters of one harvesting run: `[start, end)` and the filing authority
///
/// Validated once at construction and passed by reference to the pipeline;
/// nothing about a run is held as mutable state elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    start: NaiveDate,
    end: NaiveDate,
    authority: Authority,
}

impl RunConfig {
    /// Create a new run configuration
    ///
    /// # Errors
    /// Returns error if `end` is not after `start`
    pub fn new(start: NaiveDate, end: NaiveDate, authority: Authority) -> Result<Self, String> {
        if end <= start {
            return Err(format!(
                "End date {} (excluded) must be after start date {}",
                end, start
            ));
        }
        Ok(Self {
            start,
            end,
            authority,
        })
    }

    /// First filing date included
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First filing date excluded
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Filing authority
    pub fn authority(&self) -> &Authority {
        &self.authority
    }

    /// Total number of days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Windows for this run starting at `from` (clamped into the run range)
    pub fn windows_from(&self, from: NaiveDate, stride_days: u32) -> WindowScheduler {
        let from = from.clamp(self.start, self.end);
        WindowScheduler::new(from, self.end, stride_days)
    }

    /// Windows for the whole run
    pub fn windows(&self, stride_days: u32) -> WindowScheduler {
        WindowScheduler::new(self.start, self.end, stride_days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_run_config_validation() {
        assert!(RunConfig::new(date(2023, 1, 8), date(2023, 1, 1), Authority::european()).is_err());
        assert!(RunConfig::new(date(2023, 1, 1), date(2023, 1, 1), Authority::european()).is_err());

        let run = RunConfig::new(date(2023, 1, 1), date(2023, 1, 8), Authority::european()).unwrap();
        assert_eq!(run.days(), 7);
        assert_eq!(run.authority().as_str(), "EP");
    }

    #[test]
    fn test_windows_from_is_clamped() {
        let run = RunConfig::new(date(2023, 1, 1), date(2023, 1, 29), Authority::european()).unwrap();
        assert_eq!(run.windows(7).len(), 4);
        assert_eq!(run.windows_from(date(2023, 1, 15), 7).len(), 2);
        assert_eq!(run.windows_from(date(2022, 12, 1), 7).len(), 4);
        assert_eq!(run.windows_from(date(2023, 3, 1), 7).len(), 0);
    }
}
