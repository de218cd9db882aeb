//! Window scheduling - splitting a date range into bounded query windows

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default window length in days
pub const DEFAULT_STRIDE_DAYS: u32 = 7;

/// A filing-date range `[start, end)` queried as one unit
///
/// Invariant: `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Window {
    /// First filing date included
    pub start: NaiveDate,

    /// First filing date excluded
    pub end: NaiveDate,
}

impl Window {
    /// Create a new window
    ///
    /// # Errors
    /// Returns error if `end` is not after `start`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, String> {
        if end <= start {
            return Err(format!("Window end {} must be after start {}", end, start));
        }
        Ok(Self { start, end })
    }

    /// Length of the window in days
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

impl fmt::Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Iterator over the windows covering `[start, end)` at a fixed stride
///
/// Every window is `stride` days long except the last one, which is clipped
/// to `end`. The windows never overlap and their union is exactly the range.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use patnet_domain::WindowScheduler;
///
/// let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2023, 1, 20).unwrap();
/// let windows: Vec<_> = WindowScheduler::new(start, end, 7).collect();
/// assert_eq!(windows.len(), 3);
/// assert_eq!(windows[2].end, end);
/// ```
#[derive(Debug, Clone)]
pub struct WindowScheduler {
    cursor: NaiveDate,
    end: NaiveDate,
    stride: u32,
}

impl WindowScheduler {
    /// Create a scheduler; a zero stride is treated as one day
    pub fn new(start: NaiveDate, end: NaiveDate, stride_days: u32) -> Self {
        Self {
            cursor: start,
            end,
            stride: stride_days.max(1),
        }
    }

    /// Number of windows still to be produced: `ceil((end - cursor) / stride)`
    pub fn remaining(&self) -> usize {
        let days = (self.end - self.cursor).num_days();
        if days <= 0 {
            return 0;
        }
        let stride = i64::from(self.stride);
        ((days + stride - 1) / stride) as usize
    }
}

impl Iterator for WindowScheduler {
    type Item = Window;

    fn next(&mut self) -> Option<Window> {
        if self.cursor >= self.end {
            return None;
        }

        let stepped = self
            .cursor
            .checked_add_days(Days::new(u64::from(self.stride)))
            .unwrap_or(self.end);
        let window = Window {
            start: self.cursor,
            end: stepped.min(self.end),
        };
        self.cursor = window.end;
        Some(window)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WindowScheduler {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_week() {
        let windows: Vec<_> = WindowScheduler::new(date(2023, 1, 1), date(2023, 1, 8), DEFAULT_STRIDE_DAYS).collect();
        assert_eq!(windows, vec![Window { start: date(2023, 1, 1), end: date(2023, 1, 8) }]);
    }

    #[test]
    fn test_final_window_is_clipped() {
        let windows: Vec<_> = WindowScheduler::new(date(2023, 1, 1), date(2023, 1, 10), DEFAULT_STRIDE_DAYS).collect();
        assert_eq!(windows.len(), 2);
        assert_eq!(windows[1].start, date(2023, 1, 8));
        assert_eq!(windows[1].end, date(2023, 1, 10));
        assert_eq!(windows[1].days(), 2);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let scheduler = WindowScheduler::new(date(2023, 1, 1), date(2023, 1, 15), DEFAULT_STRIDE_DAYS);
        assert_eq!(scheduler.len(), 2);
        assert!(scheduler.into_iter().all(|w| w.days() == 7));
    }

    #[test]
    fn test_empty_range() {
        let mut scheduler = WindowScheduler::new(date(2023, 1, 8), date(2023, 1, 8), DEFAULT_STRIDE_DAYS);
        assert_eq!(scheduler.remaining(), 0);
        assert!(scheduler.next().is_none());
    }

    #[test]
    fn test_window_validation() {
        assert!(Window::new(date(2023, 1, 2), date(2023, 1, 1)).is_err());
        assert!(Window::new(date(2023, 1, 1), date(2023, 1, 1)).is_err());
        let window = Window::new(date(2023, 1, 1), date(2023, 1, 2)).unwrap();
        assert_eq!(window.days(), 1);
    }

    #[test]
    fn test_display() {
        let window = Window::new(date(2023, 1, 1), date(2023, 1, 8)).unwrap();
        assert_eq!(window.to_string(), "2023-01-01 - 2023-01-08");
    }
}
