//! Inclusive, optionally open-ended date windows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents a date range with optional start and end dates.
///
/// A missing bound means the window is unbounded on that side. Both bounds are
/// inclusive.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hawaii_climate::DateWindow;
///
/// let start = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
/// let window = DateWindow::from(start);
/// assert_eq!(window.end, None);
/// assert_eq!(window.to_string(), "2017-08-01..");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateWindow {
    /// The earliest date included in the window, if bounded.
    pub start: Option<NaiveDate>,
    /// The latest date included in the window, if bounded.
    pub end: Option<NaiveDate>,
}

impl DateWindow {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    /// A window closed on both sides.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(Some(start), Some(end))
    }

    /// Returns `true` when `start` lies after `end`. Such a window can never
    /// match anything and callers treat it as malformed.
    pub fn is_inverted(&self) -> bool {
        matches!((self.start, self.end), (Some(start), Some(end)) if start > end)
    }
}

impl From<NaiveDate> for DateWindow {
    fn from(start: NaiveDate) -> Self {
        Self::new(Some(start), None)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.start, self.end) {
            (Some(start), Some(end)) => write!(f, "{start}..={end}"),
            (Some(start), None) => write!(f, "{start}.."),
            (None, Some(end)) => write!(f, "..={end}"),
            (None, None) => write!(f, ".."),
        }
    }
}
