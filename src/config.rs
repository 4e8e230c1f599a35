//! Service configuration: where the dataset lives, where to listen, and the
//! pinned station/window served by the temperature-series route.

use crate::types::date_window::DateWindow;
use bon::Builder;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

pub const DEFAULT_TOBS_STATION: &str = "USC00519281";
pub const DEFAULT_PORT: u16 = 5000;

/// The fixed station and inclusive date window for the temperature-series route.
///
/// This is configuration, not a computed "most recent year". The defaults pin
/// the twelve months ending 2017-08-18 for the busiest station.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hawaii_climate::TobsWindow;
///
/// let window = TobsWindow::builder()
///     .station("USC00519397")
///     .start(NaiveDate::from_ymd_opt(2016, 1, 1).unwrap())
///     .end(NaiveDate::from_ymd_opt(2016, 12, 31).unwrap())
///     .build();
/// assert_eq!(window.station, "USC00519397");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct TobsWindow {
    #[builder(into)]
    pub station: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TobsWindow {
    pub fn dates(&self) -> DateWindow {
        DateWindow::between(self.start, self.end)
    }
}

impl Default for TobsWindow {
    fn default() -> Self {
        Self {
            station: DEFAULT_TOBS_STATION.to_string(),
            start: NaiveDate::from_ymd_opt(2016, 8, 18).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2017, 8, 18).unwrap_or_default(),
        }
    }
}

/// Everything the binary needs to start serving.
#[derive(Debug, Clone, Builder)]
pub struct ServiceConfig {
    /// SQLite file or directory holding the CSV pair.
    #[builder(into)]
    pub dataset: PathBuf,
    #[builder(default = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, DEFAULT_PORT)))]
    pub bind: SocketAddr,
    #[builder(default)]
    pub tobs: TobsWindow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tobs_window_spans_366_days() {
        let window = TobsWindow::default();
        assert_eq!(window.station, DEFAULT_TOBS_STATION);
        assert_eq!((window.end - window.start).num_days() + 1, 366);
    }

    #[test]
    fn service_config_defaults() {
        let config = ServiceConfig::builder().dataset("hawaii.sqlite").build();
        assert_eq!(config.bind.port(), DEFAULT_PORT);
        assert!(config.bind.ip().is_loopback());
        assert_eq!(config.tobs, TobsWindow::default());
    }
}
