//! Turns filtered observation frames into the derived results the API serves.

use crate::config::TobsWindow;
use crate::error::ClimateError;
use crate::store::observation_frame::{date_values, first_f64, get_column};
use crate::store::observation_store::ObservationStore;
use crate::store::{COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use crate::types::date_window::DateWindow;
use crate::types::station::Station;
use crate::types::temperature_stats::TemperatureStats;
use bon::bon;
use chrono::{Duration, NaiveDate};
use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;

/// Length of the trailing window used by [`AggregationEngine::daily_precipitation`].
pub const TRAILING_YEAR_DAYS: i64 = 365;

const COL_MIN: &str = "min";
const COL_MAX: &str = "max";
const COL_AVG: &str = "avg";
const COL_COUNT: &str = "count";

/// Read-only aggregation over a borrowed [`ObservationStore`].
///
/// The engine holds nothing but the reference, so it is cheap to create per
/// request and every method is a pure function of the store's contents.
pub struct AggregationEngine<'a> {
    store: &'a ObservationStore,
}

#[bon]
impl<'a> AggregationEngine<'a> {
    pub fn new(store: &'a ObservationStore) -> Self {
        Self { store }
    }

    /// Mean precipitation per date over the trailing year ending at the latest
    /// observation date.
    ///
    /// Null readings count towards neither the sum nor the number of readings.
    /// Dates without a single non-null reading are left out of the map.
    ///
    /// # Errors
    ///
    /// [`ClimateError::EmptyDataset`] if the store holds no observations.
    pub fn daily_precipitation(&self) -> Result<BTreeMap<NaiveDate, f64>, ClimateError> {
        let latest = self.store.max_date()?;
        let since = latest - Duration::days(TRAILING_YEAR_DAYS);
        debug!("Aggregating daily precipitation for {since}..={latest}");

        let df = self
            .store
            .observations_in_range()
            .from(since)
            .call()
            .frame
            .filter(col(COL_PRCP).is_not_null())
            .group_by([col(COL_DATE)])
            .agg([col(COL_PRCP).mean()])
            .collect()?;

        let dates = date_values(&df, COL_DATE)?;
        let means = get_column(&df, COL_PRCP)?.f64()?;
        let daily: BTreeMap<NaiveDate, f64> = dates
            .into_iter()
            .zip(means)
            .filter_map(|(date, mean)| Some((date?, mean?)))
            .collect();
        Ok(daily)
    }

    /// The temperature readings of the configured station inside the configured
    /// window, in ascending date order with null readings dropped.
    ///
    /// # Errors
    ///
    /// [`ClimateError::UnknownStation`] if the station is not in the roster.
    pub fn temperature_series(&self, window: &TobsWindow) -> Result<Vec<f64>, ClimateError> {
        if !self.store.contains_station(&window.station) {
            return Err(ClimateError::UnknownStation(window.station.clone()));
        }
        let readings = self
            .store
            .observations_in_range()
            .station(&window.station)
            .from(window.start)
            .to(window.end)
            .call()
            .temperatures()?;
        Ok(readings)
    }

    /// Minimum, maximum and mean temperature across all stations from `start`
    /// onwards, optionally bounded by an inclusive `end`.
    ///
    /// # Errors
    ///
    /// * [`ClimateError::InvalidRange`] if `end` is before `start`. The store is
    ///   not queried in that case.
    /// * [`ClimateError::NoDataInRange`] if no non-null reading falls in the range.
    ///
    /// # Example
    ///
    /// ```
    /// # use hawaii_climate::{AggregationEngine, ClimateError, Dataset, Observation, ObservationStore};
    /// use chrono::NaiveDate;
    ///
    /// # fn main() -> Result<(), ClimateError> {
    /// let day = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
    /// let store = ObservationStore::new(Dataset::new(
    ///     vec![],
    ///     vec![
    ///         Observation::new("S1", day, Some(0.5), Some(78.0)),
    ///         Observation::new("S2", day, None, Some(80.0)),
    ///     ],
    /// ))?;
    ///
    /// let stats = AggregationEngine::new(&store)
    ///     .temperature_stats(day)
    ///     .end(day)
    ///     .call()?;
    /// assert_eq!(stats.to_triple(), [78.0, 80.0, 79.0]);
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = temperature_stats)]
    #[doc(hidden)]
    pub fn build_temperature_stats(
        &self,
        #[builder(start_fn)] start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> Result<TemperatureStats, ClimateError> {
        let window = DateWindow::new(Some(start), end);
        match end {
            Some(end) if window.is_inverted() => {
                return Err(ClimateError::InvalidRange { start, end });
            }
            _ => {}
        }

        let df = self
            .store
            .observations_in_range()
            .from(start)
            .maybe_to(end)
            .call()
            .frame
            .filter(col(COL_TOBS).is_not_null())
            .select([
                col(COL_TOBS).min().alias(COL_MIN),
                col(COL_TOBS).max().alias(COL_MAX),
                col(COL_TOBS).mean().alias(COL_AVG),
            ])
            .collect()?;

        match (
            first_f64(&df, COL_MIN)?,
            first_f64(&df, COL_MAX)?,
            first_f64(&df, COL_AVG)?,
        ) {
            (Some(min), Some(max), Some(avg)) => Ok(TemperatureStats { min, max, avg }),
            _ => Err(ClimateError::NoDataInRange(window)),
        }
    }

    /// Every station, ordered by id.
    pub fn station_roster(&self) -> Vec<Station> {
        self.store.all_stations().to_vec()
    }

    /// Number of observations per station, busiest first; ties are ordered by id.
    pub fn most_active_stations(&self) -> Result<Vec<(String, usize)>, ClimateError> {
        let df = self
            .store
            .lazy()
            .frame
            .group_by([col(COL_STATION)])
            .agg([len().cast(DataType::UInt64).alias(COL_COUNT)])
            .collect()?;

        let stations = get_column(&df, COL_STATION)?.str()?;
        let counts = get_column(&df, COL_COUNT)?.u64()?;
        let mut ranking: Vec<(String, usize)> = stations
            .into_iter()
            .zip(counts)
            .filter_map(|(station, count)| Some((station?.to_string(), count? as usize)))
            .collect();
        ranking.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(ranking)
    }
}
