//! The immutable in-memory observation store.
//!
//! Observations are held in a single Polars `DataFrame` sorted by
//! `(date, station)`; stations are held in a `Vec` sorted by id. Nothing is
//! mutated after [`ObservationStore::new`] returns, so one store can be shared
//! by reference (typically behind an `Arc`) between any number of readers.

use crate::store::error::StoreError;
use crate::store::observation_frame::{date_to_days, ObservationLazyFrame};
use crate::store::{COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use crate::types::dataset::Dataset;
use crate::types::date_window::DateWindow;
use crate::types::station::Station;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;

pub struct ObservationStore {
    observations: DataFrame,
    stations: Vec<Station>,
    latest: Option<NaiveDate>,
}

#[bon]
impl ObservationStore {
    /// Builds the store from a loaded [`Dataset`].
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DataFrameProcessing`] if the observation table cannot be
    /// assembled. An empty dataset is accepted here; it is reported per query by
    /// [`ObservationStore::max_date`].
    pub fn new(dataset: Dataset) -> Result<Self, StoreError> {
        let Dataset {
            mut stations,
            mut observations,
        } = dataset;
        stations.sort_by(|a, b| a.id.cmp(&b.id));
        observations.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.station.cmp(&b.station)));

        let latest = observations.last().map(|o| o.date);
        let rows = observations.len();

        let mut station_ids = Vec::with_capacity(rows);
        let mut days = Vec::with_capacity(rows);
        let mut prcp = Vec::with_capacity(rows);
        let mut tobs = Vec::with_capacity(rows);
        for o in observations {
            days.push(date_to_days(o.date));
            prcp.push(o.precipitation);
            tobs.push(o.temperature);
            station_ids.push(o.station);
        }

        let dates = Series::new(COL_DATE.into(), days).cast(&DataType::Date)?;
        let observations = DataFrame::new(vec![
            Column::new(COL_STATION.into(), station_ids),
            Column::from(dates),
            Column::new(COL_PRCP.into(), prcp),
            Column::new(COL_TOBS.into(), tobs),
        ])?;
        debug!(
            "Observation store built: {} rows, {} stations, latest date {:?}",
            observations.height(),
            stations.len(),
            latest
        );

        Ok(Self {
            observations,
            stations,
            latest,
        })
    }

    /// Number of observation rows.
    pub fn len(&self) -> usize {
        self.observations.height()
    }

    pub fn is_empty(&self) -> bool {
        self.latest.is_none()
    }

    /// The most recent observation date in the dataset.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EmptyDataset`] if there are no observations at all.
    pub fn max_date(&self) -> Result<NaiveDate, StoreError> {
        self.latest.ok_or(StoreError::EmptyDataset)
    }

    /// A lazy view over every observation.
    pub fn lazy(&self) -> ObservationLazyFrame {
        ObservationLazyFrame::new(self.observations.clone().lazy())
    }

    /// Observations matching an optional station and optional inclusive date bounds.
    ///
    /// Unspecified bounds are unbounded on that side. The result is lazy and can be
    /// collected repeatedly; rows are ordered by ascending date, then station id.
    ///
    /// # Example
    ///
    /// ```
    /// # use hawaii_climate::{Dataset, Observation, ObservationStore, StoreError};
    /// use chrono::NaiveDate;
    ///
    /// # fn main() -> Result<(), StoreError> {
    /// let d1 = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
    /// let d2 = NaiveDate::from_ymd_opt(2017, 8, 2).unwrap();
    /// let store = ObservationStore::new(Dataset::new(
    ///     vec![],
    ///     vec![
    ///         Observation::new("S1", d2, Some(0.2), Some(75.0)),
    ///         Observation::new("S1", d1, Some(0.5), Some(78.0)),
    ///     ],
    /// ))?;
    ///
    /// let rows = store
    ///     .observations_in_range()
    ///     .station("S1")
    ///     .from(d2)
    ///     .call()
    ///     .collect_observations()?;
    /// assert_eq!(rows.len(), 1);
    /// assert_eq!(rows[0].date, d2);
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub fn observations_in_range(
        &self,
        station: Option<&str>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> ObservationLazyFrame {
        let frame = self.lazy().get_range(DateWindow::new(from, to));
        match station {
            Some(station) => frame.for_station(station),
            None => frame,
        }
    }

    /// All stations, ordered by id.
    pub fn all_stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.stations
            .binary_search_by(|s| s.id.as_str().cmp(id))
            .ok()
            .map(|idx| &self.stations[idx])
    }

    pub fn contains_station(&self, id: &str) -> bool {
        self.station(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::{scenario_dataset, scenario_store};
    use crate::types::observation::Observation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn max_date_is_latest_observation() {
        let store = scenario_store();
        assert_eq!(store.max_date().unwrap(), date(2017, 8, 2));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn empty_store_reports_empty_dataset() {
        let store = ObservationStore::new(Dataset::default()).unwrap();
        assert!(store.is_empty());
        assert!(matches!(store.max_date(), Err(StoreError::EmptyDataset)));
        let rows = store
            .observations_in_range()
            .call()
            .collect_observations()
            .unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn stations_are_sorted_by_id() {
        let mut dataset = scenario_dataset();
        dataset.stations.reverse();
        let store = ObservationStore::new(dataset).unwrap();
        let ids: Vec<&str> = store.all_stations().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["S1", "S2"]);
        assert!(store.contains_station("S2"));
        assert!(!store.contains_station("S3"));
    }

    #[test]
    fn observations_in_range_applies_every_filter() -> Result<(), StoreError> {
        let store = scenario_store();

        let all = store.observations_in_range().call().collect_observations()?;
        assert_eq!(all.len(), 3);

        let s2 = store
            .observations_in_range()
            .station("S2")
            .call()
            .collect_observations()?;
        assert_eq!(
            s2,
            vec![Observation::new("S2", date(2017, 8, 1), None, Some(80.0))]
        );

        let until_first = store
            .observations_in_range()
            .to(date(2017, 8, 1))
            .call()
            .collect_observations()?;
        assert_eq!(until_first.len(), 2);
        assert!(until_first.iter().all(|o| o.date == date(2017, 8, 1)));

        let unknown = store
            .observations_in_range()
            .station("S9")
            .call()
            .collect_observations()?;
        assert!(unknown.is_empty());
        Ok(())
    }

    #[test]
    fn unsorted_input_is_ordered_on_build() -> Result<(), StoreError> {
        let mut dataset = scenario_dataset();
        dataset.observations.reverse();
        let store = ObservationStore::new(dataset)?;
        let dates: Vec<NaiveDate> = store
            .lazy()
            .collect_observations()?
            .into_iter()
            .map(|o| o.date)
            .collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
        Ok(())
    }
}
