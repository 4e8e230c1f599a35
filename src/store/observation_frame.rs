//! Contains the `ObservationLazyFrame` structure for lazy operations on the observation table.

use crate::store::error::StoreError;
use crate::store::filtering::ObservationFrameFilterExt;
use crate::store::{COL_DATE, COL_PRCP, COL_STATION, COL_TOBS};
use crate::types::date_window::DateWindow;
use crate::types::observation::Observation;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch, which polars uses as day 0.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// A wrapper around a Polars `LazyFrame` holding observation rows
/// (`station`, `date`, `prcp`, `tobs`).
///
/// The frame is a query plan, not data: cloning it and collecting again
/// replays the same scan over the immutable store, so a sequence obtained from
/// [`crate::ObservationStore::observations_in_range`] can be consumed any
/// number of times. Rows come out in ascending `(date, station)` order because
/// the store keeps its table in that order and filters preserve it.
///
/// # Errors
///
/// Operations that trigger computation (`collect_observations`, `temperatures`, or
/// collecting [`ObservationLazyFrame::frame`] directly) can return a [`StoreError`].
#[derive(Clone)]
pub struct ObservationLazyFrame {
    /// The underlying Polars LazyFrame containing the observation rows.
    pub frame: LazyFrame,
}

impl ObservationLazyFrame {
    pub fn new(frame: LazyFrame) -> Self {
        Self { frame }
    }

    /// Filters the observations based on a Polars predicate expression.
    ///
    /// Returns a *new* `ObservationLazyFrame`; the original is left unchanged.
    ///
    /// # Example
    ///
    /// ```
    /// # use hawaii_climate::{Dataset, ObservationStore, Observation, StoreError};
    /// use chrono::NaiveDate;
    /// use polars::prelude::{col, lit};
    ///
    /// # fn main() -> Result<(), StoreError> {
    /// let date = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
    /// let store = ObservationStore::new(Dataset::new(
    ///     vec![],
    ///     vec![
    ///         Observation::new("S1", date, Some(0.5), Some(78.0)),
    ///         Observation::new("S2", date, None, Some(80.0)),
    ///     ],
    /// ))?;
    ///
    /// // Keep only days warmer than 79 °F
    /// let warm = store.lazy().filter(col("tobs").gt(lit(79.0f64)));
    /// assert_eq!(warm.collect_observations()?.len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn filter(&self, predicate: Expr) -> ObservationLazyFrame {
        ObservationLazyFrame::new(self.frame.clone().filter(predicate))
    }

    /// Restricts the observations to a date window (inclusive).
    pub fn get_range(&self, window: DateWindow) -> ObservationLazyFrame {
        ObservationLazyFrame::new(self.frame.clone().filter_dates(window))
    }

    /// Restricts the observations to a single station.
    pub fn for_station(&self, station: &str) -> ObservationLazyFrame {
        ObservationLazyFrame::new(self.frame.clone().filter_station(station))
    }

    /// Executes the plan and materialises the rows as [`Observation`] records.
    pub fn collect_observations(&self) -> Result<Vec<Observation>, StoreError> {
        let df = self.frame.clone().collect()?;
        let stations = get_column(&df, COL_STATION)?.str()?;
        let dates = date_values(&df, COL_DATE)?;
        let prcp = get_column(&df, COL_PRCP)?.f64()?;
        let tobs = get_column(&df, COL_TOBS)?.f64()?;

        let observations: Result<Vec<Observation>, StoreError> = stations
            .into_iter()
            .zip(dates)
            .zip(prcp.into_iter().zip(tobs))
            .map(|((station, date), (prcp, tobs))| {
                match (station, date) {
                    (Some(station), Some(date)) => Ok(Observation::new(station, date, prcp, tobs)),
                    _ => Err(StoreError::UnexpectedData {
                        message: "observation row without station or date".to_string(),
                    }),
                }
            })
            .collect();
        observations
    }

    /// Executes the plan and returns the non-null temperature readings in row order.
    pub fn temperatures(&self) -> Result<Vec<f64>, StoreError> {
        let df = self
            .frame
            .clone()
            .filter(col(COL_TOBS).is_not_null())
            .select([col(COL_TOBS)])
            .collect()?;
        let readings: Vec<f64> = get_column(&df, COL_TOBS)?
            .f64()?
            .into_iter()
            .flatten()
            .collect();
        Ok(readings)
    }
}

/// Retrieves a column by name from a DataFrame.
pub(crate) fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, StoreError> {
    df.column(name)
        .map_err(|e| StoreError::ColumnNotFound(name.to_string(), e))
}

/// Reads a Date column as calendar dates.
pub(crate) fn date_values(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDate>>, StoreError> {
    let days = get_column(df, name)?.cast(&DataType::Int32)?;
    let dates: Result<Vec<Option<NaiveDate>>, StoreError> = days
        .i32()?
        .into_iter()
        .map(|day| day.map(days_to_date).transpose())
        .collect();
    dates
}

/// Reads the first value of a Float64 column, if any.
pub(crate) fn first_f64(df: &DataFrame, name: &str) -> Result<Option<f64>, StoreError> {
    Ok(get_column(df, name)?.f64()?.get(0))
}

pub(crate) fn date_to_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

fn days_to_date(days: i32) -> Result<NaiveDate, StoreError> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_FROM_CE).ok_or_else(|| {
        StoreError::UnexpectedData {
            message: format!("date offset {days} is out of range"),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::scenario_store;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_offset_round_trips() {
        assert_eq!(date_to_days(date(1970, 1, 1)), 0);
        assert_eq!(days_to_date(date_to_days(date(2017, 8, 23))).unwrap(), date(2017, 8, 23));
    }

    #[test]
    fn collect_observations_is_ordered_by_date_then_station() -> Result<(), StoreError> {
        let store = scenario_store();
        let rows = store.lazy().collect_observations()?;
        let keys: Vec<(NaiveDate, &str)> =
            rows.iter().map(|o| (o.date, o.station.as_str())).collect();
        assert_eq!(
            keys,
            vec![
                (date(2017, 8, 1), "S1"),
                (date(2017, 8, 1), "S2"),
                (date(2017, 8, 2), "S1"),
            ]
        );
        assert_eq!(rows[1].precipitation, None);
        Ok(())
    }

    #[test]
    fn frame_can_be_collected_repeatedly() -> Result<(), StoreError> {
        let store = scenario_store();
        let frame = store.lazy().for_station("S1");
        let first = frame.collect_observations()?;
        let second = frame.collect_observations()?;
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        Ok(())
    }

    #[test]
    fn temperatures_skip_nulls() -> Result<(), StoreError> {
        let store = scenario_store();
        let temps = store
            .lazy()
            .get_range(DateWindow::between(date(2017, 8, 1), date(2017, 8, 1)))
            .temperatures()?;
        assert_eq!(temps, vec![78.0, 80.0]);
        Ok(())
    }
}
