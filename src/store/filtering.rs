use crate::store::{COL_DATE, COL_STATION};
use crate::types::date_window::DateWindow;
use polars::prelude::{col, lit, Expr, LazyFrame};

pub trait ObservationFrameFilterExt {
    /// Filters an observation LazyFrame to a date window (inclusive on both sides).
    /// An absent bound leaves that side unbounded; a fully open window is a no-op.
    ///
    /// # Arguments
    /// * `window`: The [`DateWindow`] to keep.
    ///
    /// # Returns
    /// A new `LazyFrame` with the filter applied. Evaluation errors surface on `collect`.
    fn filter_dates(self, window: DateWindow) -> LazyFrame;

    /// Filters an observation LazyFrame to the rows of a single station.
    fn filter_station(self, station: &str) -> LazyFrame;
}

impl ObservationFrameFilterExt for LazyFrame {
    fn filter_dates(self, window: DateWindow) -> LazyFrame {
        match date_predicate(window) {
            Some(predicate) => self.filter(predicate),
            None => self,
        }
    }

    fn filter_station(self, station: &str) -> LazyFrame {
        self.filter(col(COL_STATION).eq(lit(station)))
    }
}

fn date_predicate(window: DateWindow) -> Option<Expr> {
    let lower = window.start.map(|start| col(COL_DATE).gt_eq(lit(start)));
    let upper = window.end.map(|end| col(COL_DATE).lt_eq(lit(end)));
    match (lower, upper) {
        (Some(lower), Some(upper)) => Some(lower.and(upper)),
        (lower, upper) => lower.or(upper),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::test_support::scenario_store;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn filter_dates_open_end() -> Result<(), Box<dyn std::error::Error>> {
        let store = scenario_store();
        let df = store
            .lazy()
            .frame
            .filter_dates(DateWindow::from(date(2017, 8, 2)))
            .collect()?;
        assert_eq!(df.height(), 1);
        Ok(())
    }

    #[test]
    fn filter_dates_unbounded_keeps_everything() -> Result<(), Box<dyn std::error::Error>> {
        let store = scenario_store();
        let df = store
            .lazy()
            .frame
            .filter_dates(DateWindow::default())
            .collect()?;
        assert_eq!(df.height(), 3);
        Ok(())
    }

    #[test]
    fn filter_station_and_dates_chain() -> Result<(), Box<dyn std::error::Error>> {
        let store = scenario_store();
        let df = store
            .lazy()
            .frame
            .filter_station("S1")
            .filter_dates(DateWindow::between(date(2017, 8, 1), date(2017, 8, 1)))
            .collect()?;
        assert_eq!(df.height(), 1);

        let empty = store
            .lazy()
            .frame
            .filter_station("S2")
            .filter_dates(DateWindow::from(date(2017, 8, 2)))
            .collect()?;
        assert_eq!(empty.height(), 0);
        Ok(())
    }
}
