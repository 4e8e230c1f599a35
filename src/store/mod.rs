pub mod error;
pub mod filtering;
pub mod observation_frame;
pub mod observation_store;

pub(crate) const COL_STATION: &str = "station";
pub(crate) const COL_DATE: &str = "date";
pub(crate) const COL_PRCP: &str = "prcp"; // Precipitation
pub(crate) const COL_TOBS: &str = "tobs"; // Observed temperature

#[cfg(test)]
pub(crate) mod test_support {
    use crate::store::observation_store::ObservationStore;
    use crate::types::dataset::Dataset;
    use crate::types::observation::Observation;
    use crate::types::station::{Location, Station};
    use chrono::NaiveDate;

    /// Two stations, three observations; S2 has no precipitation reading on 2017-08-01.
    pub fn scenario_dataset() -> Dataset {
        let d1 = NaiveDate::from_ymd_opt(2017, 8, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2017, 8, 2).unwrap();
        let location = Location {
            latitude: 21.0,
            longitude: -157.0,
            elevation: 10.0,
        };
        Dataset::new(
            vec![
                Station::new("S1", "Station One", location),
                Station::new("S2", "Station Two", location),
            ],
            vec![
                Observation::new("S1", d1, Some(0.5), Some(78.0)),
                Observation::new("S2", d1, None, Some(80.0)),
                Observation::new("S1", d2, Some(0.2), Some(75.0)),
            ],
        )
    }

    pub fn scenario_store() -> ObservationStore {
        ObservationStore::new(scenario_dataset()).unwrap()
    }
}
