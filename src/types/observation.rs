use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One station's recorded precipitation and temperature for one calendar date.
///
/// Both measurements are optional: the source dataset has days where a station
/// reported temperature but no precipitation (and vice versa). A missing value
/// is never the same thing as `0.0`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub station: String,                // station
    pub date: NaiveDate,                // date
    pub precipitation: Option<f64>,     // prcp
    pub temperature: Option<f64>,       // tobs (°F)
}

impl Observation {
    pub fn new(
        station: impl Into<String>,
        date: NaiveDate,
        precipitation: Option<f64>,
        temperature: Option<f64>,
    ) -> Self {
        Self {
            station: station.into(),
            date,
            precipitation,
            temperature,
        }
    }
}
