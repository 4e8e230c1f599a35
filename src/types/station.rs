//! Defines the data structures representing monitoring stations and their
//! geographical metadata.

use serde::{Deserialize, Serialize};

/// Represents a single fixed monitoring station.
///
/// Stations are loaded once at startup and never change afterwards. They are
/// keyed by [`Station::id`]; observations reference a station by that id only.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Station {
    /// The unique station code (e.g., "USC00519281").
    pub id: String,
    /// Human readable station name (e.g., "WAIHEE 837.5, HI US").
    pub name: String,
    /// Geographical location details (latitude, longitude, elevation).
    pub location: Location,
}

/// Represents the geographical location of a station.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct Location {
    /// Latitude in decimal degrees (positive for North, negative for South).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive for East, negative for West).
    pub longitude: f64,
    /// Elevation above sea level, in the unit of the source dataset.
    pub elevation: f64,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Location) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }

    /// Flattens the station into the `(id, name, lat, lon, elevation)` row the
    /// stations route exposes.
    pub fn to_row(&self) -> (String, String, f64, f64, f64) {
        (
            self.id.clone(),
            self.name.clone(),
            self.location.latitude,
            self.location.longitude,
            self.location.elevation,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_row_keeps_field_order() {
        let station = Station::new(
            "USC00519397",
            "WAIKIKI 717.2, HI US",
            Location {
                latitude: 21.2716,
                longitude: -157.8168,
                elevation: 3.0,
            },
        );
        assert_eq!(
            station.to_row(),
            (
                "USC00519397".to_string(),
                "WAIKIKI 717.2, HI US".to_string(),
                21.2716,
                -157.8168,
                3.0
            )
        );
    }
}
