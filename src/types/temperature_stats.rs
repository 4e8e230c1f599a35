use serde::{Deserialize, Serialize};

/// Minimum, maximum and mean of the non-null temperature readings in a date range.
///
/// Only ever built from a non-empty set of readings, so all three values are
/// defined and `min <= avg <= max` holds.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct TemperatureStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
}

impl TemperatureStats {
    /// The `[min, max, avg]` triple served by the temperature routes.
    pub fn to_triple(self) -> [f64; 3] {
        [self.min, self.max, self.avg]
    }
}
