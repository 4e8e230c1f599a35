use crate::types::observation::Observation;
use crate::types::station::Station;

/// The full set of stations and observations as produced by the dataset loader.
///
/// This is a plain value handed to [`crate::ObservationStore::new`] once at
/// startup; nothing mutates it afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub stations: Vec<Station>,
    pub observations: Vec<Observation>,
}

impl Dataset {
    pub fn new(stations: Vec<Station>, observations: Vec<Observation>) -> Self {
        Self {
            stations,
            observations,
        }
    }
}
