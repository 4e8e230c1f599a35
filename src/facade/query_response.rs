use serde::Serialize;
use std::collections::BTreeMap;

/// A station as served by the roster route: `(id, name, latitude, longitude, elevation)`.
pub type StationRow = (String, String, f64, f64, f64);

/// The transport-neutral result of a façade query.
///
/// Serialises untagged, so each variant renders as its bare JSON value:
/// a string, an object keyed by ISO date, an array of station tuples, an array
/// of readings, or a `[min, max, avg]` triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum QueryResponse {
    Index(String),
    Precipitation(BTreeMap<String, f64>),
    Stations(Vec<StationRow>),
    Tobs(Vec<f64>),
    TemperatureStats([f64; 3]),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serialises_as_bare_values() {
        let precipitation = QueryResponse::Precipitation(BTreeMap::from([
            ("2017-08-02".to_string(), 0.2),
            ("2017-08-01".to_string(), 0.5),
        ]));
        assert_eq!(
            serde_json::to_value(&precipitation).unwrap(),
            json!({"2017-08-01": 0.5, "2017-08-02": 0.2})
        );

        let stations = QueryResponse::Stations(vec![(
            "S1".to_string(),
            "Station One".to_string(),
            21.0,
            -157.0,
            10.0,
        )]);
        assert_eq!(
            serde_json::to_value(&stations).unwrap(),
            json!([["S1", "Station One", 21.0, -157.0, 10.0]])
        );

        let stats = QueryResponse::TemperatureStats([78.0, 80.0, 79.0]);
        assert_eq!(serde_json::to_string(&stats).unwrap(), "[78.0,80.0,79.0]");
    }
}
