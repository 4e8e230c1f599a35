//! Maps request paths onto the façade's routes.

use std::collections::HashMap;
use std::fmt;

pub const API_PREFIX: &str = "/api/v1.0";
pub const PARAM_START: &str = "start";
pub const PARAM_END: &str = "end";

/// The queries the service answers.
///
/// Date parameters travel separately as strings (see [`Route::resolve`]) so the
/// façade owns all parsing and validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Index,
    Precipitation,
    Stations,
    Tobs,
    /// Temperature statistics from `start` onwards.
    TemperatureFrom,
    /// Temperature statistics for `start..=end`.
    TemperatureRange,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Index,
        Route::Precipitation,
        Route::Stations,
        Route::Tobs,
        Route::TemperatureFrom,
        Route::TemperatureRange,
    ];

    /// Splits a request path into its route and string parameters.
    ///
    /// Trailing slashes are ignored. `/api/v1.0/temp/<start>[/<end>]` is accepted
    /// as an alias of `/api/v1.0/<start>[/<end>]`. Returns `None` for paths outside
    /// the API; the date segments are not validated here.
    ///
    /// # Examples
    ///
    /// ```
    /// use hawaii_climate::Route;
    ///
    /// let (route, params) = Route::resolve("/api/v1.0/2017-01-01/2017-01-31").unwrap();
    /// assert_eq!(route, Route::TemperatureRange);
    /// assert_eq!(params["start"], "2017-01-01");
    /// assert_eq!(params["end"], "2017-01-31");
    ///
    /// assert!(Route::resolve("/api/v2.0/stations").is_none());
    /// ```
    pub fn resolve(path: &str) -> Option<(Route, HashMap<String, String>)> {
        let trimmed = path.trim_end_matches('/');
        if trimmed.is_empty() {
            return Some((Route::Index, HashMap::new()));
        }
        let rest = trimmed.strip_prefix(API_PREFIX)?.strip_prefix('/')?;
        let segments: Vec<&str> = rest.split('/').collect();

        let resolved = match segments.as_slice() {
            ["precipitation"] => (Route::Precipitation, HashMap::new()),
            ["stations"] => (Route::Stations, HashMap::new()),
            ["tobs"] => (Route::Tobs, HashMap::new()),
            ["temp", start] | [start] if !start.is_empty() => {
                (Route::TemperatureFrom, params(&[(PARAM_START, *start)]))
            }
            ["temp", start, end] | [start, end] if !start.is_empty() && !end.is_empty() => (
                Route::TemperatureRange,
                params(&[(PARAM_START, *start), (PARAM_END, *end)]),
            ),
            _ => return None,
        };
        Some(resolved)
    }

    /// The path template shown on the landing page.
    pub fn template(&self) -> &'static str {
        match self {
            Route::Index => "/",
            Route::Precipitation => "/api/v1.0/precipitation",
            Route::Stations => "/api/v1.0/stations",
            Route::Tobs => "/api/v1.0/tobs",
            Route::TemperatureFrom => "/api/v1.0/<start>",
            Route::TemperatureRange => "/api/v1.0/<start>/<end>",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.template())
    }
}

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_fixed_routes() {
        assert_eq!(Route::resolve("/").map(|r| r.0), Some(Route::Index));
        assert_eq!(Route::resolve("").map(|r| r.0), Some(Route::Index));
        assert_eq!(
            Route::resolve("/api/v1.0/precipitation").map(|r| r.0),
            Some(Route::Precipitation)
        );
        assert_eq!(
            Route::resolve("/api/v1.0/stations/").map(|r| r.0),
            Some(Route::Stations)
        );
        assert_eq!(Route::resolve("/api/v1.0/tobs").map(|r| r.0), Some(Route::Tobs));
    }

    #[test]
    fn resolves_date_routes_and_aliases() {
        let (route, params) = Route::resolve("/api/v1.0/2017-08-01").unwrap();
        assert_eq!(route, Route::TemperatureFrom);
        assert_eq!(params.get(PARAM_START).map(String::as_str), Some("2017-08-01"));
        assert!(!params.contains_key(PARAM_END));

        let (route, params) = Route::resolve("/api/v1.0/temp/2017-08-01/2017-08-02").unwrap();
        assert_eq!(route, Route::TemperatureRange);
        assert_eq!(params.get(PARAM_END).map(String::as_str), Some("2017-08-02"));

        let (route, _) = Route::resolve("/api/v1.0/temp/2017-08-01").unwrap();
        assert_eq!(route, Route::TemperatureFrom);
    }

    #[test]
    fn rejects_unknown_paths() {
        assert!(Route::resolve("/api").is_none());
        assert!(Route::resolve("/api/v1.0").is_none());
        assert!(Route::resolve("/other/precipitation").is_none());
        assert!(Route::resolve("/api/v1.0/a/b/c/d").is_none());
        assert!(Route::resolve("/api/v1.0//2017-01-01").is_none());
    }
}
