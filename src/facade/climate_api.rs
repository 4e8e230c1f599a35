//! The query façade: parses stringly-typed request parameters into typed
//! engine calls and shapes the results into [`QueryResponse`] values.

use crate::config::TobsWindow;
use crate::engine::aggregation_engine::AggregationEngine;
use crate::error::ClimateError;
use crate::facade::query_response::{QueryResponse, StationRow};
use crate::facade::route::{Route, PARAM_END, PARAM_START};
use crate::store::observation_store::ObservationStore;
use chrono::NaiveDate;
use log::debug;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Write;
use std::sync::Arc;

/// The only accepted external date format.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
const DATE_LEN: usize = 10;
const DATE_SEPARATORS: [usize; 2] = [4, 7];

/// Parses an ISO `YYYY-MM-DD` date.
///
/// Exactly ten characters: four-digit year, zero-padded month and day, `-`
/// separators. No sign, whitespace or other format is accepted.
///
/// # Errors
///
/// [`ClimateError::InvalidDate`] on anything else.
///
/// # Examples
///
/// ```
/// use hawaii_climate::parse_date;
///
/// assert!(parse_date("2017-08-01").is_ok());
/// assert!(parse_date("08012017").is_err());
/// assert!(parse_date("2017-8-1").is_err());
/// ```
pub fn parse_date(input: &str) -> Result<NaiveDate, ClimateError> {
    if !is_iso_date_shape(input) {
        return Err(ClimateError::InvalidDate {
            input: input.to_string(),
            source: None,
        });
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|e| ClimateError::InvalidDate {
        input: input.to_string(),
        source: Some(e),
    })
}

fn is_iso_date_shape(input: &str) -> bool {
    input.len() == DATE_LEN
        && input.bytes().enumerate().all(|(i, b)| {
            if DATE_SEPARATORS.contains(&i) {
                b == b'-'
            } else {
                b.is_ascii_digit()
            }
        })
}

/// Entry point for every query the service answers.
///
/// Holds a shared handle to the immutable store plus the configured
/// temperature-series window. Cloning is cheap and all methods take `&self`.
#[derive(Clone)]
pub struct ClimateApi {
    store: Arc<ObservationStore>,
    tobs: TobsWindow,
}

impl ClimateApi {
    pub fn new(store: Arc<ObservationStore>, tobs: TobsWindow) -> Self {
        Self { store, tobs }
    }

    pub fn engine(&self) -> AggregationEngine<'_> {
        AggregationEngine::new(&self.store)
    }

    pub fn store(&self) -> &ObservationStore {
        &self.store
    }

    pub fn tobs_window(&self) -> &TobsWindow {
        &self.tobs
    }

    /// A human-readable HTML listing of the available routes.
    pub fn index(&self) -> String {
        let mut html = String::from("<h1>Hawaii Climate API</h1>\n<p>Available routes:</p>\n<ul>\n");
        for route in Route::ALL {
            let description = match route {
                Route::Index => continue,
                Route::Precipitation => {
                    "Mean daily precipitation over the year up to the latest observation".to_string()
                }
                Route::Stations => "All weather stations".to_string(),
                Route::Tobs => format!(
                    "Temperature observations of station {} from {} to {}",
                    self.tobs.station, self.tobs.start, self.tobs.end
                ),
                Route::TemperatureFrom => {
                    "[min, max, avg] temperature from a start date onwards".to_string()
                }
                Route::TemperatureRange => {
                    "[min, max, avg] temperature between two dates, inclusive".to_string()
                }
            };
            let template = route.template().replace('<', "&lt;").replace('>', "&gt;");
            // Writing to a String cannot fail.
            let _ = writeln!(html, "<li><code>{template}</code>: {description}</li>");
        }
        html.push_str("</ul>\n<p>Dates are given as <code>YYYY-MM-DD</code>, e.g. <code>/api/v1.0/2017-01-01/2017-01-31</code>.</p>\n");
        html
    }

    /// Mean daily precipitation over the trailing year, keyed by ISO date.
    pub fn precipitation(&self) -> Result<BTreeMap<String, f64>, ClimateError> {
        let daily = self.engine().daily_precipitation()?;
        Ok(daily
            .into_iter()
            .map(|(date, mean)| (date.format(DATE_FORMAT).to_string(), mean))
            .collect())
    }

    pub fn stations(&self) -> Vec<StationRow> {
        self.engine()
            .station_roster()
            .into_iter()
            .map(|station| station.to_row())
            .collect()
    }

    pub fn tobs(&self) -> Result<Vec<f64>, ClimateError> {
        self.engine().temperature_series(&self.tobs)
    }

    /// `[min, max, avg]` temperature from `start` onwards.
    pub fn temperature_from(&self, start: &str) -> Result<[f64; 3], ClimateError> {
        let start = parse_date(start)?;
        let stats = self.engine().temperature_stats(start).call()?;
        Ok(stats.to_triple())
    }

    /// `[min, max, avg]` temperature over `start..=end`.
    pub fn temperature_range(&self, start: &str, end: &str) -> Result<[f64; 3], ClimateError> {
        let start = parse_date(start)?;
        let end = parse_date(end)?;
        let stats = self.engine().temperature_stats(start).end(end).call()?;
        Ok(stats.to_triple())
    }

    /// Runs a resolved route with its string parameters.
    ///
    /// # Errors
    ///
    /// [`ClimateError::MissingParameter`] if a date route lacks `start` or `end`,
    /// otherwise whatever the underlying query returns.
    pub fn execute(
        &self,
        route: Route,
        params: &HashMap<String, String>,
    ) -> Result<QueryResponse, ClimateError> {
        debug!("Executing {route} with {params:?}");
        let param = |name: &'static str| {
            params
                .get(name)
                .map(String::as_str)
                .ok_or(ClimateError::MissingParameter(name))
        };
        let response = match route {
            Route::Index => QueryResponse::Index(self.index()),
            Route::Precipitation => QueryResponse::Precipitation(self.precipitation()?),
            Route::Stations => QueryResponse::Stations(self.stations()),
            Route::Tobs => QueryResponse::Tobs(self.tobs()?),
            Route::TemperatureFrom => {
                QueryResponse::TemperatureStats(self.temperature_from(param(PARAM_START)?)?)
            }
            Route::TemperatureRange => QueryResponse::TemperatureStats(
                self.temperature_range(param(PARAM_START)?, param(PARAM_END)?)?,
            ),
        };
        Ok(response)
    }
}
