use crate::loader::error::LoadError;
use crate::store::error::StoreError;
use crate::types::date_window::DateWindow;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClimateError {
    #[error("The dataset contains no observations")]
    EmptyDataset,

    #[error("Invalid date '{input}', expected YYYY-MM-DD")]
    InvalidDate {
        input: String,
        #[source]
        source: Option<chrono::ParseError>,
    },

    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Unknown station '{0}'")]
    UnknownStation(String),

    #[error("No temperature observations in range {0}")]
    NoDataInRange(DateWindow),

    #[error("Missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ClimateError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptyDataset => ClimateError::EmptyDataset,
            other => ClimateError::Store(other),
        }
    }
}

impl From<polars::error::PolarsError> for ClimateError {
    fn from(e: polars::error::PolarsError) -> Self {
        ClimateError::Store(StoreError::from(e))
    }
}
