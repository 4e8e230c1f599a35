use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Dataset path '{0}' does not exist")]
    MissingSource(PathBuf),

    #[error("Cannot determine dataset format of '{0}' (expected a directory of CSV files or a .sqlite/.db file)")]
    UnsupportedSource(PathBuf),

    #[error("Failed to read CSV file '{0}'")]
    CsvRead(PathBuf, #[source] csv::Error),

    #[error("Failed to open SQLite database '{0}'")]
    SqliteOpen(PathBuf, #[source] rusqlite::Error),

    #[error("Failed to query table '{table}' in SQLite database '{path}'")]
    SqliteQuery {
        path: PathBuf,
        table: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid date '{value}' for station '{station}'")]
    InvalidDate {
        station: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Station '{0}' is defined more than once")]
    DuplicateStation(String),
}
