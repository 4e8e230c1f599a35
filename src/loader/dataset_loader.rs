//! Reads the on-disk dataset into typed [`Station`] and [`Observation`] records.
//!
//! Two layouts are supported:
//!
//! - **SQLite** (`hawaii.sqlite`): tables `station(station, name, latitude, longitude, elevation)`
//!   and `measurement(station, date, prcp, tobs)`.
//! - **CSV** (a directory holding `hawaii_stations.csv` and `hawaii_measurements.csv`), with
//!   headers named after the SQLite columns.
//!
//! Dates are ISO `YYYY-MM-DD` text in both layouts. Empty or NULL `prcp`/`tobs`
//! values are kept as missing, never as zero.

use crate::loader::error::LoadError;
use crate::types::dataset::Dataset;
use crate::types::observation::Observation;
use crate::types::station::{Location, Station};
use chrono::NaiveDate;
use log::{info, warn};
use rusqlite::{Connection, OpenFlags};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub const STATIONS_CSV: &str = "hawaii_stations.csv";
pub const MEASUREMENTS_CSV: &str = "hawaii_measurements.csv";
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Where the dataset lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetSource {
    Sqlite(PathBuf),
    Csv {
        stations: PathBuf,
        measurements: PathBuf,
    },
}

impl DatasetSource {
    /// Picks the layout from the path: a directory is read as the CSV pair it
    /// contains, a `.sqlite`/`.db` file as a SQLite database.
    pub fn detect(path: &Path) -> Result<Self, LoadError> {
        if !path.exists() {
            return Err(LoadError::MissingSource(path.to_path_buf()));
        }
        if path.is_dir() {
            return Ok(DatasetSource::Csv {
                stations: path.join(STATIONS_CSV),
                measurements: path.join(MEASUREMENTS_CSV),
            });
        }
        match path.extension().and_then(|e| e.to_str()) {
            Some("sqlite") | Some("sqlite3") | Some("db") => {
                Ok(DatasetSource::Sqlite(path.to_path_buf()))
            }
            _ => Err(LoadError::UnsupportedSource(path.to_path_buf())),
        }
    }

    /// Reads the whole dataset. Any failure here is meant to abort startup.
    pub fn load(&self) -> Result<Dataset, LoadError> {
        let dataset = match self {
            DatasetSource::Sqlite(path) => load_sqlite(path)?,
            DatasetSource::Csv {
                stations,
                measurements,
            } => Dataset::new(load_station_csv(stations)?, load_measurement_csv(measurements)?),
        };
        check_references(&dataset)?;
        info!(
            "Loaded {} stations and {} observations from {:?}",
            dataset.stations.len(),
            dataset.observations.len(),
            self
        );
        Ok(dataset)
    }
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    station: String,
    name: String,
    latitude: f64,
    longitude: f64,
    elevation: f64,
}

impl From<StationRecord> for Station {
    fn from(r: StationRecord) -> Self {
        Station::new(
            r.station,
            r.name,
            Location {
                latitude: r.latitude,
                longitude: r.longitude,
                elevation: r.elevation,
            },
        )
    }
}

#[derive(Debug, Deserialize)]
struct MeasurementRecord {
    station: String,
    date: String,
    prcp: Option<f64>,
    tobs: Option<f64>,
}

impl TryFrom<MeasurementRecord> for Observation {
    type Error = LoadError;

    fn try_from(r: MeasurementRecord) -> Result<Self, Self::Error> {
        let date = parse_date(&r.station, &r.date)?;
        Ok(Observation::new(r.station, date, r.prcp, r.tobs))
    }
}

fn parse_date(station: &str, value: &str) -> Result<NaiveDate, LoadError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| LoadError::InvalidDate {
        station: station.to_string(),
        value: value.to_string(),
        source: e,
    })
}

fn csv_reader(path: &Path) -> Result<csv::Reader<std::fs::File>, LoadError> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))
}

fn load_station_csv(path: &Path) -> Result<Vec<Station>, LoadError> {
    let mut rdr = csv_reader(path)?;
    rdr.deserialize::<StationRecord>()
        .map(|record| {
            record
                .map(Station::from)
                .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))
        })
        .collect()
}

fn load_measurement_csv(path: &Path) -> Result<Vec<Observation>, LoadError> {
    let mut rdr = csv_reader(path)?;
    rdr.deserialize::<MeasurementRecord>()
        .map(|record| {
            record
                .map_err(|e| LoadError::CsvRead(path.to_path_buf(), e))
                .and_then(Observation::try_from)
        })
        .collect()
}

fn load_sqlite(path: &Path) -> Result<Dataset, LoadError> {
    let conn = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|e| LoadError::SqliteOpen(path.to_path_buf(), e))?;
    let query_err = |table: &'static str| {
        move |source: rusqlite::Error| LoadError::SqliteQuery {
            path: path.to_path_buf(),
            table,
            source,
        }
    };

    let mut stmt = conn
        .prepare("SELECT station, name, latitude, longitude, elevation FROM station")
        .map_err(query_err("station"))?;
    let stations = stmt
        .query_map([], |row| {
            Ok(StationRecord {
                station: row.get(0)?,
                name: row.get(1)?,
                latitude: row.get(2)?,
                longitude: row.get(3)?,
                elevation: row.get(4)?,
            })
        })
        .map_err(query_err("station"))?
        .map(|r| r.map(Station::from))
        .collect::<Result<Vec<_>, _>>()
        .map_err(query_err("station"))?;

    let mut stmt = conn
        .prepare("SELECT station, date, prcp, tobs FROM measurement")
        .map_err(query_err("measurement"))?;
    let records = stmt
        .query_map([], |row| {
            Ok(MeasurementRecord {
                station: row.get(0)?,
                date: row.get(1)?,
                prcp: row.get(2)?,
                tobs: row.get(3)?,
            })
        })
        .map_err(query_err("measurement"))?
        .collect::<Result<Vec<_>, _>>()
        .map_err(query_err("measurement"))?;
    let observations = records
        .into_iter()
        .map(Observation::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Dataset::new(stations, observations))
}

/// Rejects duplicate station ids. Observations pointing at a station missing
/// from the roster are kept (the reference is non-owning) but reported.
fn check_references(dataset: &Dataset) -> Result<(), LoadError> {
    let mut ids = HashSet::with_capacity(dataset.stations.len());
    for station in &dataset.stations {
        if !ids.insert(station.id.as_str()) {
            return Err(LoadError::DuplicateStation(station.id.clone()));
        }
    }
    let orphans = dataset
        .observations
        .iter()
        .filter(|o| !ids.contains(o.station.as_str()))
        .count();
    if orphans > 0 {
        warn!(
            "{} observations reference stations missing from the roster",
            orphans
        );
    }
    Ok(())
}
