//! hawaii-climate: serve or query the station climate dataset.

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use hawaii_climate::{
    default_dataset_path, serve, ClimateApi, ClimateError, DatasetSource, ObservationStore,
    QueryResponse, Route, ServiceConfig, TobsWindow, DEFAULT_TOBS_STATION,
};
use log::info;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "hawaii-climate",
    version,
    about = "Precipitation and temperature queries over fixed weather stations"
)]
struct Cli {
    /// SQLite file or directory with hawaii_stations.csv and hawaii_measurements.csv
    #[arg(short, long, env = "HAWAII_CLIMATE_DATASET", global = true)]
    dataset: Option<PathBuf>,

    /// Station served by /api/v1.0/tobs
    #[arg(long, env = "HAWAII_CLIMATE_TOBS_STATION", default_value = DEFAULT_TOBS_STATION, global = true)]
    tobs_station: String,

    /// First date (inclusive) served by /api/v1.0/tobs
    #[arg(long, env = "HAWAII_CLIMATE_TOBS_START", default_value = "2016-08-18", global = true)]
    tobs_start: NaiveDate,

    /// Last date (inclusive) served by /api/v1.0/tobs
    #[arg(long, env = "HAWAII_CLIMATE_TOBS_END", default_value = "2017-08-18", global = true)]
    tobs_end: NaiveDate,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the HTTP API
    Serve {
        /// Address to listen on
        #[arg(short, long, env = "HAWAII_CLIMATE_ADDR", default_value = "127.0.0.1:5000")]
        addr: SocketAddr,
    },

    /// Run a single API path and print the JSON result, e.g. /api/v1.0/2017-01-01
    Query { path: String },

    /// List stations by number of observations, busiest first
    Rank {
        /// Only show the first N stations
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let dataset = match cli.dataset {
        Some(path) => path,
        None => default_dataset_path()?,
    };
    let tobs = TobsWindow::builder()
        .station(cli.tobs_station)
        .start(cli.tobs_start)
        .end(cli.tobs_end)
        .build();
    if tobs.start > tobs.end {
        bail!("tobs window starts after it ends: {}", tobs.dates());
    }

    match cli.command {
        Command::Serve { addr } => {
            let config = ServiceConfig::builder()
                .dataset(dataset)
                .bind(addr)
                .tobs(tobs)
                .build();
            let api = open(&config.dataset, config.tobs.clone()).await?;
            serve(api, config.bind)
                .await
                .with_context(|| format!("Server on {} failed", config.bind))
        }
        Command::Query { path } => {
            let api = open(&dataset, tobs).await?;
            let Some((route, params)) = Route::resolve(&path) else {
                bail!("No route matches '{path}'");
            };
            match api.execute(route, &params)? {
                QueryResponse::Index(html) => println!("{html}"),
                response => println!("{}", serde_json::to_string_pretty(&response)?),
            }
            Ok(())
        }
        Command::Rank { limit } => {
            let api = open(&dataset, tobs).await?;
            let ranking = api.engine().most_active_stations()?;
            for (station, count) in ranking.into_iter().take(limit.unwrap_or(usize::MAX)) {
                let name = api
                    .store()
                    .station(&station)
                    .map(|s| s.name.as_str())
                    .unwrap_or("?");
                println!("{station}\t{count}\t{name}");
            }
            Ok(())
        }
    }
}

/// Loads the dataset once and wraps it in the query façade. Any failure here,
/// including an empty dataset, stops the process.
async fn open(dataset: &std::path::Path, tobs: TobsWindow) -> anyhow::Result<ClimateApi> {
    let path = dataset.to_path_buf();
    let store = tokio::task::spawn_blocking(move || -> Result<ObservationStore, ClimateError> {
        let dataset = DatasetSource::detect(&path)?.load()?;
        Ok(ObservationStore::new(dataset)?)
    })
    .await?
    .with_context(|| format!("Failed to load dataset from {}", dataset.display()))?;

    if store.is_empty() {
        bail!("Dataset {} contains no observations", dataset.display());
    }
    info!(
        "Loaded {} observations from {} stations, latest {}",
        store.len(),
        store.all_stations().len(),
        store.max_date()?
    );
    Ok(ClimateApi::new(Arc::new(store), tobs))
}
