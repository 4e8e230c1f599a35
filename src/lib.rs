mod config;
mod engine;
mod error;
mod facade;
mod loader;
mod server;
mod store;
mod types;
mod utils;

pub use error::ClimateError;

pub use config::*;
pub use engine::aggregation_engine::*;
pub use facade::climate_api::*;
pub use facade::query_response::*;
pub use facade::route::*;
pub use server::{build_router, serve, status_for, ServerError};

pub use loader::dataset_loader::DatasetSource;
pub use loader::dataset_loader::{MEASUREMENTS_CSV, STATIONS_CSV};
pub use store::filtering::ObservationFrameFilterExt;
pub use store::observation_frame::ObservationLazyFrame;
pub use store::observation_store::ObservationStore;

pub use types::dataset::Dataset;
pub use types::date_window::DateWindow;
pub use types::observation::Observation;
pub use types::station::*;
pub use types::temperature_stats::TemperatureStats;

pub use utils::default_dataset_path;

pub use loader::error::LoadError;
pub use store::error::StoreError;
