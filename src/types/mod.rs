pub mod dataset;
pub mod date_window;
pub mod observation;
pub mod station;
pub mod temperature_stats;
