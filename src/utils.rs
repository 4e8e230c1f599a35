use std::path::PathBuf;

const DATA_DIR_NAME: &str = "hawaii_climate";
const DATASET_FILE_NAME: &str = "hawaii.sqlite";

pub fn get_data_dir() -> anyhow::Result<PathBuf> {
    dirs::data_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine system data directory"))
        .map(|p| p.join(DATA_DIR_NAME))
}

/// `<data dir>/hawaii_climate/hawaii.sqlite`, used when no dataset is given.
pub fn default_dataset_path() -> anyhow::Result<PathBuf> {
    get_data_dir().map(|dir| dir.join(DATASET_FILE_NAME))
}
