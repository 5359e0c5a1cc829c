use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use crate::bin_constants::DEFAULT_DATA_DIR;
use crate::lib_constants::DEFAULT_MAX_VALUE_SIZE;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct AppConfig {
    #[serde(default = "app_config_default_data_dir")]
    pub data_directory: PathBuf,

    /// Upper bound for a single stored value, i.e. one user's whole note
    /// collection.
    #[serde(default = "app_config_default_max_value_size")]
    pub max_value_size: u64,
}

pub fn app_config_default_data_dir() -> PathBuf {
    DEFAULT_DATA_DIR.into()
}

pub fn app_config_default_max_value_size() -> u64 {
    DEFAULT_MAX_VALUE_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            data_directory: app_config_default_data_dir(),
            max_value_size: app_config_default_max_value_size(),
        }
    }
}
