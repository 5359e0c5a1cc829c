use std::path::Path;
use figment::Figment;
use thiserror::Error;
use crate::config::app_config::AppConfig;
use crate::config::figment_ext::FigmentExt;

pub mod app_config;
pub mod figment_ext;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Figment(#[from] Box<figment::Error>),
}

pub fn read_app_config(
    config_file: impl AsRef<Path>,
    figment: Figment,
) -> Result<AppConfig, ConfigError> {
    figment
        .setup_app_config(config_file)
        .extract::<AppConfig>()
        .map_err(|e| ConfigError::Figment(Box::new(e)))
}
