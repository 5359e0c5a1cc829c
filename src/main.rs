use std::sync::Arc;
use clap::Parser;
use figment::Figment;
use pocketnotes::account_directory::ProductionAccountDirectory;
use pocketnotes::config::read_app_config;
use pocketnotes::error_exit;
use pocketnotes::kv_store::FileKeyValueStore;
use pocketnotes::logging::init_logging;
use pocketnotes::note_store::NoteStore;
use crate::cli::CliConfig;

mod cli;
mod commands;

#[tokio::main]
async fn main() {
    init_logging();

    let cli_config = CliConfig::parse();

    let app_config = read_app_config(&cli_config.config_file, Figment::new())
        .unwrap_or_else(|e| {
            error_exit!("finishing due to a configuration error: {e}");
        });

    let store = Arc::new(
        FileKeyValueStore::new(&app_config)
            .await
            .unwrap_or_else(|e| {
                error_exit!(
                    "could not open storage in {}: {e}",
                    app_config.data_directory.display(),
                )
            })
    );
    let directory = ProductionAccountDirectory::new(store.clone());
    let notes = NoteStore::new(store);

    if let Err(e) = commands::execute(cli_config.command, &directory, &notes).await {
        error_exit!("{e}");
    }
}
