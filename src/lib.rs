pub mod account_directory;
pub mod bin_constants;
pub mod config;
pub mod data;
pub mod kv_store;
mod lib_constants;
pub mod logging;
pub mod note_store;
pub mod query;
pub mod read_outcome;
pub mod rng;
pub mod username_string;
pub mod util;
