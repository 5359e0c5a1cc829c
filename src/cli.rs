use std::path::PathBuf;
use clap::{Parser, Subcommand};
use pocketnotes::bin_constants::DEFAULT_CONFIG_FILE;
use pocketnotes::query::SortOrder;
use pocketnotes::username_string::UsernameString;

#[derive(Clone, Debug, Parser)]
#[command(version, author, about)]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Create an account
    Register {
        username: UsernameString,

        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Log in, replacing the current session
    Login {
        username: UsernameString,

        #[arg(long)]
        password: Option<String>,
    },

    Logout,

    /// Print the current session's username
    Whoami,

    /// List registered accounts
    Users,

    /// Switch to another account after confirming its password
    Switch {
        username: UsernameString,

        #[arg(long)]
        password: Option<String>,
    },

    /// List notes of the current account
    List {
        #[arg(long, short, default_value = "")]
        search: String,

        #[arg(long, default_value_t = SortOrder::default())]
        sort: SortOrder,
    },

    Show {
        id: String,
    },

    Add {
        #[arg(long)]
        title: String,

        #[arg(long, default_value = "")]
        body: String,

        /// Reference to a locally stored image
        #[arg(long)]
        image: Option<String>,
    },

    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        body: Option<String>,

        #[arg(long, conflicts_with = "clear_image")]
        image: Option<String>,

        #[arg(long, default_value_t = false)]
        clear_image: bool,
    },

    #[command(alias = "delete")]
    Rm {
        id: String,
    },
}
