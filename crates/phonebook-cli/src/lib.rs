//! Phonebook CLI Library
//!
//! Command-line client for the phonebook HTTP API.
//!
//! - **Listing**: `phonebook list` prints every entry as a table
//! - **Editing**: `phonebook add`, `update` and `delete`
//! - **Lookup**: `phonebook get <id>` and `phonebook info`

pub mod api;
pub mod commands;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};

/// Phonebook - command-line client for the phonebook server
#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Server URL
    #[arg(
        long,
        env = "PHONEBOOK_SERVER_URL",
        default_value = api::client::DEFAULT_SERVER_URL,
        global = true
    )]
    pub server_url: String,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all entries
    List,

    /// Add a new entry
    Add {
        /// Person's name (at least 3 characters)
        name: String,

        /// Phone number (at least 5 characters)
        number: String,
    },

    /// Show a single entry
    Get {
        /// Entry id
        id: String,
    },

    /// Replace the name and number of an entry
    Update {
        /// Entry id
        id: String,

        /// New name
        name: String,

        /// New number
        number: String,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Show how many entries the phonebook holds
    Info,
}
