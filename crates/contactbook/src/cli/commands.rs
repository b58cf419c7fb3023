//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

/// Exec command arguments.
#[derive(Debug, Args)]
pub struct ExecCommand {
    /// Assistant command and its arguments (e.g. `add John 0501234567`)
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl ExecCommand {
    /// The words joined back into an assistant input line.
    #[must_use]
    pub fn line(&self) -> String {
        self.words.join(" ")
    }
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Name of the contact
    pub name: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Birthdays command arguments.
#[derive(Debug, Args)]
pub struct BirthdaysCommand {
    /// Days to look ahead (defaults to the configured window)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=365))]
    pub days: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

/// Storage format argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// JSON document
    Json,
    /// `SQLite` database
    Sqlite,
}

impl From<FormatArg> for crate::config::StorageFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => Self::Json,
            FormatArg::Sqlite => Self::Sqlite,
        }
    }
}
