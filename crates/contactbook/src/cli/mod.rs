//! Command-line interface for contactbook.
//!
//! This module provides the CLI structure for the `contactbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BirthdaysCommand, ConfigCommand, ExecCommand, FormatArg, ListCommand, ShowCommand,
};

use crate::config::Config;
use crate::error::Result;
use crate::logging::Verbosity;

/// contactbook - Keep track of phone numbers and birthdays
///
/// Without a subcommand, starts the interactive assistant.
#[derive(Debug, Parser)]
#[command(name = "contactbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the contact store (overrides configuration)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub book: Option<PathBuf>,

    /// Storage format (overrides configuration)
    #[arg(short, long, global = true, value_enum)]
    pub format: Option<FormatArg>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start the interactive assistant (default)
    Shell,

    /// Run a single assistant command and save the result
    Exec(ExecCommand),

    /// List all contacts
    List(ListCommand),

    /// Show one contact
    Show(ShowCommand),

    /// List upcoming birthdays
    Birthdays(BirthdaysCommand),

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// The configuration file this invocation reads.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.config
            .clone()
            .unwrap_or_else(Config::default_config_path)
    }

    /// Load the configuration file, then apply command-line overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the result
    /// is invalid.
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_from(Some(self.config_path()))?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Apply `--book` and `--format` on top of loaded configuration.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(format) = self.format {
            config.storage.format = format.into();
        }
        if let Some(book) = &self.book {
            config.storage.path = Some(book.clone());
        }
    }
}
