//! Error types for contactbook.
//!
//! This module defines all error types used throughout the contactbook crate.
//! Input errors are reported back to the user and the session continues;
//! everything else comes from storage, configuration or the file system.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for contactbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A phone number is not exactly ten digits.
    #[error("invalid phone number '{value}': must be exactly 10 digits")]
    InvalidPhone {
        /// The rejected input.
        value: String,
    },

    /// A birthday is not a valid `DD.MM.YYYY` date.
    #[error("invalid date '{value}': use DD.MM.YYYY")]
    InvalidBirthday {
        /// The rejected input.
        value: String,
    },

    /// No contact with the given name exists.
    #[error("contact '{name}' not found")]
    ContactNotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The contact has no such phone number.
    #[error("phone number {phone} not found for contact '{name}'")]
    PhoneNotFound {
        /// The contact that was searched.
        name: String,
        /// The phone number that was looked up.
        phone: String,
    },

    /// The contact already has this phone number.
    #[error("contact '{name}' already has phone number {phone}")]
    DuplicatePhone {
        /// The contact being modified.
        name: String,
        /// The repeated phone number.
        phone: String,
    },

    /// A command was given fewer arguments than it needs.
    #[error("not enough arguments, usage: {usage}")]
    MissingArguments {
        /// Usage line for the command.
        usage: &'static str,
    },

    /// The command word is not recognized.
    #[error("unknown command '{command}', type 'help' to list commands")]
    UnknownCommand {
        /// The unrecognized command word.
        command: String,
    },

    /// The input line was blank.
    #[error("empty command, type 'help' to list commands")]
    EmptyInput,

    // === Storage Errors ===
    /// Two contacts share a name.
    #[error("duplicate contact name '{name}'")]
    DuplicateContact {
        /// The repeated name.
        name: String,
    },

    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// Failed to run database migrations.
    #[error("database migration failed: {message}")]
    DatabaseMigration {
        /// Description of what went wrong.
        message: String,
    },

    /// A store file was readable but its contents are unusable.
    #[error("contact store at {path} is corrupt: {message}")]
    CorruptStore {
        /// Path to the store file.
        path: PathBuf,
        /// Description of the problem.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for contactbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid phone error.
    #[must_use]
    pub fn invalid_phone(value: impl Into<String>) -> Self {
        Self::InvalidPhone {
            value: value.into(),
        }
    }

    /// Create an invalid birthday error.
    #[must_use]
    pub fn invalid_birthday(value: impl Into<String>) -> Self {
        Self::InvalidBirthday {
            value: value.into(),
        }
    }

    /// Create a contact not found error.
    #[must_use]
    pub fn contact_not_found(name: impl Into<String>) -> Self {
        Self::ContactNotFound { name: name.into() }
    }

    /// Create a corrupt store error.
    #[must_use]
    pub fn corrupt_store(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::CorruptStore {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Check if this error was caused by user input rather than the environment.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPhone { .. }
                | Self::InvalidBirthday { .. }
                | Self::ContactNotFound { .. }
                | Self::PhoneNotFound { .. }
                | Self::DuplicatePhone { .. }
                | Self::MissingArguments { .. }
                | Self::UnknownCommand { .. }
                | Self::EmptyInput
        )
    }
}
