//! Storage layer for contactbook.
//!
//! The whole address book is loaded at startup and written back as a unit.
//! Two backends are available: a JSON document (the default) and an `SQLite`
//! database.

pub mod json;
pub mod migrations;
pub mod schema;
pub mod sqlite;

use std::path::Path;

use tracing::debug;

use crate::book::AddressBook;
use crate::config::{Config, StorageFormat};
use crate::error::{Error, Result};

pub use json::JsonStore;
pub use sqlite::SqliteStore;

/// A place an address book can be loaded from and saved to.
pub trait ContactStore: std::fmt::Debug {
    /// Short backend name (for logging and status output).
    fn name(&self) -> &'static str;

    /// Where the data lives.
    fn location(&self) -> &Path;

    /// Read the stored address book.
    ///
    /// A store that has never been written yields an empty book.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be read or is invalid.
    fn load(&self) -> Result<AddressBook>;

    /// Replace the stored address book with `book`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data cannot be written.
    fn save(&mut self, book: &AddressBook) -> Result<()>;
}

/// Open the store described by the configuration.
///
/// # Errors
///
/// Returns an error if the backend cannot be opened.
pub fn open_store(config: &Config) -> Result<Box<dyn ContactStore>> {
    let path = config.store_path();
    debug!(
        "Opening {} store at {}",
        config.storage.format,
        path.display()
    );
    let store: Box<dyn ContactStore> = match config.storage.format {
        StorageFormat::Json => Box::new(JsonStore::new(path)),
        StorageFormat::Sqlite => Box::new(SqliteStore::open(path)?),
    };
    Ok(store)
}

/// Create the parent directories of `path` if they don't exist.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }
    Ok(())
}
