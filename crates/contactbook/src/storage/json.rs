//! JSON file backend.
//!
//! The book is written as one pretty-printed document. Saves go to a sibling
//! temporary file that is then renamed over the target, so an interrupted
//! save leaves the previous version intact.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{ensure_parent_dir, ContactStore};
use crate::book::AddressBook;
use crate::contact::Contact;
use crate::error::{Error, Result};

/// Version written into every document.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Document<C> {
    version: u32,
    contacts: C,
}

/// Address book stored as a JSON document.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by the file at `path`.
    ///
    /// Nothing is touched on disk until the first load or save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ContactStore for JsonStore {
    fn name(&self) -> &'static str {
        "json"
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<AddressBook> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No contact store at {}, starting empty",
                    self.path.display()
                );
                return Ok(AddressBook::new());
            }
            Err(e) => return Err(e.into()),
        };

        let document: Document<Vec<Contact>> = serde_json::from_reader(BufReader::new(file))?;
        if document.version != FORMAT_VERSION {
            return Err(Error::corrupt_store(
                &self.path,
                format!("unsupported format version {}", document.version),
            ));
        }

        let book = AddressBook::from_contacts(document.contacts)
            .map_err(|e| Error::corrupt_store(&self.path, e.to_string()))?;
        debug!(
            "Loaded {} contacts from {}",
            book.len(),
            self.path.display()
        );
        Ok(book)
    }

    fn save(&mut self, book: &AddressBook) -> Result<()> {
        ensure_parent_dir(&self.path)?;

        let temp = self.temp_path();
        let document = Document {
            version: FORMAT_VERSION,
            contacts: book.contacts().collect::<Vec<_>>(),
        };

        let mut writer = BufWriter::new(File::create(&temp)?);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        std::fs::rename(&temp, &self.path)?;
        debug!("Saved {} contacts to {}", book.len(), self.path.display());
        Ok(())
    }
}
