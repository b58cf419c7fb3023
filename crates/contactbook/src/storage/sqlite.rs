//! `SQLite` backend.
//!
//! Contacts and their phones live in separate tables. Saving replaces the
//! table contents inside a single transaction.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use tracing::{debug, info};

use super::{ensure_parent_dir, migrations, ContactStore};
use crate::book::AddressBook;
use crate::contact::Contact;
use crate::error::{Error, Result};

/// Address book stored in an `SQLite` database.
#[derive(Debug)]
pub struct SqliteStore {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection.
    conn: Connection,
}

impl SqliteStore {
    /// Open or create a database at the given path.
    ///
    /// Creates the parent directories and database file if they don't exist.
    /// Initializes the schema if this is a new database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or schema initialization fails.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        ensure_parent_dir(&path)?;

        debug!("Opening database at {}", path.display());
        let conn = Connection::open(&path).map_err(|source| Error::DatabaseOpen {
            path: path.clone(),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        migrations::initialize_schema(&conn)?;

        let store = Self { path, conn };
        info!(
            "Database opened at {} ({} contacts)",
            store.path.display(),
            store.count()?
        );
        Ok(store)
    }

    /// Create an in-memory store for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(":memory:"),
            conn,
        })
    }

    /// Count stored contacts.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    fn corrupt(&self, err: &Error) -> Error {
        Error::corrupt_store(&self.path, err.to_string())
    }
}

impl ContactStore for SqliteStore {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn location(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<AddressBook> {
        let mut book = AddressBook::new();

        let mut stmt = self
            .conn
            .prepare("SELECT name, birthday FROM contacts ORDER BY name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<String>>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (name, birthday) in rows {
            let mut contact = Contact::new(name);
            if let Some(birthday) = birthday {
                contact
                    .set_birthday(&birthday)
                    .map_err(|e| self.corrupt(&e))?;
            }
            book.insert(contact);
        }

        let mut stmt = self.conn.prepare(
            "SELECT contact_name, number FROM phones ORDER BY contact_name, position",
        )?;
        let phones = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        for (name, number) in phones {
            book.get_mut(&name)
                .and_then(|contact| contact.add_phone(&number))
                .map_err(|e| self.corrupt(&e))?;
        }

        debug!("Loaded {} contacts from {}", book.len(), self.path.display());
        Ok(book)
    }

    fn save(&mut self, book: &AddressBook) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM phones", [])?;
        tx.execute("DELETE FROM contacts", [])?;

        {
            let mut insert_contact =
                tx.prepare("INSERT INTO contacts (name, birthday) VALUES (?1, ?2)")?;
            let mut insert_phone = tx.prepare(
                "INSERT INTO phones (contact_name, position, number) VALUES (?1, ?2, ?3)",
            )?;

            for contact in book.contacts() {
                let birthday = contact.birthday().map(|b| b.to_string());
                insert_contact.execute(params![contact.name(), birthday])?;

                for (position, phone) in contact.phones().iter().enumerate() {
                    let position = i64::try_from(position).unwrap_or(i64::MAX);
                    insert_phone.execute(params![contact.name(), position, phone.as_str()])?;
                }
            }
        }

        tx.commit()?;
        debug!("Saved {} contacts to {}", book.len(), self.path.display());
        Ok(())
    }
}
