//! `SQLite` schema definitions for contactbook.

/// SQL statement to create the contacts table.
pub const CREATE_CONTACTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    name TEXT PRIMARY KEY NOT NULL,
    birthday TEXT
)
";

/// SQL statement to create the phones table.
///
/// `position` preserves the order in which numbers were added.
pub const CREATE_PHONES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS phones (
    contact_name TEXT NOT NULL REFERENCES contacts(name) ON DELETE CASCADE,
    position INTEGER NOT NULL,
    number TEXT NOT NULL,
    PRIMARY KEY (contact_name, position)
)
";

/// SQL statement to create an index on phone numbers.
pub const CREATE_PHONE_NUMBER_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_phones_number ON phones(number)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_CONTACTS_TABLE,
    CREATE_PHONES_TABLE,
    CREATE_PHONE_NUMBER_INDEX,
    CREATE_METADATA_TABLE,
];
