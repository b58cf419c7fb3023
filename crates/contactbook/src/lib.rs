//! `contactbook` - A command-line contact book with birthday reminders
//!
//! This library provides the contact model, the in-memory address book, the
//! birthday reminder calculation, persistence backends, and the interactive
//! assistant that ties them together.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assistant;
pub mod book;
pub mod cli;
pub mod config;
pub mod contact;
pub mod error;
pub mod logging;
pub mod reminders;
pub mod storage;

pub use assistant::{Command, Reply, Shell};
pub use book::AddressBook;
pub use config::Config;
pub use contact::{Birthday, Contact, Phone};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use reminders::{Reminder, ReminderPolicy};
pub use storage::{open_store, ContactStore};
