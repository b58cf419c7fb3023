//! The in-memory address book.

use std::collections::btree_map::{BTreeMap, Entry};

use chrono::NaiveDate;

use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::reminders::{self, Reminder, ReminderPolicy};

/// Contacts keyed by name.
///
/// Iteration is in name order so listings are stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressBook {
    contacts: BTreeMap<String, Contact>,
}

impl AddressBook {
    /// Create an empty address book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from a list of contacts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateContact`] for the first name that appears
    /// more than once.
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Result<Self> {
        let mut book = Self::new();
        for contact in contacts {
            match book.contacts.entry(contact.name().to_string()) {
                Entry::Occupied(entry) => {
                    return Err(Error::DuplicateContact {
                        name: entry.key().clone(),
                    })
                }
                Entry::Vacant(entry) => {
                    entry.insert(contact);
                }
            }
        }
        Ok(book)
    }

    /// Insert a contact, replacing any existing contact with the same name.
    ///
    /// Returns the replaced contact, if any.
    pub fn insert(&mut self, contact: Contact) -> Option<Contact> {
        self.contacts.insert(contact.name().to_string(), contact)
    }

    /// Look up a contact by name.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Contact> {
        self.contacts.get(name)
    }

    /// Look up a contact by name for modification.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Contact> {
        self.contacts.get_mut(name)
    }

    /// Look up a contact that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`] if there is no such contact.
    pub fn get(&self, name: &str) -> Result<&Contact> {
        self.find(name).ok_or_else(|| Error::contact_not_found(name))
    }

    /// Mutable counterpart of [`AddressBook::get`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`] if there is no such contact.
    pub fn get_mut(&mut self, name: &str) -> Result<&mut Contact> {
        self.find_mut(name)
            .ok_or_else(|| Error::contact_not_found(name))
    }

    /// Remove a contact by name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ContactNotFound`] if there is no such contact.
    pub fn delete(&mut self, name: &str) -> Result<Contact> {
        self.contacts
            .remove(name)
            .ok_or_else(|| Error::contact_not_found(name))
    }

    /// Number of contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book has no contacts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// All contacts in name order.
    pub fn contacts(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    /// Contacts to congratulate within the policy's window from `today`.
    #[must_use]
    pub fn upcoming_birthdays(&self, today: NaiveDate, policy: ReminderPolicy) -> Vec<Reminder> {
        reminders::upcoming_birthdays(self.contacts(), today, policy)
    }
}
