//! Core contact types for contactbook.
//!
//! This module defines the contact record and its validated fields. Phones
//! and birthdays can only be built through their parsers, so every value held
//! by a [`Contact`] satisfies its format rules, including values read back
//! from disk.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Date layout used for birthdays, both for input and display.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// Number of digits in a valid phone number.
pub const PHONE_DIGITS: usize = 10;

/// A phone number of exactly ten digits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Phone(String);

impl Phone {
    /// Parse and validate a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPhone`] unless `value` is exactly ten ASCII digits.
    pub fn parse(value: &str) -> Result<Self> {
        if value.len() == PHONE_DIGITS && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value.to_string()))
        } else {
            Err(Error::invalid_phone(value))
        }
    }

    /// The digits of this phone number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Phone {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Phone {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        phone.0
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A birthday, stored as a calendar date and written as `DD.MM.YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Birthday(NaiveDate);

impl Birthday {
    /// Parse a birthday in `DD.MM.YYYY` form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBirthday`] if the text does not match the
    /// layout or names a date that does not exist.
    pub fn parse(value: &str) -> Result<Self> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .map(Self)
            .map_err(|_| Error::invalid_birthday(value))
    }

    /// The underlying calendar date.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for Birthday {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl FromStr for Birthday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Birthday {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Birthday> for String {
    fn from(birthday: Birthday) -> Self {
        birthday.to_string()
    }
}

impl fmt::Display for Birthday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

/// A single entry in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredContact")]
pub struct Contact {
    name: String,
    phones: Vec<Phone>,
    birthday: Option<Birthday>,
}

/// Serialized form of a contact, checked before it becomes a [`Contact`].
#[derive(Deserialize)]
struct StoredContact {
    name: String,
    #[serde(default)]
    phones: Vec<Phone>,
    #[serde(default)]
    birthday: Option<Birthday>,
}

impl TryFrom<StoredContact> for Contact {
    type Error = Error;

    fn try_from(stored: StoredContact) -> Result<Self> {
        let mut contact = Self::new(stored.name);
        for phone in stored.phones {
            if contact.phones.contains(&phone) {
                return Err(contact.duplicate(&phone));
            }
            contact.phones.push(phone);
        }
        contact.birthday = stored.birthday;
        Ok(contact)
    }
}

impl Contact {
    /// Create a contact with no phones and no birthday.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phones: Vec::new(),
            birthday: None,
        }
    }

    /// The contact's name, which is also its key in the address book.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phone numbers in the order they were added.
    #[must_use]
    pub fn phones(&self) -> &[Phone] {
        &self.phones
    }

    /// The birthday, if one has been set.
    #[must_use]
    pub fn birthday(&self) -> Option<Birthday> {
        self.birthday
    }

    /// Add a phone number.
    ///
    /// # Errors
    ///
    /// Returns an error if the number is invalid or already present.
    pub fn add_phone(&mut self, phone: &str) -> Result<()> {
        let phone = Phone::parse(phone)?;
        if self.phones.contains(&phone) {
            return Err(self.duplicate(&phone));
        }
        self.phones.push(phone);
        Ok(())
    }

    /// Remove a phone number.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PhoneNotFound`] if the contact has no such number.
    pub fn remove_phone(&mut self, phone: &str) -> Result<()> {
        let index = self.position(phone)?;
        self.phones.remove(index);
        Ok(())
    }

    /// Replace `old` with `new`, keeping its position in the list.
    ///
    /// # Errors
    ///
    /// Returns an error if `old` is missing, `new` is invalid, or `new` is
    /// already one of the contact's other numbers.
    pub fn edit_phone(&mut self, old: &str, new: &str) -> Result<()> {
        let index = self.position(old)?;
        let replacement = Phone::parse(new)?;
        if self
            .phones
            .iter()
            .enumerate()
            .any(|(i, p)| i != index && *p == replacement)
        {
            return Err(self.duplicate(&replacement));
        }
        self.phones[index] = replacement;
        Ok(())
    }

    /// Look up a phone number on this contact.
    #[must_use]
    pub fn find_phone(&self, phone: &str) -> Option<&Phone> {
        self.phones.iter().find(|p| p.as_str() == phone)
    }

    /// Set or replace the birthday from `DD.MM.YYYY` text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBirthday`] if the date cannot be parsed.
    pub fn set_birthday(&mut self, birthday: &str) -> Result<()> {
        self.birthday = Some(Birthday::parse(birthday)?);
        Ok(())
    }

    fn position(&self, phone: &str) -> Result<usize> {
        self.phones
            .iter()
            .position(|p| p.as_str() == phone)
            .ok_or_else(|| Error::PhoneNotFound {
                name: self.name.clone(),
                phone: phone.to_string(),
            })
    }

    fn duplicate(&self, phone: &Phone) -> Error {
        Error::DuplicatePhone {
            name: self.name.clone(),
            phone: phone.to_string(),
        }
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phones = self
            .phones
            .iter()
            .map(Phone::as_str)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "Contact name: {}, phones: {phones}", self.name)?;
        if let Some(birthday) = self.birthday {
            write!(f, ", birthday: {birthday}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_valid() {
        let phone = Phone::parse("0501234567").unwrap();
        assert_eq!(phone.as_str(), "0501234567");
        assert_eq!(phone.to_string(), "0501234567");
    }

    #[test]
    fn test_phone_invalid() {
        for bad in ["", "123456789", "12345678901", "050123456a", "+380501234", "05012 4567"] {
            let err = Phone::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidPhone { .. }), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_phone_rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert!(Phone::parse("٠١٢٣٤٥٦٧٨٩").is_err());
    }

    #[test]
    fn test_phone_from_str() {
        let phone: Phone = "1112223333".parse().unwrap();
        assert_eq!(phone.as_str(), "1112223333");
    }

    #[test]
    fn test_birthday_round_trip() {
        let birthday = Birthday::parse("05.03.1990").unwrap();
        assert_eq!(
            birthday.date(),
            NaiveDate::from_ymd_opt(1990, 3, 5).unwrap()
        );
        assert_eq!(birthday.to_string(), "05.03.1990");
    }

    #[test]
    fn test_birthday_invalid() {
        for bad in ["31.02.2000", "2000-01-01", "01/01/2000", "", "29.02.2001", "aa.bb.cccc"] {
            let err = Birthday::parse(bad).unwrap_err();
            assert!(matches!(err, Error::InvalidBirthday { .. }), "accepted {bad:?}");
        }
    }

    #[test]
    fn test_birthday_leap_day() {
        let birthday = Birthday::parse("29.02.2000").unwrap();
        assert_eq!(birthday.to_string(), "29.02.2000");
    }

    #[test]
    fn test_add_phone_then_find() {
        let mut contact = Contact::new("John");
        contact.add_phone("1234567890").unwrap();

        let found = contact.find_phone("1234567890");
        assert_eq!(found.map(Phone::as_str), Some("1234567890"));
        assert!(contact.find_phone("0000000000").is_none());
    }

    #[test]
    fn test_add_invalid_phone_leaves_contact_unchanged() {
        let mut contact = Contact::new("John");
        assert!(contact.add_phone("12345").is_err());
        assert!(contact.phones().is_empty());
    }

    #[test]
    fn test_add_duplicate_phone() {
        let mut contact = Contact::new("John");
        contact.add_phone("1234567890").unwrap();

        let err = contact.add_phone("1234567890").unwrap_err();
        assert!(matches!(err, Error::DuplicatePhone { .. }));
        assert_eq!(contact.phones().len(), 1);
    }

    #[test]
    fn test_edit_phone_keeps_position() {
        let mut contact = Contact::new("John");
        contact.add_phone("1111111111").unwrap();
        contact.add_phone("2222222222").unwrap();

        contact.edit_phone("1111111111", "3333333333").unwrap();
        let phones: Vec<&str> = contact.phones().iter().map(Phone::as_str).collect();
        assert_eq!(phones, ["3333333333", "2222222222"]);
    }

    #[test]
    fn test_edit_phone_errors() {
        let mut contact = Contact::new("John");
        contact.add_phone("1111111111").unwrap();
        contact.add_phone("2222222222").unwrap();

        assert!(matches!(
            contact.edit_phone("9999999999", "3333333333").unwrap_err(),
            Error::PhoneNotFound { .. }
        ));
        assert!(matches!(
            contact.edit_phone("1111111111", "bad").unwrap_err(),
            Error::InvalidPhone { .. }
        ));
        assert!(matches!(
            contact.edit_phone("1111111111", "2222222222").unwrap_err(),
            Error::DuplicatePhone { .. }
        ));

        // Replacing a number with itself is allowed.
        contact.edit_phone("1111111111", "1111111111").unwrap();
        assert_eq!(contact.phones()[0].as_str(), "1111111111");
    }

    #[test]
    fn test_remove_phone() {
        let mut contact = Contact::new("John");
        contact.add_phone("1111111111").unwrap();

        contact.remove_phone("1111111111").unwrap();
        assert!(contact.phones().is_empty());

        let err = contact.remove_phone("1111111111").unwrap_err();
        assert!(matches!(err, Error::PhoneNotFound { .. }));
    }

    #[test]
    fn test_set_birthday() {
        let mut contact = Contact::new("Jane");
        assert!(contact.birthday().is_none());

        contact.set_birthday("15.01.1985").unwrap();
        assert_eq!(contact.birthday().unwrap().to_string(), "15.01.1985");

        assert!(contact.set_birthday("15-01-1985").is_err());
        assert_eq!(contact.birthday().unwrap().to_string(), "15.01.1985");
    }

    #[test]
    fn test_contact_display() {
        let mut contact = Contact::new("John");
        assert_eq!(contact.to_string(), "Contact name: John, phones: ");

        contact.add_phone("1234567890").unwrap();
        contact.add_phone("5555555555").unwrap();
        assert_eq!(
            contact.to_string(),
            "Contact name: John, phones: 1234567890; 5555555555"
        );

        contact.set_birthday("01.12.1999").unwrap();
        assert_eq!(
            contact.to_string(),
            "Contact name: John, phones: 1234567890; 5555555555, birthday: 01.12.1999"
        );
    }

    #[test]
    fn test_contact_serialization() {
        let mut contact = Contact::new("John");
        contact.add_phone("1234567890").unwrap();
        contact.set_birthday("01.12.1999").unwrap();

        let json = serde_json::to_string(&contact).unwrap();
        assert!(json.contains("\"01.12.1999\""));

        let restored: Contact = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, contact);
    }

    #[test]
    fn test_contact_deserialize_rejects_invalid_phone() {
        let json = r#"{"name": "John", "phones": ["123"], "birthday": null}"#;
        assert!(serde_json::from_str::<Contact>(json).is_err());
    }

    #[test]
    fn test_contact_deserialize_rejects_repeated_phone() {
        let json = r#"{"name": "X", "phones": ["1234567890", "1234567890"]}"#;
        let err = serde_json::from_str::<Contact>(json).unwrap_err();
        assert!(err
            .to_string()
            .contains("contact 'X' already has phone number 1234567890"));
    }

    #[test]
    fn test_contact_deserialize_defaults() {
        let contact: Contact = serde_json::from_str(r#"{"name": "Solo"}"#).unwrap();
        assert!(contact.phones().is_empty());
        assert!(contact.birthday().is_none());
    }
}
