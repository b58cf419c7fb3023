//! Parsing of assistant input lines.
//!
//! A line is split on whitespace; the first word (case-insensitive) selects
//! the command and the rest are its arguments. Extra arguments are ignored.

use crate::error::{Error, Result};

/// A parsed assistant command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Greet the user.
    Hello,
    /// List available commands.
    Help,
    /// Add a contact, or a phone to an existing contact.
    Add {
        /// Contact name.
        name: String,
        /// Phone number to add.
        phone: String,
    },
    /// Replace one of a contact's phone numbers.
    Change {
        /// Contact name.
        name: String,
        /// Number to replace.
        old: String,
        /// Replacement number.
        new: String,
    },
    /// Show a contact's phones.
    Phone {
        /// Contact name.
        name: String,
    },
    /// List every contact.
    All,
    /// Set a contact's birthday.
    AddBirthday {
        /// Contact name.
        name: String,
        /// Birthday in `DD.MM.YYYY` form.
        date: String,
    },
    /// Show a contact's birthday.
    ShowBirthday {
        /// Contact name.
        name: String,
    },
    /// List upcoming birthdays.
    Birthdays,
    /// Remove a phone number from a contact.
    RemovePhone {
        /// Contact name.
        name: String,
        /// Number to remove.
        phone: String,
    },
    /// Delete a contact.
    Delete {
        /// Contact name.
        name: String,
    },
    /// End the session.
    Exit,
}

/// Usage lines, in the order `help` prints them.
pub const USAGE: &[&str] = &[
    ADD_USAGE,
    CHANGE_USAGE,
    PHONE_USAGE,
    "all",
    ADD_BIRTHDAY_USAGE,
    SHOW_BIRTHDAY_USAGE,
    "birthdays",
    REMOVE_PHONE_USAGE,
    DELETE_USAGE,
    "hello",
    "help",
    "exit | close",
];

const ADD_USAGE: &str = "add <name> <phone>";
const CHANGE_USAGE: &str = "change <name> <old phone> <new phone>";
const PHONE_USAGE: &str = "phone <name>";
const ADD_BIRTHDAY_USAGE: &str = "add-birthday <name> <DD.MM.YYYY>";
const SHOW_BIRTHDAY_USAGE: &str = "show-birthday <name>";
const REMOVE_PHONE_USAGE: &str = "remove-phone <name> <phone>";
const DELETE_USAGE: &str = "delete <name>";

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyInput`] for a blank line,
    /// [`Error::UnknownCommand`] for an unrecognized command word and
    /// [`Error::MissingArguments`] when required arguments are absent.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let command = words.next().ok_or(Error::EmptyInput)?.to_lowercase();
        let args: Vec<&str> = words.collect();

        let command = match command.as_str() {
            "hello" => Self::Hello,
            "help" => Self::Help,
            "all" => Self::All,
            "birthdays" => Self::Birthdays,
            "exit" | "close" => Self::Exit,
            "add" => {
                let [name, phone] = take::<2>(&args, ADD_USAGE)?;
                Self::Add { name, phone }
            }
            "change" => {
                let [name, old, new] = take::<3>(&args, CHANGE_USAGE)?;
                Self::Change { name, old, new }
            }
            "phone" => {
                let [name] = take::<1>(&args, PHONE_USAGE)?;
                Self::Phone { name }
            }
            "add-birthday" => {
                let [name, date] = take::<2>(&args, ADD_BIRTHDAY_USAGE)?;
                Self::AddBirthday { name, date }
            }
            "show-birthday" => {
                let [name] = take::<1>(&args, SHOW_BIRTHDAY_USAGE)?;
                Self::ShowBirthday { name }
            }
            "remove-phone" => {
                let [name, phone] = take::<2>(&args, REMOVE_PHONE_USAGE)?;
                Self::RemovePhone { name, phone }
            }
            "delete" => {
                let [name] = take::<1>(&args, DELETE_USAGE)?;
                Self::Delete { name }
            }
            _ => return Err(Error::UnknownCommand { command }),
        };
        Ok(command)
    }

    /// Whether running this command can change the address book.
    #[must_use]
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Add { .. }
                | Self::Change { .. }
                | Self::AddBirthday { .. }
                | Self::RemovePhone { .. }
                | Self::Delete { .. }
        )
    }
}

/// The first `N` arguments, owned.
fn take<const N: usize>(args: &[&str], usage: &'static str) -> Result<[String; N]> {
    if args.len() < N {
        return Err(Error::MissingArguments { usage });
    }
    Ok(std::array::from_fn(|i| args[i].to_string()))
}
