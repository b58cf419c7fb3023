//! The interactive assistant.
//!
//! [`Shell`] owns the address book and its store, executes [`Command`]s and
//! turns their results into the text shown to the user. Errors never end a
//! session; they are reported as `Error: <message>` and the loop continues.

mod command;

use std::io::{BufRead, Write};

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info};

pub use command::{Command, USAGE};

use crate::book::AddressBook;
use crate::contact::Contact;
use crate::error::{Error, Result};
use crate::reminders::ReminderPolicy;
use crate::storage::ContactStore;

/// Printed when a session starts.
pub const WELCOME: &str = "Welcome to the assistant bot!";

/// Printed before each line is read.
pub const PROMPT: &str = "Enter a command: ";

/// Printed when the session ends on `exit`/`close`.
pub const GOODBYE: &str = "Good bye!";

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Text to show; the session continues.
    Message(String),
    /// Text to show; the session ends.
    Exit(String),
}

impl Reply {
    /// The text to show.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Message(text) | Self::Exit(text) => text,
        }
    }
}

/// An assistant session over an address book.
#[derive(Debug)]
pub struct Shell {
    book: AddressBook,
    store: Box<dyn ContactStore>,
    policy: ReminderPolicy,
    autosave: bool,
    today: Option<NaiveDate>,
    dirty: bool,
}

impl Shell {
    /// Load the book from `store` and start a session over it.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn open(store: Box<dyn ContactStore>, policy: ReminderPolicy) -> Result<Self> {
        let book = store.load()?;
        info!(
            "Loaded {} contacts from {} store at {}",
            book.len(),
            store.name(),
            store.location().display()
        );
        Ok(Self {
            book,
            store,
            policy,
            autosave: false,
            today: None,
            dirty: false,
        })
    }

    /// Save after every change instead of only at the end of the session.
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Use a fixed date for birthday queries instead of the local clock.
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The address book being edited.
    #[must_use]
    pub fn book(&self) -> &AddressBook {
        &self.book
    }

    /// Whether there are changes not yet written to the store.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Run the read-eval-print loop until `exit` or end of input.
    ///
    /// Unsaved changes are written to the store when the loop ends, including
    /// when reading input fails. Bytes that are not valid UTF-8 are replaced
    /// and the line is handled like any other input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input, writing output, or the final save
    /// fails. Command errors are shown to the user and do not end the loop.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<()> {
        writeln!(output, "{WELCOME}")?;
        let mut buf = Vec::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            buf.clear();
            let read = match input.read_until(b'\n', &mut buf) {
                Ok(read) => read,
                Err(err) => {
                    error!("Failed to read input: {err}");
                    self.persist()?;
                    return Err(err.into());
                }
            };
            if read == 0 {
                debug!("End of input, closing session");
                writeln!(output)?;
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            match self.execute_line(line.trim_end_matches(['\n', '\r'])) {
                Reply::Message(text) => writeln!(output, "{text}")?,
                Reply::Exit(text) => {
                    writeln!(output, "{text}")?;
                    break;
                }
            }
        }

        self.persist()
    }

    /// Parse and execute one line, reporting any error as a message.
    pub fn execute_line(&mut self, line: &str) -> Reply {
        match Command::parse(line).and_then(|command| self.execute(&command)) {
            Ok(reply) => reply,
            Err(err) => {
                if err.is_input_error() {
                    debug!("Rejected input {line:?}: {err}");
                } else {
                    error!("Command failed: {err}");
                }
                err.into()
            }
        }
    }

    /// Execute a parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command is rejected, or if autosave is on and
    /// saving fails.
    pub fn execute(&mut self, command: &Command) -> Result<Reply> {
        debug!("Executing {command:?}");
        let text = self.dispatch(command)?;

        if command.is_mutating() {
            self.dirty = true;
            if self.autosave {
                self.persist()?;
            }
        }

        Ok(match command {
            Command::Exit => Reply::Exit(text),
            _ => Reply::Message(text),
        })
    }

    /// Write the book to the store if it has unsaved changes.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub fn persist(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }
        self.store.save(&self.book)?;
        self.dirty = false;
        info!(
            "Saved {} contacts to {}",
            self.book.len(),
            self.store.location().display()
        );
        Ok(())
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn dispatch(&mut self, command: &Command) -> Result<String> {
        match command {
            Command::Hello => Ok("How can I help you?".to_string()),
            Command::Help => Ok(help_text()),
            Command::Exit => Ok(GOODBYE.to_string()),
            Command::Add { name, phone } => self.add_contact(name, phone),
            Command::Change { name, old, new } => {
                self.book.get_mut(name)?.edit_phone(old, new)?;
                Ok(format!("Contact '{name}' updated: {old} -> {new}."))
            }
            Command::Phone { name } => Ok(self.book.get(name)?.to_string()),
            Command::All => Ok(self.show_all()),
            Command::AddBirthday { name, date } => {
                self.book.get_mut(name)?.set_birthday(date)?;
                Ok("Birthday added.".to_string())
            }
            Command::ShowBirthday { name } => Ok(self
                .book
                .get(name)?
                .birthday()
                .map_or_else(
                    || "Birthday not set for this contact.".to_string(),
                    |birthday| birthday.to_string(),
                )),
            Command::Birthdays => Ok(self.show_birthdays()),
            Command::RemovePhone { name, phone } => {
                self.book.get_mut(name)?.remove_phone(phone)?;
                Ok(format!("Phone {phone} removed from '{name}'."))
            }
            Command::Delete { name } => {
                self.book.delete(name)?;
                Ok(format!("Contact '{name}' deleted."))
            }
        }
    }

    fn add_contact(&mut self, name: &str, phone: &str) -> Result<String> {
        if let Some(contact) = self.book.find_mut(name) {
            contact.add_phone(phone)?;
            return Ok("Contact updated.".to_string());
        }

        let mut contact = Contact::new(name);
        contact.add_phone(phone)?;
        self.book.insert(contact);
        Ok("Contact added.".to_string())
    }

    fn show_all(&self) -> String {
        if self.book.is_empty() {
            return "No contacts found.".to_string();
        }
        self.book
            .contacts()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn show_birthdays(&self) -> String {
        let reminders = self.book.upcoming_birthdays(self.today(), self.policy);
        if reminders.is_empty() {
            return format!(
                "No upcoming birthdays in the next {} days.",
                self.policy.window_days
            );
        }

        let mut text = String::from("Upcoming birthdays:");
        for reminder in &reminders {
            text.push_str("\n  ");
            text.push_str(&reminder.to_string());
        }
        text
    }
}

fn help_text() -> String {
    let mut text = String::from("Available commands:");
    for usage in USAGE {
        text.push_str("\n  ");
        text.push_str(usage);
    }
    text
}

impl From<Error> for Reply {
    fn from(err: Error) -> Self {
        Self::Message(format!("Error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonStore, SqliteStore};

    fn today() -> NaiveDate {
        // A Monday.
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn shell() -> Shell {
        let store = SqliteStore::open_in_memory().unwrap();
        Shell::open(Box::new(store), ReminderPolicy::default())
            .unwrap()
            .with_today(today())
    }

    fn say(shell: &mut Shell, line: &str) -> String {
        shell.execute_line(line).text().to_string()
    }

    #[test]
    fn test_hello() {
        let mut shell = shell();
        assert_eq!(say(&mut shell, "hello"), "How can I help you?");
    }

    #[test]
    fn test_add_then_phone() {
        let mut shell = shell();
        assert_eq!(say(&mut shell, "add John 1234567890"), "Contact added.");
        assert_eq!(say(&mut shell, "add John 5555555555"), "Contact updated.");
        assert_eq!(
            say(&mut shell, "phone John"),
            "Contact name: John, phones: 1234567890; 5555555555"
        );
        assert!(shell.is_dirty());
    }

    #[test]
    fn test_add_invalid_phone_creates_nothing() {
        let mut shell = shell();
        let reply = say(&mut shell, "add John 12345");
        assert!(reply.starts_with("Error: invalid phone number"));
        assert!(shell.book().find("John").is_none());
        assert!(!shell.is_dirty());
    }

    #[test]
    fn test_change() {
        let mut shell = shell();
        say(&mut shell, "add John 1234567890");
        assert_eq!(
            say(&mut shell, "change John 1234567890 0987654321"),
            "Contact 'John' updated: 1234567890 -> 0987654321."
        );
        assert!(say(&mut shell, "change John 1234567890 1111111111")
            .contains("not found"));
        assert!(say(&mut shell, "change Ghost 1234567890 1111111111")
            .contains("contact 'Ghost' not found"));
    }

    #[test]
    fn test_all() {
        let mut shell = shell();
        assert_eq!(say(&mut shell, "all"), "No contacts found.");

        say(&mut shell, "add Bob 1111111111");
        say(&mut shell, "add Alice 2222222222");
        assert_eq!(
            say(&mut shell, "all"),
            "Contact name: Alice, phones: 2222222222\nContact name: Bob, phones: 1111111111"
        );
    }

    #[test]
    fn test_birthday_commands() {
        let mut shell = shell();
        say(&mut shell, "add Jane 1234567890");
        assert_eq!(
            say(&mut shell, "show-birthday Jane"),
            "Birthday not set for this contact."
        );
        assert!(say(&mut shell, "add-birthday Jane 2000-01-01").starts_with("Error: invalid date"));
        assert_eq!(say(&mut shell, "add-birthday Jane 20.01.1990"), "Birthday added.");
        assert_eq!(say(&mut shell, "show-birthday Jane"), "20.01.1990");
        assert!(say(&mut shell, "add-birthday Ghost 20.01.1990").contains("not found"));
    }

    #[test]
    fn test_birthdays() {
        let mut shell = shell();
        assert_eq!(
            say(&mut shell, "birthdays"),
            "No upcoming birthdays in the next 7 days."
        );

        say(&mut shell, "add Jane 1234567890");
        say(&mut shell, "add-birthday Jane 20.01.1990");
        say(&mut shell, "add Max 1234567891");
        say(&mut shell, "add-birthday Max 17.01.1992");
        say(&mut shell, "add Far 1234567892");
        say(&mut shell, "add-birthday Far 17.03.1992");

        assert_eq!(
            say(&mut shell, "birthdays"),
            "Upcoming birthdays:\n  Max: Wednesday (17.01.2024)\n  Jane: Monday (22.01.2024)"
        );
    }

    #[test]
    fn test_remove_phone_and_delete() {
        let mut shell = shell();
        say(&mut shell, "add John 1234567890");
        assert_eq!(
            say(&mut shell, "remove-phone John 1234567890"),
            "Phone 1234567890 removed from 'John'."
        );
        assert_eq!(say(&mut shell, "delete John"), "Contact 'John' deleted.");
        assert!(say(&mut shell, "delete John").contains("not found"));
    }

    #[test]
    fn test_errors_are_reported() {
        let mut shell = shell();
        assert!(say(&mut shell, "").starts_with("Error: empty command"));
        assert!(say(&mut shell, "dance").starts_with("Error: unknown command 'dance'"));
        assert_eq!(
            say(&mut shell, "add John"),
            "Error: not enough arguments, usage: add <name> <phone>"
        );
    }

    #[test]
    fn test_help_lists_commands() {
        let mut shell = shell();
        let help = say(&mut shell, "help");
        assert!(help.starts_with("Available commands:"));
        assert!(help.contains("add-birthday <name> <DD.MM.YYYY>"));
    }

    #[test]
    fn test_exit_reply() {
        let mut shell = shell();
        assert_eq!(shell.execute_line("close"), Reply::Exit(GOODBYE.to_string()));
    }

    #[test]
    fn test_run_session() {
        let mut shell = shell();
        let input = b"hello\nadd John 1234567890\nfoo\nphone John\nexit\nall\n";
        let mut output = Vec::new();

        shell.run(&input[..], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        let expected = [
            WELCOME,
            "Enter a command: How can I help you?",
            "Enter a command: Contact added.",
            "Enter a command: Error: unknown command 'foo', type 'help' to list commands",
            "Enter a command: Contact name: John, phones: 1234567890",
            "Enter a command: Good bye!",
            "",
        ]
        .join("\n");
        assert_eq!(output, expected);
        assert!(!shell.is_dirty());
    }

    #[test]
    fn test_run_saves_on_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut shell =
            Shell::open(Box::new(JsonStore::new(&path)), ReminderPolicy::default()).unwrap();
        shell
            .run(&b"add John 1234567890\nadd-birthday John 05.03.1990\n"[..], Vec::new())
            .unwrap();

        let reopened = JsonStore::new(&path).load().unwrap();
        let john = reopened.get("John").unwrap();
        assert_eq!(john.phones()[0].as_str(), "1234567890");
        assert_eq!(john.birthday().unwrap().to_string(), "05.03.1990");
    }

    #[test]
    fn test_run_survives_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut shell =
            Shell::open(Box::new(JsonStore::new(&path)), ReminderPolicy::default()).unwrap();
        let mut output = Vec::new();
        shell
            .run(&b"add John 1234567890\n\xff\xfe\nall\nexit\n"[..], &mut output)
            .unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Enter a command: Error: unknown command"));
        assert!(output.contains("Contact name: John, phones: 1234567890"));
        assert!(output.ends_with("Good bye!\n"));
        assert_eq!(JsonStore::new(&path).load().unwrap().len(), 1);
    }

    #[test]
    fn test_run_accepts_crlf_lines() {
        let mut shell = shell();
        let mut output = Vec::new();
        shell.run(&b"add John 1234567890\r\nexit\r\n"[..], &mut output).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Contact added."));
        assert!(output.ends_with("Good bye!\n"));
    }

    #[derive(Debug)]
    struct BrokenInput;

    impl std::io::Read for BrokenInput {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("terminal gone"))
        }
    }

    #[test]
    fn test_run_saves_before_read_error() {
        use std::io::Read;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut shell =
            Shell::open(Box::new(JsonStore::new(&path)), ReminderPolicy::default()).unwrap();
        let input = std::io::BufReader::new((&b"add John 1234567890\n"[..]).chain(BrokenInput));

        let err = shell.run(input, Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
        assert!(!shell.is_dirty());
        assert!(JsonStore::new(&path).load().unwrap().find("John").is_some());
    }

    #[test]
    fn test_read_only_session_does_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut shell =
            Shell::open(Box::new(JsonStore::new(&path)), ReminderPolicy::default()).unwrap();
        shell.run(&b"all\nexit\n"[..], Vec::new()).unwrap();

        assert!(!path.exists());
    }

    #[test]
    fn test_autosave() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contacts.json");

        let mut shell = Shell::open(Box::new(JsonStore::new(&path)), ReminderPolicy::default())
            .unwrap()
            .with_autosave(true);
        say(&mut shell, "add John 1234567890");

        assert!(!shell.is_dirty());
        assert_eq!(JsonStore::new(&path).load().unwrap().len(), 1);
    }

    #[test]
    fn test_error_into_reply() {
        let reply = Reply::from(Error::EmptyInput);
        assert!(reply.text().starts_with("Error: "));
    }
}
