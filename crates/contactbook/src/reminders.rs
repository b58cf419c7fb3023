//! Upcoming birthday reminders.
//!
//! Works out which contacts have a birthday within a window of days from a
//! given date and on which day to congratulate them. Birthdays falling on a
//! weekend are congratulated on the following Monday.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::Serialize;

use crate::contact::{Contact, DATE_FORMAT};

/// Default number of days to look ahead.
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// How far ahead to look and whether weekend birthdays move to Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReminderPolicy {
    /// Days after `today` still considered upcoming (inclusive).
    pub window_days: u32,
    /// Move Saturday and Sunday congratulations to the next Monday.
    pub roll_weekends: bool,
}

impl Default for ReminderPolicy {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
            roll_weekends: true,
        }
    }
}

/// A contact to congratulate soon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    /// Name of the contact.
    pub name: String,
    /// The birthday anniversary itself.
    pub birthday: NaiveDate,
    /// The day to send congratulations.
    pub congratulate_on: NaiveDate,
}

impl Reminder {
    /// English name of the congratulation weekday, e.g. `Monday`.
    #[must_use]
    pub fn weekday_name(&self) -> String {
        self.congratulate_on.format("%A").to_string()
    }
}

impl std::fmt::Display for Reminder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} ({})",
            self.name,
            self.weekday_name(),
            self.congratulate_on.format(DATE_FORMAT)
        )
    }
}

/// The anniversary of `birthday` in `year`.
///
/// A 29 February birthday is observed on 28 February in non-leap years.
#[must_use]
pub fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day()).or_else(|| {
        if birthday.month() == 2 && birthday.day() == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

/// The first anniversary of `birthday` on or after `today`.
#[must_use]
pub fn next_anniversary(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(birthday, today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        anniversary_in(birthday, today.year() + 1)
    }
}

/// Shift weekend dates forward to Monday.
#[must_use]
pub fn roll_to_weekday(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date + Duration::days(2),
        Weekday::Sun => date + Duration::days(1),
        _ => date,
    }
}

/// Collect reminders for every contact whose birthday is within the window.
///
/// Results are ordered by congratulation day, then by name.
pub fn upcoming_birthdays<'a>(
    contacts: impl IntoIterator<Item = &'a Contact>,
    today: NaiveDate,
    policy: ReminderPolicy,
) -> Vec<Reminder> {
    let window = i64::from(policy.window_days);

    let mut reminders: Vec<Reminder> = contacts
        .into_iter()
        .filter_map(|contact| {
            let birthday = contact.birthday()?.date();
            let anniversary = next_anniversary(birthday, today)?;
            let days_until = (anniversary - today).num_days();
            if !(0..=window).contains(&days_until) {
                return None;
            }
            let congratulate_on = if policy.roll_weekends {
                roll_to_weekday(anniversary)
            } else {
                anniversary
            };
            Some(Reminder {
                name: contact.name().to_string(),
                birthday: anniversary,
                congratulate_on,
            })
        })
        .collect();

    reminders.sort_by(|a, b| {
        a.congratulate_on
            .cmp(&b.congratulate_on)
            .then_with(|| a.name.cmp(&b.name))
    });
    reminders
}
