//! Event and contact types.
//!
//! The stored event shape is a superset of the two layouts the mobile app has
//! written over time: contact-centric events (`contact` + `startDate`) and
//! title-centric events (`title`, `description`, `location`, `endDate`, ...).
//! Every field apart from `id` and `startDate` is optional so both layouts
//! deserialize into the same type.

use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar event as stored in the events blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub start_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_all_day: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,

    /// Minutes before the event to trigger a reminder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder: Option<u32>,

    /// Repeat rule as entered by the user. Stored and round-tripped only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<String>,
}

/// The person an event is about.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl Contact {
    pub fn new(name: impl Into<String>) -> Self {
        Contact {
            id: generate_id(),
            name: name.into(),
            ..Default::default()
        }
    }
}

/// Generate a unique id for events and contacts.
pub fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Event {
    /// A bare event starting at `start` with a freshly generated id.
    pub fn new(start_date: DateTime<Utc>) -> Self {
        Event {
            id: generate_id(),
            contact: None,
            title: None,
            description: None,
            location: None,
            start_date,
            end_date: None,
            is_all_day: false,
            category_id: None,
            reminder: None,
            recurring: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }

    /// Title if set, otherwise the contact's name.
    pub fn display_name(&self) -> &str {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.contact.as_ref().map(|c| c.name.as_str()))
            .unwrap_or("(untitled)")
    }

    /// Calendar date of the start instant as seen from `tz`.
    pub fn start_day_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.start_date.with_timezone(tz).date_naive()
    }

    /// Calendar date of the start instant in the local time zone.
    pub fn start_day(&self) -> NaiveDate {
        self.start_day_in(&Local)
    }

    /// When the reminder for this event is due, using the event's own lead
    /// time or `default_minutes` when it has none.
    pub fn reminder_at(&self, default_minutes: u32) -> DateTime<Utc> {
        let minutes = self.reminder.unwrap_or(default_minutes);
        self.start_date - Duration::minutes(i64::from(minutes))
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Sort events chronologically by start, keeping input order for ties.
pub fn sort_by_start(events: &mut [Event]) {
    events.sort_by_key(|e| e.start_date);
}
