//! User preferences stored in the settings blob.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{CalError, CalResult};

pub const DEFAULT_REMINDER_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub theme: Theme,
    pub default_view: DefaultView,
    /// Default minutes before an event to remind
    pub default_reminder_time: u32,
    pub start_day_of_week: StartDayOfWeek,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            theme: Theme::System,
            default_view: DefaultView::Month,
            default_reminder_time: DEFAULT_REMINDER_MINUTES,
            start_day_of_week: StartDayOfWeek::Sunday,
        }
    }
}

impl Settings {
    /// Names accepted by [`Settings::set`], as stored in the blob.
    pub const KEYS: [&'static str; 4] = [
        "theme",
        "defaultView",
        "defaultReminderTime",
        "startDayOfWeek",
    ];

    /// Update a single preference by name.
    ///
    /// Keys match the stored field names case-insensitively, with `-` and `_`
    /// ignored, so `default-view` and `defaultView` are the same key.
    pub fn set(&mut self, key: &str, value: &str) -> CalResult<()> {
        let normalized: String = key
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "theme" => self.theme = value.parse()?,
            "defaultview" => self.default_view = value.parse()?,
            "defaultremindertime" => {
                self.default_reminder_time = value.trim().parse().map_err(|_| {
                    CalError::InvalidArgument(format!(
                        "Reminder time must be a number of minutes, got '{}'",
                        value
                    ))
                })?
            }
            "startdayofweek" => self.start_day_of_week = value.parse()?,
            _ => {
                return Err(CalError::InvalidArgument(format!(
                    "Unknown setting '{}'. Available: {}",
                    key,
                    Self::KEYS.join(", ")
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl FromStr for Theme {
    type Err = CalError;

    fn from_str(s: &str) -> CalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            _ => Err(CalError::InvalidArgument(format!(
                "Theme must be one of light, dark, system; got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefaultView {
    Month,
    Week,
    Day,
}

impl FromStr for DefaultView {
    type Err = CalError;

    fn from_str(s: &str) -> CalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "month" => Ok(DefaultView::Month),
            "week" => Ok(DefaultView::Week),
            "day" => Ok(DefaultView::Day),
            _ => Err(CalError::InvalidArgument(format!(
                "View must be one of month, week, day; got '{}'",
                s
            ))),
        }
    }
}

impl fmt::Display for DefaultView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            DefaultView::Month => "month",
            DefaultView::Week => "week",
            DefaultView::Day => "day",
        };
        write!(f, "{}", s)
    }
}

/// Which weekday begins each calendar row.
///
/// Stored as `0` (Sunday) or `1` (Monday). Reading any other stored value
/// falls back to Sunday; parsing user input rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartDayOfWeek {
    #[default]
    Sunday,
    Monday,
}

impl StartDayOfWeek {
    pub fn index(self) -> u8 {
        match self {
            StartDayOfWeek::Sunday => 0,
            StartDayOfWeek::Monday => 1,
        }
    }

    pub fn weekday(self) -> Weekday {
        match self {
            StartDayOfWeek::Sunday => Weekday::Sun,
            StartDayOfWeek::Monday => Weekday::Mon,
        }
    }

    fn from_index_lenient(index: i64) -> Self {
        match index {
            0 => StartDayOfWeek::Sunday,
            1 => StartDayOfWeek::Monday,
            other => {
                log::warn!("Unsupported startDayOfWeek {} in settings, using Sunday", other);
                StartDayOfWeek::Sunday
            }
        }
    }

    /// Column of `date` in a row starting on this weekday (0..=6).
    ///
    /// For a Sunday start this is the plain weekday index (0=Sun..6=Sat);
    /// for a Monday start it is rotated with `(weekday + 6) % 7`.
    pub fn column_of(self, date: NaiveDate) -> u32 {
        let weekday = date.weekday().num_days_from_sunday();
        match self {
            StartDayOfWeek::Sunday => weekday,
            StartDayOfWeek::Monday => (weekday + 6) % 7,
        }
    }

    /// Short weekday headers in row order.
    pub fn headers(self) -> [&'static str; 7] {
        match self {
            StartDayOfWeek::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
            StartDayOfWeek::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
        }
    }
}

impl TryFrom<u8> for StartDayOfWeek {
    type Error = CalError;

    fn try_from(value: u8) -> CalResult<Self> {
        match value {
            0 => Ok(StartDayOfWeek::Sunday),
            1 => Ok(StartDayOfWeek::Monday),
            other => Err(CalError::InvalidArgument(format!(
                "Start day of week must be 0 (Sunday) or 1 (Monday), got {}",
                other
            ))),
        }
    }
}

impl FromStr for StartDayOfWeek {
    type Err = CalError;

    fn from_str(s: &str) -> CalResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "sunday" | "sun" => Ok(StartDayOfWeek::Sunday),
            "monday" | "mon" => Ok(StartDayOfWeek::Monday),
            other => {
                let index: u8 = other.parse().map_err(|_| {
                    CalError::InvalidArgument(format!(
                        "Start day of week must be sunday, monday, 0 or 1; got '{}'",
                        s
                    ))
                })?;
                StartDayOfWeek::try_from(index)
            }
        }
    }
}

impl fmt::Display for StartDayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            StartDayOfWeek::Sunday => "sunday",
            StartDayOfWeek::Monday => "monday",
        };
        write!(f, "{}", s)
    }
}

impl Serialize for StartDayOfWeek {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for StartDayOfWeek {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = i64::deserialize(deserializer)?;
        Ok(StartDayOfWeek::from_index_lenient(index))
    }
}
