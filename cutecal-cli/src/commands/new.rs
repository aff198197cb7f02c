use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use cutecal_core::event::{Contact, Event};
use cutecal_core::storage::{KeyValueStore, Storage};
use dialoguer::Input;
use owo_colors::OwoColorize;

/// Command-line input for a new event. Anything left out is prompted for
/// when the title or start is missing.
pub struct NewEvent {
    pub title: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub contact: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub reminder: Option<String>,
    pub all_day: bool,
}

/// A parsed point in time and whether the input named a time of day.
#[derive(Debug, Clone, Copy, PartialEq)]
struct When {
    at: DateTime<Utc>,
    has_time: bool,
}

pub fn run<S: KeyValueStore>(storage: &mut Storage<S>, input: NewEvent) -> Result<()> {
    let interactive = input.title.is_none() || input.start.is_none();

    let title = match input.title {
        Some(t) => t,
        None => Input::<String>::new()
            .with_prompt("  Title")
            .interact_text()?,
    };

    let start = match &input.start {
        Some(s) => parse_when(s)?,
        None => prompt_with_retry("  When?", parse_when)?,
    };

    let end = input.end.as_deref().map(parse_when).transpose()?;

    let contact = match input.contact {
        Some(name) => Some(name),
        None if interactive => optional(
            Input::new()
                .with_prompt("  Who? (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?,
        ),
        None => None,
    };

    let location = match input.location {
        Some(loc) => optional(loc),
        None if interactive => optional(
            Input::new()
                .with_prompt("  Where? (skip)")
                .default(String::new())
                .show_default(false)
                .interact_text()?,
        ),
        None => None,
    };

    let reminder = input.reminder.as_deref().map(parse_reminder).transpose()?;

    let mut event = Event::new(start.at).with_title(title);
    event.end_date = end.map(|e| e.at);
    event.is_all_day = input.all_day || !start.has_time;
    event.location = location;
    event.reminder = reminder;
    event.contact = contact.map(|name| Contact {
        phone: input.phone.unwrap_or_default(),
        email: input.email.unwrap_or_default(),
        ..Contact::new(name)
    });

    let summary = event.to_string();
    let id = event.id.clone();
    storage.add_event(event)?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {}", summary).green());
    println!("  {}", id.dimmed());

    Ok(())
}

fn optional(s: String) -> Option<String> {
    let s = s.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// Prompt the user with retry on parse errors.
fn prompt_with_retry<F>(prompt: &str, parse: F) -> Result<When>
where
    F: Fn(&str) -> Result<When>,
{
    loop {
        let input: String = Input::new().with_prompt(prompt).interact_text()?;
        match parse(&input) {
            Ok(when) => return Ok(when),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

const ABBREVIATIONS: [(&str, &str); 22] = [
    ("mon", "monday"),
    ("tue", "tuesday"),
    ("tues", "tuesday"),
    ("wed", "wednesday"),
    ("thu", "thursday"),
    ("thur", "thursday"),
    ("thurs", "thursday"),
    ("fri", "friday"),
    ("sat", "saturday"),
    ("sun", "sunday"),
    ("jan", "january"),
    ("feb", "february"),
    ("mar", "march"),
    ("apr", "april"),
    ("jun", "june"),
    ("jul", "july"),
    ("aug", "august"),
    ("sep", "september"),
    ("sept", "september"),
    ("oct", "october"),
    ("nov", "november"),
    ("dec", "december"),
];

/// Expand day and month abbreviations that fuzzydate doesn't handle.
fn expand_abbreviations(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == word)
                .map(|(_, full)| (*full).to_string())
                .unwrap_or_else(|| word.to_string())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse natural language ("tomorrow 3pm", "march 20") into a local
/// point in time.
fn parse_when(input: &str) -> Result<When> {
    let parsed = fuzzydate::parse(&expand_abbreviations(input))
        .map_err(|_| anyhow::anyhow!("Could not parse date/time: \"{}\"", input))?;

    let has_time = has_time_component(input);
    let local = if has_time {
        parsed
    } else {
        cutecal_core::dates::start_of_day(parsed.date())
    };

    Ok(When {
        at: local_to_utc(local)?,
        has_time,
    })
}

fn local_to_utc(local: NaiveDateTime) -> Result<DateTime<Utc>> {
    Local
        .from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| format!("{} does not exist in the local time zone", local))
}

/// True if the input names a time of day: "noon", "midnight", "6pm",
/// "6 pm", "15:00" or "at 3".
fn has_time_component(input: &str) -> bool {
    let lower = input.to_lowercase();
    let words: Vec<&str> = lower.split_whitespace().collect();

    let is_number = |w: &str| !w.is_empty() && w.chars().all(|c| c.is_ascii_digit());

    words.iter().enumerate().any(|(i, word)| {
        if *word == "noon" || *word == "midnight" {
            return true;
        }

        // "6pm", "11am"
        if let Some(num) = word.strip_suffix("am").or_else(|| word.strip_suffix("pm")) {
            if is_number(num) {
                return true;
            }
        }

        // "6 pm"
        if (*word == "am" || *word == "pm") && i > 0 && is_number(words[i - 1]) {
            return true;
        }

        // "15:00"
        if let Some((h, m)) = word.split_once(':') {
            if is_number(h) && m.starts_with(|c: char| c.is_ascii_digit()) {
                return true;
            }
        }

        // "at 3"
        *word == "at"
            && words
                .get(i + 1)
                .is_some_and(|next| next.starts_with(|c: char| c.is_ascii_digit()))
    })
}

/// Parse a reminder lead time like "30m" or "1h 15m" into minutes.
fn parse_reminder(input: &str) -> Result<u32> {
    let trimmed = input.trim();

    // A bare number means minutes
    if let Ok(minutes) = trimmed.parse::<u32>() {
        return Ok(minutes);
    }

    let duration = humantime::parse_duration(trimmed)
        .with_context(|| format!("Could not parse reminder: \"{}\"", input))?;
    u32::try_from(duration.as_secs() / 60).context("Reminder too far ahead")
}
