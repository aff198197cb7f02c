use anyhow::Result;
use chrono::NaiveDate;
use cutecal_core::event::sort_by_start;
use cutecal_core::storage::{KeyValueStore, Storage};
use owo_colors::OwoColorize;

use crate::render::{Render, format_day};

pub fn run<S: KeyValueStore>(storage: &Storage<S>, today: NaiveDate) -> Result<()> {
    let mut events = storage.events()?;

    if events.is_empty() {
        println!("{}", "No events yet".dimmed());
        return Ok(());
    }

    sort_by_start(&mut events);

    // Group events by day and print
    let mut current_date: Option<NaiveDate> = None;

    for event in &events {
        let date = event.start_day();

        if current_date != Some(date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", date_label(date, today).bold());
            current_date = Some(date);
        }

        println!("  {}", event.render());
    }

    Ok(())
}

/// Human-readable label for a day (e.g. "Today", "Tomorrow", "Wed Feb 25")
fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        -1 => "Yesterday".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => format_day(date),
    }
}
