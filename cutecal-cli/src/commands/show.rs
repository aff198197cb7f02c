use anyhow::Result;
use chrono::Local;
use cutecal_core::dates::format_date;
use cutecal_core::storage::{KeyValueStore, Storage};
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(storage: &Storage<S>, id: &str) -> Result<()> {
    let event = storage.get_event(id)?;
    let settings = storage.settings()?;

    let start = event.start_date.with_timezone(&Local);

    println!("{}", event.to_string().bold());
    println!("  {:<10} {}", "When:".dimmed(), format_date(&start, !event.is_all_day));

    if let Some(end) = event.end_date {
        let end = end.with_timezone(&Local);
        println!("  {:<10} {}", "Until:".dimmed(), format_date(&end, !event.is_all_day));
    }
    if let Some(location) = &event.location {
        println!("  {:<10} {}", "Where:".dimmed(), location);
    }
    if let Some(description) = &event.description {
        println!("  {:<10} {}", "Notes:".dimmed(), description);
    }

    if let Some(contact) = &event.contact {
        println!("  {:<10} {}", "Contact:".dimmed(), contact.name);
        let details = [
            ("Phone:", &contact.phone),
            ("Email:", &contact.email),
            ("About:", &contact.notes),
        ];
        for (label, value) in details {
            if !value.is_empty() {
                println!("  {:<10} {}", label.dimmed(), value);
            }
        }
    }

    let lead = event.reminder.unwrap_or(settings.default_reminder_time);
    let remind_at = event
        .reminder_at(settings.default_reminder_time)
        .with_timezone(&Local);
    println!(
        "  {:<10} {} ({} min before)",
        "Reminder:".dimmed(),
        format_date(&remind_at, true),
        lead
    );

    if let Some(recurring) = &event.recurring {
        println!("  {:<10} {}", "Repeats:".dimmed(), recurring);
    }

    println!("  {:<10} {}", "Id:".dimmed(), event.id.dimmed());

    Ok(())
}
