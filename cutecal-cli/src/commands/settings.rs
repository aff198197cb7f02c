use anyhow::Result;
use cutecal_core::settings::Settings;
use cutecal_core::storage::{KeyValueStore, Storage};
use owo_colors::OwoColorize;

pub fn show<S: KeyValueStore>(storage: &Storage<S>) -> Result<()> {
    print_settings(&storage.settings()?);
    Ok(())
}

pub fn set<S: KeyValueStore>(storage: &mut Storage<S>, key: &str, value: &str) -> Result<()> {
    let settings = storage.update_setting(key, value)?;
    println!("{}", format!("  Updated {}", key).green());
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &Settings) {
    println!("{}", "Settings".bold());
    println!("  {:<22} {}", "theme".dimmed(), settings.theme);
    println!("  {:<22} {}", "defaultView".dimmed(), settings.default_view);
    println!(
        "  {:<22} {} min",
        "defaultReminderTime".dimmed(),
        settings.default_reminder_time
    );
    println!(
        "  {:<22} {}",
        "startDayOfWeek".dimmed(),
        settings.start_day_of_week
    );
}
