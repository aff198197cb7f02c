use anyhow::Result;
use cutecal_core::storage::{KeyValueStore, Storage};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(storage: &mut Storage<S>, force: bool) -> Result<()> {
    let count = storage.events()?.len();

    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "Delete {} {} and reset all settings?",
                count,
                if count == 1 { "event" } else { "events" }
            ))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    storage.clear_all()?;
    log::info!("Cleared {} events and settings", count);
    println!("{}", "All data cleared".yellow());

    Ok(())
}
