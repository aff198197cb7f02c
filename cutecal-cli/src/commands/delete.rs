use anyhow::Result;
use cutecal_core::storage::{KeyValueStore, Storage};
use dialoguer::Confirm;
use owo_colors::OwoColorize;

pub fn run<S: KeyValueStore>(storage: &mut Storage<S>, id: &str, force: bool) -> Result<()> {
    let event = storage.get_event(id)?;

    // Confirm unless --force
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete \"{}\"?", event))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    storage.delete_event(id)?;
    log::info!("Deleted event {}", id);
    println!("{}", format!("  Deleted: {}", event).red());

    Ok(())
}
