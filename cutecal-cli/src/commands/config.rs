use anyhow::Result;
use cutecal_core::config::AppConfig;
use cutecal_core::storage::{EVENTS_KEY, FileStore, SETTINGS_KEY};
use owo_colors::OwoColorize;

pub fn run(config: &AppConfig) -> Result<()> {
    let config_path = AppConfig::config_path()?;
    let store = FileStore::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", store.dir().display());
    println!("  Events:     {}", store.path_for(EVENTS_KEY)?.display());
    println!("  Settings:   {}", store.path_for(SETTINGS_KEY)?.display());
    println!();
    println!("{}", "Logging".bold());
    println!("  Level:      {}", config.log_level);

    Ok(())
}
