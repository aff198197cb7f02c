use anyhow::Result;
use chrono::NaiveDate;
use cutecal_core::storage::{KeyValueStore, Storage};
use cutecal_core::views::build_week;

use crate::render::Render;

pub fn run<S: KeyValueStore>(
    storage: &Storage<S>,
    date: NaiveDate,
    today: NaiveDate,
) -> Result<()> {
    let settings = storage.settings()?;
    let events = storage.events()?;

    let week = build_week(date, &events, settings.start_day_of_week, today)?;
    println!("{}", week.render());

    Ok(())
}
