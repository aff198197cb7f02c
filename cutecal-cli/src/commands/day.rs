use anyhow::Result;
use chrono::NaiveDate;
use cutecal_core::storage::{KeyValueStore, Storage};
use cutecal_core::views::build_day;

use crate::render::Render;

pub fn run<S: KeyValueStore>(storage: &Storage<S>, date: NaiveDate) -> Result<()> {
    let events = storage.events_by_date(date)?;
    println!("{}", build_day(date, &events).render());
    Ok(())
}
