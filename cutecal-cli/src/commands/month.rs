use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use cutecal_core::grid::build_month_grid;
use cutecal_core::storage::{KeyValueStore, Storage};

use crate::render::MonthGridRender;

/// `month` is 1-based here, as typed on the command line.
pub fn run<S: KeyValueStore>(
    storage: &Storage<S>,
    year: Option<i32>,
    month: Option<i32>,
    today: NaiveDate,
) -> Result<()> {
    let settings = storage.settings()?;
    let events = storage.events()?;

    let year = year.unwrap_or(today.year());
    let month0 = month0_from_arg(month, today)?;

    let grid = build_month_grid(year, month0, &events, settings.start_day_of_week, today)?;
    println!("{}", grid.render(settings.start_day_of_week));

    Ok(())
}

/// Zero-based month for the grid builder. Values past 12 or below 1 are
/// passed through and normalized there.
fn month0_from_arg(month: Option<i32>, today: NaiveDate) -> Result<i32> {
    match month {
        Some(m) => m
            .checked_sub(1)
            .with_context(|| format!("Month {} is out of range", m)),
        None => Ok(today.month0() as i32),
    }
}
