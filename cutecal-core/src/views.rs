//! Week and day pages.

use chrono::{Datelike, Days, Local, NaiveDate, TimeZone, Timelike};
use serde::Serialize;

use crate::error::{CalError, CalResult};
use crate::event::Event;
use crate::grid::{CalendarDay, DAYS_PER_WEEK, bucket_by_start_day, in_month};
use crate::settings::StartDayOfWeek;

pub const HOURS_PER_DAY: u32 = 24;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekView {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<CalendarDay>,
}

/// One hour of a day page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayView {
    pub date: NaiveDate,
    pub all_day: Vec<Event>,
    pub time_slots: Vec<TimeSlot>,
}

/// The week containing `date`, starting on the configured weekday.
pub fn build_week(
    date: NaiveDate,
    events: &[Event],
    start_day_of_week: StartDayOfWeek,
    today: NaiveDate,
) -> CalResult<WeekView> {
    build_week_in(&Local, date, events, start_day_of_week, today)
}

pub fn build_week_in<Tz: TimeZone>(
    tz: &Tz,
    date: NaiveDate,
    events: &[Event],
    start_day_of_week: StartDayOfWeek,
    today: NaiveDate,
) -> CalResult<WeekView> {
    let out_of_range = || CalError::DateOutOfRange {
        year: date.year(),
        month: date.month0() as i32,
    };

    let start_date = date
        .checked_sub_days(Days::new(u64::from(start_day_of_week.column_of(date))))
        .ok_or_else(out_of_range)?;
    let end_date = start_date
        .checked_add_days(Days::new(DAYS_PER_WEEK as u64 - 1))
        .ok_or_else(out_of_range)?;

    let mut buckets = bucket_by_start_day(tz, events, start_date, end_date);
    let days: Vec<CalendarDay> = start_date
        .iter_days()
        .take(DAYS_PER_WEEK)
        .map(|d| CalendarDay {
            date: d,
            is_current_month: in_month(d, date.year(), date.month0()),
            is_today: d == today,
            events: buckets.remove(&d).unwrap_or_default(),
        })
        .collect();

    Ok(WeekView {
        start_date,
        end_date,
        days,
    })
}

/// Hourly slots for `date`. Timed events go into the slot of their start
/// hour; all-day events are listed separately.
pub fn build_day(date: NaiveDate, events: &[Event]) -> DayView {
    build_day_in(&Local, date, events)
}

pub fn build_day_in<Tz: TimeZone>(tz: &Tz, date: NaiveDate, events: &[Event]) -> DayView {
    let mut time_slots: Vec<TimeSlot> = (0..HOURS_PER_DAY)
        .map(|hour| TimeSlot {
            hour,
            minute: 0,
            events: Vec::new(),
        })
        .collect();
    let mut all_day = Vec::new();

    for event in events {
        let start = event.start_date.with_timezone(tz);
        if start.date_naive() != date {
            continue;
        }

        if event.is_all_day {
            all_day.push(event.clone());
        } else if let Some(slot) = time_slots.get_mut(start.hour() as usize) {
            slot.events.push(event.clone());
        }
    }

    DayView {
        date,
        all_day,
        time_slots,
    }
}
