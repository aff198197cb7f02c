//! Month grid generation.
//!
//! A month page is always 6 rows of 7 days. The rows start on the configured
//! weekday, so the page opens with the tail of the previous month and is
//! padded at the end with the head of the following month. Every cell carries
//! the events that start on its date, whichever month the cell belongs to.

use chrono::{Datelike, Days, Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::HashMap;

use crate::dates::{days_in_month, first_of_month, normalize_month};
use crate::error::{CalError, CalResult};
use crate::event::Event;
use crate::settings::StartDayOfWeek;

/// Number of cells on a month page.
pub const GRID_CELLS: usize = 42;
pub const DAYS_PER_WEEK: usize = 7;

/// One cell of a calendar page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub is_current_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

/// A full month page. `month` is 0-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

impl MonthGrid {
    /// The page split into its 6 rows.
    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarDay]> {
        self.days.chunks(DAYS_PER_WEEK)
    }

    /// The cell for `date`, if it is on this page.
    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        let first = self.days.first()?.date;
        let offset = usize::try_from((date - first).num_days()).ok()?;
        self.days.get(offset)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    /// Total number of event entries across the page.
    pub fn event_count(&self) -> usize {
        self.days.iter().map(|d| d.events.len()).sum()
    }
}

/// Build the month page for `(year, month)` using the local time zone to
/// decide which calendar date each event starts on.
///
/// `month` is 0-based and may overflow in either direction; it is normalized
/// through date arithmetic (`month = 12` is January of the next year).
pub fn build_month_grid(
    year: i32,
    month: i32,
    events: &[Event],
    start_day_of_week: StartDayOfWeek,
    today: NaiveDate,
) -> CalResult<MonthGrid> {
    build_month_grid_in(&Local, year, month, events, start_day_of_week, today)
}

/// Same as [`build_month_grid`], with event start dates read in `tz`.
pub fn build_month_grid_in<Tz: TimeZone>(
    tz: &Tz,
    year: i32,
    month: i32,
    events: &[Event],
    start_day_of_week: StartDayOfWeek,
    today: NaiveDate,
) -> CalResult<MonthGrid> {
    let out_of_range = || CalError::DateOutOfRange { year, month };

    let (year, month0) = normalize_month(year, month).ok_or_else(out_of_range)?;
    let first = first_of_month(year, month0).ok_or_else(out_of_range)?;
    let month_len = days_in_month(year, month0).ok_or_else(out_of_range)? as usize;

    let leading = start_day_of_week.column_of(first) as usize;
    let grid_start = first
        .checked_sub_days(Days::new(leading as u64))
        .ok_or_else(out_of_range)?;
    let grid_end = grid_start
        .checked_add_days(Days::new(GRID_CELLS as u64 - 1))
        .ok_or_else(out_of_range)?;

    let mut buckets = bucket_by_start_day(tz, events, grid_start, grid_end);
    let mut cell = |date: NaiveDate, is_current_month: bool| CalendarDay {
        date,
        is_current_month,
        is_today: date == today,
        events: buckets.remove(&date).unwrap_or_default(),
    };

    let mut days = Vec::with_capacity(GRID_CELLS);

    // Tail of the previous month
    days.extend(grid_start.iter_days().take(leading).map(|d| cell(d, false)));

    // The month itself
    days.extend(first.iter_days().take(month_len).map(|d| cell(d, true)));

    // Head of the following month
    let trailing = GRID_CELLS - days.len();
    if let Some(next_first) = first.checked_add_days(Days::new(month_len as u64)) {
        days.extend(next_first.iter_days().take(trailing).map(|d| cell(d, false)));
    }

    if days.len() != GRID_CELLS {
        return Err(out_of_range());
    }

    log::debug!(
        "Built month grid {}-{:02}: {} to {}",
        year,
        month0 + 1,
        grid_start,
        grid_end
    );

    Ok(MonthGrid {
        year,
        month: month0,
        days,
    })
}

/// Group the events starting within `[from, to]` by calendar date, keeping
/// the input order inside each day.
pub(crate) fn bucket_by_start_day<Tz: TimeZone>(
    tz: &Tz,
    events: &[Event],
    from: NaiveDate,
    to: NaiveDate,
) -> HashMap<NaiveDate, Vec<Event>> {
    let mut buckets: HashMap<NaiveDate, Vec<Event>> = HashMap::new();

    for event in events {
        let day = event.start_day_in(tz);
        if day >= from && day <= to {
            buckets.entry(day).or_default().push(event.clone());
        }
    }

    buckets
}

/// True if the cell belongs to `(year, month0)`.
pub fn in_month(date: NaiveDate, year: i32, month0: u32) -> bool {
    date.year() == year && date.month0() == month0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn event_at(id: &str, start: DateTime<Utc>) -> Event {
        Event {
            id: id.to_string(),
            ..Event::new(start)
        }
    }

    fn grid(
        year: i32,
        month: i32,
        events: &[Event],
        start: StartDayOfWeek,
        today: NaiveDate,
    ) -> MonthGrid {
        build_month_grid_in(&Utc, year, month, events, start, today).unwrap()
    }

    #[test]
    fn may_2025_sunday_start() {
        let g = grid(2025, 4, &[], StartDayOfWeek::Sunday, date(2025, 5, 7));

        assert_eq!((g.year, g.month), (2025, 4));
        assert_eq!(g.days.len(), GRID_CELLS);
        assert_eq!(g.days[0].date, date(2025, 4, 27));
        assert_eq!(g.days[0].date.weekday(), Weekday::Sun);
        assert_eq!(g.days[41].date, date(2025, 6, 7));

        let leading: Vec<_> = g.days[..4].iter().map(|d| d.is_current_month).collect();
        assert_eq!(leading, [false; 4]);
        assert!(g.days[4].is_current_month);
        assert_eq!(g.days[4].date, date(2025, 5, 1));

        let today: Vec<_> = g.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2025, 5, 7));
    }

    #[test]
    fn may_2025_monday_start() {
        let g = grid(2025, 4, &[], StartDayOfWeek::Monday, date(2025, 5, 7));

        // May 1st is a Thursday, three days after Monday
        assert_eq!(g.days[0].date, date(2025, 4, 28));
        assert_eq!(g.days[0].date.weekday(), Weekday::Mon);
        assert_eq!(g.days[3].date, date(2025, 5, 1));
        assert_eq!(g.days[41].date, date(2025, 6, 8));
    }

    #[test]
    fn every_month_is_42_contiguous_days_starting_on_the_row_weekday() {
        for year in [1900, 1999, 2000, 2024, 2025, 2100] {
            for month in 0..12 {
                for start in [StartDayOfWeek::Sunday, StartDayOfWeek::Monday] {
                    let g = grid(year, month, &[], start, date(2025, 1, 1));
                    assert_eq!(g.days.len(), GRID_CELLS);
                    assert_eq!(g.days[0].date.weekday(), start.weekday());

                    for pair in g.days.windows(2) {
                        assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
                    }

                    let current = g.days.iter().filter(|d| d.is_current_month).count();
                    let expected = days_in_month(year, month as u32).unwrap() as usize;
                    assert_eq!(current, expected);
                    assert!(g.days.iter().all(|d| {
                        d.is_current_month == in_month(d.date, year, month as u32)
                    }));
                }
            }
        }
    }

    #[test]
    fn month_starting_on_row_weekday_has_no_leading_days() {
        // June 1st 2025 is a Sunday
        let g = grid(2025, 5, &[], StartDayOfWeek::Sunday, date(2025, 1, 1));
        assert_eq!(g.days[0].date, date(2025, 6, 1));
        assert!(g.days[0].is_current_month);
        // 30 days + 12 days of July, so the last two rows are all July
        assert_eq!(g.days[41].date, date(2025, 7, 12));
        assert!(g.weeks().last().unwrap().iter().all(|d| !d.is_current_month));
    }

    #[test]
    fn month_overflow_normalizes() {
        let g = grid(2025, 12, &[], StartDayOfWeek::Sunday, date(2025, 1, 1));
        assert_eq!((g.year, g.month), (2026, 0));
        assert!(g.days.iter().any(|d| d.date == date(2026, 1, 1) && d.is_current_month));

        let g = grid(2025, -1, &[], StartDayOfWeek::Sunday, date(2025, 1, 1));
        assert_eq!((g.year, g.month), (2024, 11));
        assert_eq!(g.day(date(2024, 12, 25)).map(|d| d.is_current_month), Some(true));
    }

    #[test]
    fn unrepresentable_year_is_an_error() {
        let result = build_month_grid_in(
            &Utc,
            i32::MAX,
            0,
            &[],
            StartDayOfWeek::Sunday,
            date(2025, 1, 1),
        );
        assert!(matches!(result, Err(CalError::DateOutOfRange { .. })));
    }

    #[test]
    fn event_lands_only_on_its_start_date() {
        let events = vec![event_at(
            "e1",
            Utc.with_ymd_and_hms(2025, 5, 15, 9, 0, 0).unwrap(),
        )];
        let g = grid(2025, 4, &events, StartDayOfWeek::Sunday, date(2025, 5, 7));

        let holders: Vec<_> = g
            .days
            .iter()
            .filter(|d| d.events.iter().any(|e| e.id == "e1"))
            .collect();
        assert_eq!(holders.len(), 1);
        assert_eq!(holders[0].date, date(2025, 5, 15));
        assert_eq!(g.event_count(), 1);
    }

    #[test]
    fn events_keep_input_order_within_a_day() {
        let events = vec![
            event_at("late", Utc.with_ymd_and_hms(2025, 5, 15, 18, 0, 0).unwrap()),
            event_at("early", Utc.with_ymd_and_hms(2025, 5, 15, 8, 0, 0).unwrap()),
        ];
        let g = grid(2025, 4, &events, StartDayOfWeek::Sunday, date(2025, 5, 7));

        let ids: Vec<_> = g
            .day(date(2025, 5, 15))
            .unwrap()
            .events
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(ids, ["late", "early"]);
    }

    #[test]
    fn adjacent_month_cells_carry_their_events() {
        let events = vec![
            event_at("april", Utc.with_ymd_and_hms(2025, 4, 28, 12, 0, 0).unwrap()),
            event_at("june", Utc.with_ymd_and_hms(2025, 6, 8, 9, 0, 0).unwrap()),
            event_at("off-page", Utc.with_ymd_and_hms(2025, 6, 9, 9, 0, 0).unwrap()),
        ];
        let g = grid(2025, 4, &events, StartDayOfWeek::Monday, date(2025, 5, 7));

        let april = g.day(date(2025, 4, 28)).unwrap();
        assert!(!april.is_current_month);
        assert_eq!(april.events.len(), 1);

        let june = g.day(date(2025, 6, 8)).unwrap();
        assert!(!june.is_current_month);
        assert_eq!(june.events[0].id, "june");

        assert_eq!(g.event_count(), 2);
    }

    #[test]
    fn event_date_follows_the_given_zone() {
        // 23:30 UTC on the 15th is already the 16th two hours east
        let events = vec![event_at(
            "late",
            Utc.with_ymd_and_hms(2025, 5, 15, 23, 30, 0).unwrap(),
        )];
        let east = chrono::FixedOffset::east_opt(2 * 3600).unwrap();
        let g = build_month_grid_in(
            &east,
            2025,
            4,
            &events,
            StartDayOfWeek::Sunday,
            date(2025, 5, 7),
        )
        .unwrap();

        assert!(g.day(date(2025, 5, 15)).unwrap().events.is_empty());
        assert_eq!(g.day(date(2025, 5, 16)).unwrap().events.len(), 1);
    }

    #[test]
    fn today_in_adjacent_month_is_flagged() {
        let g = grid(2025, 4, &[], StartDayOfWeek::Sunday, date(2025, 6, 3));
        let today: Vec<_> = g.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].date, date(2025, 6, 3));
        assert!(!today[0].is_current_month);
    }

    #[test]
    fn today_off_page_is_not_flagged() {
        let g = grid(2025, 4, &[], StartDayOfWeek::Sunday, date(2025, 8, 1));
        assert!(g.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn building_twice_gives_equal_grids() {
        let events = vec![
            event_at("a", Utc.with_ymd_and_hms(2025, 5, 15, 9, 0, 0).unwrap()),
            event_at("b", Utc.with_ymd_and_hms(2025, 5, 2, 9, 0, 0).unwrap()),
        ];
        let first = grid(2025, 4, &events, StartDayOfWeek::Monday, date(2025, 5, 7));
        let second = grid(2025, 4, &events, StartDayOfWeek::Monday, date(2025, 5, 7));
        assert_eq!(first, second);
    }

    #[test]
    fn day_lookup_outside_page() {
        let g = grid(2025, 4, &[], StartDayOfWeek::Sunday, date(2025, 5, 7));
        assert!(g.day(date(2025, 4, 26)).is_none());
        assert!(g.day(date(2025, 6, 8)).is_none());
        assert_eq!(g.first_date(), Some(date(2025, 4, 27)));
        assert_eq!(g.last_date(), Some(date(2025, 6, 7)));
        assert_eq!(g.weeks().count(), 6);
    }
}
