//! TUI rendering traits for cutecal types.
//!
//! This module provides extension traits that add colored terminal rendering
//! to cutecal-core types using owo_colors.

use chrono::{Local, NaiveDate};
use cutecal_core::dates::month_label;
use cutecal_core::event::Event;
use cutecal_core::grid::{CalendarDay, MonthGrid};
use cutecal_core::settings::StartDayOfWeek;
use cutecal_core::views::{DayView, WeekView};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

/// Width of one month-grid cell, including the event marker.
const CELL_WIDTH: usize = 4;

impl Render for CalendarDay {
    fn render(&self) -> String {
        let marker = if self.events.is_empty() { ' ' } else { '•' };
        let text = format!("{:>3}{}", self.date.format("%-d"), marker);

        if self.is_today {
            text.reversed().bold().to_string()
        } else if !self.is_current_month {
            text.dimmed().to_string()
        } else if !self.events.is_empty() {
            text.cyan().to_string()
        } else {
            text
        }
    }
}

/// Extended rendering for MonthGrid, which needs the row layout to print
/// its weekday header.
pub trait MonthGridRender {
    fn render(&self, start_day_of_week: StartDayOfWeek) -> String;
}

impl MonthGridRender for MonthGrid {
    fn render(&self, start_day_of_week: StartDayOfWeek) -> String {
        let mut lines = Vec::new();

        let title = month_label(self.year, self.month);
        lines.push(format!("{:^width$}", title, width = CELL_WIDTH * 7).bold().to_string());

        let header: String = start_day_of_week
            .headers()
            .iter()
            .map(|h| format!("{:>3} ", h))
            .collect();
        lines.push(header.dimmed().to_string());

        for week in self.weeks() {
            let row: String = week.iter().map(|day| day.render()).collect();
            lines.push(row);
        }

        let in_month: Vec<&Event> = self
            .days
            .iter()
            .filter(|d| d.is_current_month)
            .flat_map(|d| d.events.iter())
            .collect();

        if !in_month.is_empty() {
            lines.push(String::new());
            for event in in_month {
                lines.push(format!(
                    "  {} {} {}",
                    format_day(event.start_day()).bold(),
                    format_time(event),
                    event
                ));
            }
        }

        lines.join("\n")
    }
}

impl Render for WeekView {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        for day in &self.days {
            let label = format_day(day.date);
            let label = if day.is_today {
                format!("{} (today)", label).bold().to_string()
            } else {
                label.bold().to_string()
            };
            lines.push(label);

            if day.events.is_empty() {
                lines.push(format!("  {}", "-".dimmed()));
            }
            for event in &day.events {
                lines.push(format!("  {} {}", format_time(event), event));
            }
        }

        lines.join("\n")
    }
}

impl Render for DayView {
    fn render(&self) -> String {
        let mut lines = vec![self.date.format("%A, %B %-d, %Y").to_string().bold().to_string()];

        for event in &self.all_day {
            lines.push(format!("  {} {}", format_time(event), event));
        }

        for slot in self.time_slots.iter().filter(|s| !s.events.is_empty()) {
            for event in &slot.events {
                lines.push(format!("  {} {}", format_time(event), event));
            }
        }

        if lines.len() == 1 {
            lines.push(format!("  {}", "No events".dimmed()));
        }

        lines.join("\n")
    }
}

impl Render for Event {
    fn render(&self) -> String {
        format!("{} {} {}", format_time(self), self, self.id.dimmed())
    }
}

/// Short day label, e.g. "Thu May 15"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%a %b %-d").to_string()
}

/// Start time in local time, right-aligned, or "all-day".
pub fn format_time(event: &Event) -> String {
    if event.is_all_day {
        return format!("{:>7}", "all-day");
    }
    format!("{:>7}", event.start_date.with_timezone(&Local).format("%H:%M"))
}
