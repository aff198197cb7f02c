//! Calendar-date helpers shared by the grid builders, storage queries and CLI.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::fmt::Display;

/// Predefined category colors, in the order they are offered to the user.
pub const CATEGORY_COLORS: [&str; 10] = [
    "#4285F4", // Blue
    "#EA4335", // Red
    "#FBBC05", // Yellow
    "#34A853", // Green
    "#9C27B0", // Purple
    "#FF9800", // Orange
    "#00BCD4", // Cyan
    "#795548", // Brown
    "#607D8B", // Blue Grey
    "#E91E63", // Pink
];

/// Normalize a (year, 0-based month) pair where the month may overflow in
/// either direction. `(2025, 12)` becomes `(2026, 0)`, `(2025, -1)` becomes
/// `(2024, 11)`.
///
/// Returns None if the resulting year does not fit in an `i32`.
pub fn normalize_month(year: i32, month: i32) -> Option<(i32, u32)> {
    let total = i64::from(year) * 12 + i64::from(month);
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32;
    Some((year, month))
}

/// First day of a (normalized, 0-based) month.
pub fn first_of_month(year: i32, month0: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
}

/// Number of days in a (normalized, 0-based) month.
pub fn days_in_month(year: i32, month0: u32) -> Option<u32> {
    let first = first_of_month(year, month0)?;
    let (next_year, next_month) = normalize_month(year, month0 as i32 + 1)?;
    let next = first_of_month(next_year, next_month)?;
    Some((next - first).num_days() as u32)
}

/// True if both instants fall on the same calendar date in their own zones.
pub fn is_same_day<A: TimeZone, B: TimeZone>(a: &DateTime<A>, b: &DateTime<B>) -> bool {
    a.date_naive() == b.date_naive()
}

/// Midnight at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// The last millisecond of `date` (23:59:59.999).
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| start_of_day(date))
}

/// Format an instant for display, e.g. "May 15, 2025" or "May 15, 2025, 09:00".
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>, include_time: bool) -> String
where
    Tz::Offset: Display,
{
    if include_time {
        dt.format("%b %-d, %Y, %H:%M").to_string()
    } else {
        dt.format("%b %-d, %Y").to_string()
    }
}

/// Month label for headers, e.g. "May 2025".
pub fn month_label(year: i32, month0: u32) -> String {
    match first_of_month(year, month0) {
        Some(first) => format!("{} {}", first.format("%B"), first.year()),
        None => format!("{}-{:02}", year, month0 + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn normalize_month_wraps_forward_and_backward() {
        assert_eq!(normalize_month(2025, 4), Some((2025, 4)));
        assert_eq!(normalize_month(2025, 12), Some((2026, 0)));
        assert_eq!(normalize_month(2025, 25), Some((2027, 1)));
        assert_eq!(normalize_month(2025, -1), Some((2024, 11)));
        assert_eq!(normalize_month(2025, -13), Some((2023, 11)));
    }

    #[test]
    fn normalize_month_rejects_year_overflow() {
        assert_eq!(normalize_month(i32::MAX, 12), None);
        assert_eq!(normalize_month(i32::MIN, -1), None);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1), Some(29));
        assert_eq!(days_in_month(2025, 1), Some(28));
        assert_eq!(days_in_month(2025, 11), Some(31));
        assert_eq!(days_in_month(1900, 1), Some(28));
        assert_eq!(days_in_month(2000, 1), Some(29));
    }

    #[test]
    fn same_day_ignores_time_of_day() {
        let a = Utc.with_ymd_and_hms(2025, 5, 15, 0, 0, 1).unwrap();
        let b = Utc.with_ymd_and_hms(2025, 5, 15, 23, 59, 59).unwrap();
        let c = Utc.with_ymd_and_hms(2025, 5, 16, 0, 0, 0).unwrap();
        assert!(is_same_day(&a, &b));
        assert!(!is_same_day(&b, &c));
    }

    #[test]
    fn same_day_uses_each_instants_own_zone() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let utc = Utc.with_ymd_and_hms(2025, 5, 15, 20, 0, 0).unwrap();
        let local = utc.with_timezone(&tokyo);
        assert!(!is_same_day(&utc, &local));
    }

    #[test]
    fn day_bounds() {
        let date = NaiveDate::from_ymd_opt(2025, 5, 15).unwrap();
        assert_eq!(start_of_day(date).to_string(), "2025-05-15 00:00:00");
        assert_eq!(end_of_day(date).to_string(), "2025-05-15 23:59:59.999");
    }

    #[test]
    fn format_date_with_and_without_time() {
        let dt = Utc.with_ymd_and_hms(2025, 5, 15, 9, 5, 0).unwrap();
        assert_eq!(format_date(&dt, false), "May 15, 2025");
        assert_eq!(format_date(&dt, true), "May 15, 2025, 09:05");
    }

    #[test]
    fn category_colors_are_distinct_hex() {
        for color in CATEGORY_COLORS {
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
        let unique: std::collections::HashSet<_> = CATEGORY_COLORS.iter().collect();
        assert_eq!(unique.len(), CATEGORY_COLORS.len());
    }

    #[test]
    fn month_labels() {
        assert_eq!(month_label(2025, 4), "May 2025");
        assert_eq!(month_label(2026, 0), "January 2026");
    }
}
