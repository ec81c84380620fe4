//! Month arithmetic for the calendar grid.
//!
//! Months are zero-indexed (0 = January) throughout, matching how stored
//! events record them. Weekdays are numbered from Sunday.

use chrono::{Datelike, Duration, NaiveDate};

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a zero-indexed month of the proleptic Gregorian calendar.
pub fn days_in_month(month: u32, year: i32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Weekday (0 = Sunday) on which the first day of the month falls.
pub fn first_weekday_offset(month: u32, year: i32) -> u32 {
    NaiveDate::from_ymd_opt(year, month + 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

/// The month/year pair the calendar is showing.
///
/// Only ever moves one month at a time so `month` stays within 0..=11.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub month: u32,
    pub year: i32,
}

impl MonthCursor {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month: month.min(11),
            year,
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            month: date.month0(),
            year: date.year(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 11 {
            Self {
                month: 0,
                year: self.year + 1,
            }
        } else {
            Self {
                month: self.month + 1,
                year: self.year,
            }
        }
    }

    pub fn prev(self) -> Self {
        if self.month == 0 {
            Self {
                month: 11,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }

    pub fn days(&self) -> u32 {
        days_in_month(self.month, self.year)
    }

    pub fn first_weekday(&self) -> u32 {
        first_weekday_offset(self.month, self.year)
    }

    pub fn name(&self) -> &'static str {
        MONTH_NAMES[self.month as usize % 12]
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month + 1, day)
    }
}

/// Leading blanks followed by the numbered days of one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGrid {
    pub offset: u32,
    pub days: u32,
    pub cells: Vec<Option<u32>>,
}

impl DayGrid {
    pub fn new(cursor: MonthCursor) -> Self {
        let offset = cursor.first_weekday();
        let days = cursor.days();

        let mut cells = Vec::with_capacity((offset + days) as usize);
        cells.extend((0..offset).map(|_| None));
        cells.extend((1..=days).map(Some));

        Self {
            offset,
            days,
            cells,
        }
    }

    /// Cells chunked into Sunday-first rows; the last row may be short.
    pub fn weeks(&self) -> impl Iterator<Item = &[Option<u32>]> {
        self.cells.chunks(7)
    }
}

/// The Sunday-to-Saturday week containing `date`.
pub fn week_of(date: NaiveDate) -> [NaiveDate; 7] {
    let start = date - Duration::days(date.weekday().num_days_from_sunday() as i64);
    std::array::from_fn(|i| start + Duration::days(i as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_in_month_leap_years() {
        assert_eq!(days_in_month(1, 2024), 29);
        assert_eq!(days_in_month(1, 2023), 28);
        assert_eq!(days_in_month(1, 2000), 29);
        assert_eq!(days_in_month(1, 1900), 28);
    }

    #[test]
    fn test_days_in_month_matches_chrono_for_every_month() {
        for year in [1899, 1900, 1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
                let next = if month == 11 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
                } else {
                    NaiveDate::from_ymd_opt(year, month + 2, 1).unwrap()
                };
                let expected = next.signed_duration_since(first).num_days() as u32;
                assert_eq!(days_in_month(month, year), expected, "{}/{}", month, year);
            }
        }
    }

    #[test]
    fn test_first_weekday_offset() {
        // 2024-01-01 was a Monday
        assert_eq!(first_weekday_offset(0, 2024), 1);
        // 2024-09-01 was a Sunday
        assert_eq!(first_weekday_offset(8, 2024), 0);
        // 2023-07-01 was a Saturday
        assert_eq!(first_weekday_offset(6, 2023), 6);
    }

    #[test]
    fn test_month_cursor_rollover() {
        let dec = MonthCursor::new(11, 2024);
        assert_eq!(dec.next(), MonthCursor::new(0, 2025));

        let jan = MonthCursor::new(0, 2024);
        assert_eq!(jan.prev(), MonthCursor::new(11, 2023));
    }

    #[test]
    fn test_twelve_steps_advance_one_year() {
        for month in 0..12 {
            let start = MonthCursor::new(month, 2024);
            let mut cursor = start;
            for _ in 0..12 {
                cursor = cursor.next();
            }
            assert_eq!(cursor, MonthCursor::new(month, 2025));

            for _ in 0..12 {
                cursor = cursor.prev();
            }
            assert_eq!(cursor, start);
            assert_eq!(start.next().prev(), start);
        }
    }

    #[test]
    fn test_day_grid_padding() {
        let grid = DayGrid::new(MonthCursor::new(1, 2024));
        assert_eq!(grid.offset, 4); // Thursday
        assert_eq!(grid.days, 29);
        assert_eq!(grid.cells.len(), 33);
        assert!(grid.cells[..4].iter().all(Option::is_none));
        assert_eq!(grid.cells[4], Some(1));
        assert_eq!(grid.cells.last(), Some(&Some(29)));
        assert_eq!(grid.weeks().count(), 5);
    }

    #[test]
    fn test_week_of_starts_on_sunday() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 15).unwrap(); // Thursday
        let week = week_of(date);
        assert_eq!(week[0], NaiveDate::from_ymd_opt(2024, 8, 11).unwrap());
        assert_eq!(week[6], NaiveDate::from_ymd_opt(2024, 8, 17).unwrap());
        assert!(week.contains(&date));
    }
}
