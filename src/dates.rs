// Date handling for availability queries: the requested window, the
// first-of-month anchors the availability API requires, and ISO parsing.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
pub const LONG_DATE_FORMAT: &str = "%a %b %d, %Y";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Empty date window: {start} is not before {end}")]
    EmptyWindow { start: NaiveDate, end: NaiveDate },
}

/// The `[start, end)` span a search asks about. `end` is the departure day,
/// so the last night checked is `end - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateError> {
        if start >= end {
            return Err(DateError::EmptyWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Number of nights in the window, always at least 1.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// First-of-month anchors for every month touched by `[start, end]`.
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        month_starts(self.start, self.end)
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    // day 1 exists in every month
    date.with_day(1).unwrap_or(date)
}

pub fn is_month_start(date: NaiveDate) -> bool {
    date.day() == 1
}

/// Enumerate the first day of each month from `start`'s month up to and
/// including `end`'s month.
pub fn month_starts(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut months = Vec::new();
    let mut current = first_of_month(start);

    while current <= end {
        months.push(current);
        match current.checked_add_months(Months::new(1)) {
            Some(next) => current = next,
            None => break,
        }
    }

    months
}

/// Parse an ISO calendar date. Timestamps such as `2023-07-01T00:00:00Z`
/// (the availability API's key format) are accepted and truncated to the date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, DateError> {
    let day = value.split('T').next().unwrap_or(value).trim();
    NaiveDate::parse_from_str(day, ISO_DATE_FORMAT)
        .map_err(|_| DateError::InvalidDate(value.to_string()))
}

pub fn format_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

pub fn format_long(date: NaiveDate) -> String {
    date.format(LONG_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_rejects_empty_span() {
        let day = date(2023, 7, 1);
        assert_eq!(
            DateWindow::new(day, day),
            Err(DateError::EmptyWindow { start: day, end: day })
        );
        assert!(DateWindow::new(date(2023, 7, 2), day).is_err());
    }

    #[test]
    fn test_window_is_half_open() {
        let window = DateWindow::new(date(2023, 7, 1), date(2023, 7, 10)).unwrap();
        assert_eq!(window.num_days(), 9);
        assert!(window.contains(date(2023, 7, 1)));
        assert!(window.contains(date(2023, 7, 9)));
        assert!(!window.contains(date(2023, 7, 10)));
        assert!(!window.contains(date(2023, 6, 30)));
    }

    #[test_case(date(2023, 7, 5), date(2023, 7, 20), vec![date(2023, 7, 1)]; "single month")]
    #[test_case(date(2023, 7, 25), date(2023, 8, 3), vec![date(2023, 7, 1), date(2023, 8, 1)]; "partial months at both ends")]
    #[test_case(date(2023, 12, 28), date(2024, 1, 2), vec![date(2023, 12, 1), date(2024, 1, 1)]; "year boundary")]
    #[test_case(date(2023, 7, 10), date(2023, 8, 1), vec![date(2023, 7, 1), date(2023, 8, 1)]; "end on first of month is inclusive")]
    fn test_month_starts(start: NaiveDate, end: NaiveDate, expected: Vec<NaiveDate>) {
        assert_eq!(month_starts(start, end), expected);
        assert!(month_starts(start, end).into_iter().all(is_month_start));
    }

    #[test_case("2023-07-01", date(2023, 7, 1); "plain date")]
    #[test_case("2023-07-01T00:00:00Z", date(2023, 7, 1); "api timestamp")]
    #[test_case("2024-02-29T00:00:00.000Z", date(2024, 2, 29); "leap day with millis")]
    fn test_parse_iso_date(input: &str, expected: NaiveDate) {
        assert_eq!(parse_iso_date(input), Ok(expected));
    }

    #[test]
    fn test_parse_iso_date_rejects_garbage() {
        assert!(matches!(
            parse_iso_date("07/01/2023"),
            Err(DateError::InvalidDate(_))
        ));
        assert!(parse_iso_date("2023-02-30").is_err());
    }

    #[test]
    fn test_long_format() {
        assert_eq!(format_long(date(2023, 7, 1)), "Sat Jul 01, 2023");
        assert_eq!(format_iso(date(2023, 7, 1)), "2023-07-01");
    }
}
