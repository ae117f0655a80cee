//! Date and time value formatting
//!
//! Canonical string forms:
//!
//! | value     | format             |
//! |-----------|--------------------|
//! | date      | `YYYY-MM-DD`       |
//! | time      | `HH:MM`            |
//! | date-time | `YYYY-MM-DDTHH:MM` |
//!
//! Months are zero-based grid coordinates (`0` = January) everywhere except in
//! the formatted strings. Parsing is strict: anything that is not exactly one
//! of the forms above, or that names a day outside its month, parses to `None`.
//! Supported years are `1..=9999`.

use std::fmt;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Proleptic Gregorian leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Days in a zero-based month; `0` for a month outside `0..12`
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match DAYS_IN_MONTH.get(month as usize) {
        Some(28) if is_leap_year(year) => 29,
        Some(&days) => days,
        None => 0,
    }
}

/// Day of week with Sunday = 0
fn weekday_sunday_based(year: i32, month: u32, day: u32) -> u32 {
    // Sakamoto
    const T: [i32; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 2 { year - 1 } else { year };
    let m = T[month as usize % 12];
    (y + y / 4 - y / 100 + y / 400 + m + day as i32).rem_euclid(7) as u32
}

/// Leading blank cells before the first of the month in a Monday-start week
pub fn first_weekday_offset(year: i32, month: u32) -> u32 {
    match weekday_sunday_based(year, month, 1) {
        0 => 6,
        day => day - 1,
    }
}

// =============================================================================
// VALUES
// =============================================================================

/// A valid calendar day
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

impl CalendarDate {
    /// `month` is zero-based, `day` one-based
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || day == 0 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Monday = 0 .. Sunday = 6
    pub fn weekday(&self) -> u32 {
        (weekday_sunday_based(self.year, self.month, self.day) + 6) % 7
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month + 1, self.day)
    }
}

/// A valid wall-clock time with minute precision
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u32,
    minute: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn with_hour(self, hour: u32) -> Option<Self> {
        Self::new(hour, self.minute)
    }

    pub fn with_minute(self, minute: u32) -> Option<Self> {
        Self::new(self.hour, minute)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    pub date: CalendarDate,
    pub time: ClockTime,
}

impl DateTime {
    pub fn new(date: CalendarDate, time: ClockTime) -> Self {
        Self { date, time }
    }

    /// Replace the date, keeping the time
    pub fn with_date(self, date: CalendarDate) -> Self {
        Self { date, ..self }
    }

    /// Replace the hour, keeping date and minute
    pub fn with_hour(self, hour: u32) -> Option<Self> {
        Some(Self {
            time: self.time.with_hour(hour)?,
            ..self
        })
    }

    /// Replace the minute, keeping date and hour
    pub fn with_minute(self, minute: u32) -> Option<Self> {
        Some(Self {
            time: self.time.with_minute(minute)?,
            ..self
        })
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)
    }
}

// =============================================================================
// FORMAT / PARSE
// =============================================================================

pub fn format_date(date: CalendarDate) -> String {
    date.to_string()
}

pub fn format_time(time: ClockTime) -> String {
    time.to_string()
}

pub fn format_date_time(value: DateTime) -> String {
    value.to_string()
}

/// Exactly `len` ASCII digits
fn digits(s: &str, len: usize) -> Option<u32> {
    if s.len() != len || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

pub fn parse_date(s: &str) -> Option<CalendarDate> {
    let mut parts = s.split('-');
    let year = digits(parts.next()?, 4)?;
    let month = digits(parts.next()?, 2)?;
    let day = digits(parts.next()?, 2)?;
    if parts.next().is_some() || month == 0 {
        return None;
    }
    CalendarDate::new(year as i32, month - 1, day)
}

pub fn parse_time(s: &str) -> Option<ClockTime> {
    let (hour, minute) = s.split_once(':')?;
    ClockTime::new(digits(hour, 2)?, digits(minute, 2)?)
}

pub fn parse_date_time(s: &str) -> Option<DateTime> {
    let (date, time) = s.split_once('T')?;
    Some(DateTime::new(parse_date(date)?, parse_time(time)?))
}

// =============================================================================
// RECOMBINATION
// =============================================================================

/// Put `date` into a date-time string, keeping its time (`00:00` if unparseable)
pub fn with_date(value: &str, date: CalendarDate) -> String {
    let time = parse_date_time(value).map(|v| v.time).unwrap_or_default();
    format_date_time(DateTime::new(date, time))
}

/// Put `hour` into a date-time string; `None` if the string or hour is invalid
pub fn with_hour(value: &str, hour: u32) -> Option<String> {
    parse_date_time(value)?.with_hour(hour).map(format_date_time)
}

/// Put `minute` into a date-time string; `None` if the string or minute is invalid
pub fn with_minute(value: &str, minute: u32) -> Option<String> {
    parse_date_time(value)?.with_minute(minute).map(format_date_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use proptest::prelude::*;

    fn reference_days(year: i32, month: u32) -> u32 {
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
        let next = if month == 11 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
        } else {
            NaiveDate::from_ymd_opt(year, month + 2, 1).unwrap()
        };
        next.signed_duration_since(first).num_days() as u32
    }

    #[test]
    fn test_leap_februaries() {
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(2023, 12), 0);
    }

    #[test]
    fn test_days_in_month_matches_reference_calendar() {
        for year in (1..=2500).chain([9998]) {
            for month in 0..12 {
                assert_eq!(days_in_month(year, month), reference_days(year, month), "{year}-{month}");
            }
        }
    }

    #[test]
    fn test_first_weekday_offset_matches_reference_calendar() {
        for year in [1, 1900, 1970, 2000, 2023, 2024, 2100, 9999] {
            for month in 0..12 {
                let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
                let expected = first.weekday().num_days_from_monday();
                assert_eq!(first_weekday_offset(year, month), expected, "{year}-{month}");
            }
        }
        // 2024-02-01 was a Thursday
        assert_eq!(first_weekday_offset(2024, 1), 3);
        // 2023-10-01 was a Sunday
        assert_eq!(first_weekday_offset(2023, 9), 6);
    }

    #[test]
    fn test_formatting_pads() {
        let date = CalendarDate::new(7, 0, 5).unwrap();
        assert_eq!(format_date(date), "0007-01-05");
        let time = ClockTime::new(9, 3).unwrap();
        assert_eq!(format_time(time), "09:03");
        assert_eq!(format_date_time(DateTime::new(date, time)), "0007-01-05T09:03");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for input in [
            "",
            "2024-1-05",
            "2024-01-5",
            "2024-13-01",
            "2024-00-10",
            "2023-02-29",
            "0000-01-01",
            "2024-01-01-",
            "+024-01-01",
            "２０２４-01-01",
            "2024/01/01",
        ] {
            assert_eq!(parse_date(input), None, "{input:?}");
        }
        for input in ["24:00", "12:60", "1:30", "12-30", "12:30:00", ""] {
            assert_eq!(parse_time(input), None, "{input:?}");
        }
        assert_eq!(parse_date_time("2024-01-15 10:30"), None);
        assert_eq!(parse_date_time("2024-01-15T"), None);
    }

    #[test]
    fn test_parse_valid() {
        let date = parse_date("2024-02-29").unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2024, 1, 29));
        assert_eq!(date.weekday(), 3);
        let value = parse_date_time("2024-01-15T10:30").unwrap();
        assert_eq!(value.time.hour(), 10);
        assert_eq!(value.time.minute(), 30);
    }

    #[test]
    fn test_recombine_keeps_other_half() {
        assert_eq!(with_hour("2024-01-15T10:30", 14).as_deref(), Some("2024-01-15T14:30"));
        assert_eq!(with_minute("2024-01-15T10:30", 5).as_deref(), Some("2024-01-15T10:05"));
        let date = CalendarDate::new(2024, 2, 1).unwrap();
        assert_eq!(with_date("2024-01-15T10:30", date), "2024-03-01T10:30");
        assert_eq!(with_date("", date), "2024-03-01T00:00");
        assert_eq!(with_hour("garbage", 14), None);
        assert_eq!(with_hour("2024-01-15T10:30", 24), None);
    }

    proptest! {
        #[test]
        fn test_date_round_trip(year in 1i32..=9999, month in 0u32..12, day in 1u32..=31) {
            prop_assume!(day <= days_in_month(year, month));
            let s = format!("{:04}-{:02}-{:02}", year, month + 1, day);
            let parsed = parse_date(&s).unwrap();
            prop_assert_eq!(format_date(parsed), s);
        }

        #[test]
        fn test_parse_never_panics(s in "\\PC{0,20}") {
            let _ = parse_date(&s);
            let _ = parse_time(&s);
            let _ = parse_date_time(&s);
        }
    }
}
