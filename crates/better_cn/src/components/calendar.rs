//! Calendar month grid
//!
//! The grid is a Monday-start week layout: `offset` blank cells, then one cell
//! per day of the month. Days outside [`DateBounds`] are disabled.

use crate::datetime::{days_in_month, first_weekday_offset, CalendarDate};

/// Column headers for a Monday-start week
pub const WEEKDAY_LABELS: [&str; 7] = ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"];

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

/// Inclusive min/max selectable dates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateBounds {
    pub min: Option<CalendarDate>,
    pub max: Option<CalendarDate>,
}

impl DateBounds {
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    pub fn allows(&self, date: CalendarDate) -> bool {
        self.min.map_or(true, |min| date >= min) && self.max.map_or(true, |max| date <= max)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: CalendarDate,
    pub disabled: bool,
    pub selected: bool,
    pub today: bool,
}

impl CalendarCell {
    pub fn day(&self) -> u32 {
        self.date.day()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarGrid {
    /// Blank cells before day 1
    pub offset: u32,
    pub cells: Vec<CalendarCell>,
}

impl CalendarGrid {
    /// Cells grouped into rows of seven, `None` for leading and trailing blanks
    pub fn weeks(&self) -> Vec<[Option<CalendarCell>; 7]> {
        let leading = std::iter::repeat(None).take(self.offset as usize);
        let slots: Vec<Option<CalendarCell>> = leading.chain(self.cells.iter().copied().map(Some)).collect();
        slots
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

/// The month currently shown by a date picker
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Calendar {
    year: i32,
    month: u32,
    bounds: DateBounds,
    today: Option<CalendarDate>,
}

impl Calendar {
    /// View of `year`/zero-based `month`; an invalid month shows January
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: if month < 12 { month } else { 0 },
            bounds: DateBounds::default(),
            today: None,
        }
    }

    /// View of the month containing `date`
    pub fn showing(date: CalendarDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Host-supplied current date, highlighted in the grid
    pub fn today(mut self, today: CalendarDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn date_bounds(&self) -> DateBounds {
        self.bounds
    }

    pub fn current_date(&self) -> Option<CalendarDate> {
        self.today
    }

    /// "February 2024"
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month as usize], self.year)
    }

    pub fn show(&mut self, date: CalendarDate) {
        self.year = date.year();
        self.month = date.month();
    }

    pub fn previous_month(&mut self) {
        if self.month == 0 {
            self.month = 11;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 11 {
            self.month = 0;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    /// `day` of the shown month, if it exists
    pub fn date(&self, day: u32) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, day)
    }

    /// Whether `day` of the shown month can be picked
    pub fn is_selectable(&self, day: u32) -> bool {
        self.date(day).is_some_and(|date| self.bounds.allows(date))
    }

    pub fn grid(&self, selected: Option<CalendarDate>) -> CalendarGrid {
        let cells = (1..=days_in_month(self.year, self.month))
            .filter_map(|day| self.date(day))
            .map(|date| CalendarCell {
                date,
                disabled: !self.bounds.allows(date),
                selected: selected == Some(date),
                today: self.today == Some(date),
            })
            .collect();
        CalendarGrid {
            offset: first_weekday_offset(self.year, self.month),
            cells,
        }
    }
}
