// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, Month};

/// Wire and storage format for calendar days.
const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a `YYYY-MM-DD` calendar day.
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the input is not a valid day.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), ISO_DATE).map_err(|e| DomainError::DateParseError {
        date_string: value.to_string(),
        error: e.to_string(),
    })
}

/// Formats a day as `YYYY-MM-DD`.
#[must_use]
pub fn format_iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// An inclusive range of calendar days with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: Date,
    end: Date,
}

impl DateRange {
    /// Creates a new range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `end` is before `start`.
    pub const fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if end.to_julian_day() < start.to_julian_day() {
            return Err(DomainError::InvalidDateRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses a range from two `YYYY-MM-DD` strings.
    ///
    /// # Errors
    ///
    /// Returns an error if either day fails to parse or the range is inverted.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start: Date = parse_iso_date(start)?;
        let end: Date = parse_iso_date(end)?;
        Self::new(start, end)
    }

    /// A range covering `start` and the following day.
    ///
    /// Owner blocks are stored this way.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` at the end of the calendar.
    pub fn one_day_block(start: Date) -> Result<Self, DomainError> {
        let end: Date = start
            .next_day()
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: format!("computing the day after {start}"),
            })?;
        Ok(Self { start, end })
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Whether two ranges share at least one day.
    ///
    /// Both ends are inclusive, so a range ending on the day another starts
    /// overlaps it.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && self.end >= other.start
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// Iterates every day from `start` to `end` inclusive.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        let end: Date = self.end;
        std::iter::successors(Some(self.start), move |day| {
            day.next_day().filter(|next| *next <= end)
        })
    }
}

/// A calendar month, used to address the admin reservation calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    first: Date,
    last: Date,
}

impl YearMonth {
    /// Creates the month `month` (1-12) of `year`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidYearMonth` if the pair names no month.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidYearMonth { year, month };
        let month_value: Month = Month::try_from(month).map_err(|_| invalid())?;
        let first: Date =
            Date::from_calendar_date(year, month_value, 1).map_err(|_| invalid())?;
        let last: Date = month_days(first).last().unwrap_or(first);
        Ok(Self { first, last })
    }

    /// The month containing `date`.
    ///
    /// # Errors
    ///
    /// Returns an error only for days outside the supported calendar.
    pub fn containing(date: Date) -> Result<Self, DomainError> {
        Self::new(date.year(), u8::from(date.month()))
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.first.year()
    }

    #[must_use]
    pub const fn month(&self) -> u8 {
        self.first.month() as u8
    }

    #[must_use]
    pub const fn first_day(&self) -> Date {
        self.first
    }

    #[must_use]
    pub const fn last_day(&self) -> Date {
        self.last
    }

    #[must_use]
    pub const fn days_in_month(&self) -> u8 {
        self.last.day()
    }

    /// The whole month as an inclusive date range.
    #[must_use]
    pub const fn range(&self) -> DateRange {
        DateRange {
            start: self.first,
            end: self.last,
        }
    }

    /// Every day of the month in order.
    pub fn days(&self) -> impl Iterator<Item = Date> {
        month_days(self.first)
    }

    /// The following month, if the calendar has one.
    #[must_use]
    pub fn next(&self) -> Option<Self> {
        self.last
            .next_day()
            .and_then(|day| Self::containing(day).ok())
    }

    /// The preceding month, if the calendar has one.
    #[must_use]
    pub fn previous(&self) -> Option<Self> {
        self.first
            .previous_day()
            .and_then(|day| Self::containing(day).ok())
    }
}

fn month_days(first: Date) -> impl Iterator<Item = Date> {
    std::iter::successors(Some(first), |day| {
        day.next_day().filter(|next| next.month() == day.month())
    })
}
