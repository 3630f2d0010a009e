// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur while building or validating domain values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// The end of a date range lies before its start.
    InvalidDateRange {
        /// The requested first day.
        start: Date,
        /// The requested last day.
        end: Date,
    },
    /// A year/month pair does not name a calendar month.
    InvalidYearMonth {
        /// The requested year.
        year: i32,
        /// The requested month number.
        month: u8,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A bungalow identifier could not be parsed or is not positive.
    InvalidBungalowId(String),
    /// A stored restriction kind identifier is unknown.
    InvalidRestrictionKind(i32),
    /// A stored reservation status value is unknown.
    InvalidReservationStatus(i32),
    /// A restriction's reservation link does not match its kind.
    InconsistentRestriction {
        /// The restriction identifier.
        restriction_id: i64,
    },
    /// A calendar edit names a day or bungalow the edited month does not show.
    DayOutsideCalendar {
        /// The bungalow of the edit.
        bungalow_id: i64,
        /// The day of the edit.
        date: Date,
    },
    /// The reservation draft is missing a step required for the operation.
    DraftIncomplete {
        /// The missing piece of the draft.
        missing: &'static str,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "End date {end} is before start date {start}")
            }
            Self::InvalidYearMonth { year, month } => {
                write!(f, "Invalid calendar month {year}-{month}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::InvalidBungalowId(value) => write!(f, "Invalid bungalow id: '{value}'"),
            Self::InvalidRestrictionKind(id) => write!(f, "Unknown restriction kind {id}"),
            Self::InvalidReservationStatus(value) => {
                write!(f, "Unknown reservation status {value}")
            }
            Self::InconsistentRestriction { restriction_id } => {
                write!(
                    f,
                    "Restriction {restriction_id} has a reservation link that does not match its kind"
                )
            }
            Self::DayOutsideCalendar { bungalow_id, date } => {
                write!(
                    f,
                    "Bungalow {bungalow_id} on {date} is not part of the edited calendar"
                )
            }
            Self::DraftIncomplete { missing } => {
                write!(f, "Reservation draft is incomplete: missing {missing}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
