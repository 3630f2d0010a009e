// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod calendar;
mod dates;
mod draft;
mod error;
mod reconciliation;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use calendar::{BungalowMonth, DayStateMap, build_bungalow_month};
pub use dates::{DateRange, YearMonth, format_iso_date, parse_iso_date};
pub use draft::{DraftStage, ReservationDraft};
pub use error::DomainError;
pub use reconciliation::{BlockOperation, BlockSnapshot, CalendarSubmission, DayRef, reconcile};
pub use types::{
    Bungalow, BungalowRestriction, ContactDetails, NewReservation, Reservation,
    ReservationStatus, RestrictionKind, parse_bungalow_id,
};
pub use validation::{
    FormErrors, MIN_FULL_NAME_LENGTH, is_valid_email, validate_contact_details, validate_login,
};
