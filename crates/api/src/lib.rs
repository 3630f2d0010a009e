// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Use cases of the booking site.
//!
//! Every operation takes the persistence layer explicitly and returns
//! API-level errors; HTTP concerns stay in the server crate.

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod availability;
mod calendar;
mod error;
mod notifications;
mod request_response;
mod reservations;

#[cfg(test)]
mod tests;

pub use auth::{ADMIN_ACCESS_LEVEL, AuthenticatedUser, AuthenticationService};
pub use availability::{check_availability, search_availability};
pub use calendar::{CalendarMonth, apply_calendar_edits, build_calendar};
pub use error::{ApiError, AuthError, translate_domain_error};
pub use notifications::{
    DEFAULT_MAIL_FROM, DEFAULT_OWNER_EMAIL, MailMessage, MailSettings, reservation_notifications,
};
pub use request_response::{
    AvailabilityResponse, BungalowInfo, CalendarEditRequest, CalendarRowView, DayRefRequest,
    ReconcileReport, ReservationSummary, ReservationView,
};
pub use reservations::{
    ReservationFilter, delete_reservation, finalize_reservation, get_bungalow, get_reservation,
    list_reservations, mark_processed, update_reservation,
};
