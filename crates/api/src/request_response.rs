// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use bungalow_bliss_domain::{
    Bungalow, BungalowMonth, CalendarSubmission, DayRef, DayStateMap, Reservation,
    ReservationStatus, YearMonth, format_iso_date, parse_iso_date,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{ApiError, translate_domain_error};

/// Availability answer for one bungalow, as returned to the booking page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Whether the bungalow is free for the whole range.
    pub ok: bool,
    /// Error text; empty on success.
    pub message: String,
    pub bungalow_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityResponse {
    /// A failed check carrying only a message.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            bungalow_id: String::new(),
            start_date: String::new(),
            end_date: String::new(),
        }
    }
}

/// A bungalow as shown on public pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BungalowInfo {
    pub id: i64,
    pub name: String,
}

impl From<&Bungalow> for BungalowInfo {
    fn from(bungalow: &Bungalow) -> Self {
        Self {
            id: bungalow.id,
            name: bungalow.name.clone(),
        }
    }
}

/// What the guest sees after booking; kept in the session for one page view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationSummary {
    pub reservation_id: i64,
    pub bungalow_id: i64,
    pub bungalow_name: String,
    pub start_date: String,
    pub end_date: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

/// A reservation as listed and shown in the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    pub id: i64,
    pub bungalow_id: i64,
    pub bungalow_name: String,
    pub start_date: String,
    pub end_date: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub processed: bool,
}

impl From<&Reservation> for ReservationView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id,
            bungalow_id: reservation.bungalow_id,
            bungalow_name: reservation.bungalow_name.clone(),
            start_date: format_iso_date(reservation.range.start()),
            end_date: format_iso_date(reservation.range.end()),
            full_name: reservation.contact.full_name.clone(),
            email: reservation.contact.email.clone(),
            phone: reservation.contact.phone.clone(),
            processed: reservation.status == ReservationStatus::Processed,
        }
    }
}

/// One bungalow row of the admin calendar, keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarRowView {
    pub bungalow_id: i64,
    pub bungalow_name: String,
    pub reservation_map: BTreeMap<String, i64>,
    pub block_map: BTreeMap<String, i64>,
}

impl CalendarRowView {
    #[must_use]
    pub fn new(bungalow: &Bungalow, month: &BungalowMonth) -> Self {
        Self {
            bungalow_id: bungalow.id,
            bungalow_name: bungalow.name.clone(),
            reservation_map: day_keys(&month.reservation_map),
            block_map: day_keys(&month.block_map),
        }
    }
}

fn day_keys(map: &DayStateMap) -> BTreeMap<String, i64> {
    map.iter()
        .map(|(day, tag)| (format_iso_date(day), tag))
        .collect()
}

/// A single bungalow-day in a calendar edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRefRequest {
    pub bungalow_id: i64,
    /// The day as `YYYY-MM-DD`.
    pub date: String,
}

/// The admin's calendar edits for one month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEditRequest {
    pub year: i32,
    pub month: u8,
    /// Blocked days that stay blocked.
    #[serde(default)]
    pub keep_blocks: Vec<DayRefRequest>,
    /// Days to block.
    #[serde(default)]
    pub add_blocks: Vec<DayRefRequest>,
}

impl CalendarEditRequest {
    /// The month the edits apply to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if `year`/`month` name no month.
    pub fn target_month(&self) -> Result<YearMonth, ApiError> {
        YearMonth::new(self.year, self.month).map_err(translate_domain_error)
    }

    /// Parses the edits into a submission.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if any day fails to parse; nothing is
    /// applied in that case.
    pub fn to_submission(&self) -> Result<CalendarSubmission, ApiError> {
        let parse = |entry: &DayRefRequest| -> Result<DayRef, ApiError> {
            let date = parse_iso_date(&entry.date).map_err(translate_domain_error)?;
            Ok(DayRef::new(entry.bungalow_id, date))
        };

        Ok(CalendarSubmission {
            keep_blocks: self.keep_blocks.iter().map(parse).collect::<Result<_, _>>()?,
            add_blocks: self.add_blocks.iter().map(parse).collect::<Result<_, _>>()?,
        })
    }
}

/// Outcome of applying calendar edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub deleted: usize,
    pub failed: usize,
}
