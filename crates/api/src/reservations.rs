// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storing guest reservations and managing them from the dashboard.

use bungalow_bliss_domain::{
    Bungalow, ContactDetails, NewReservation, Reservation, ReservationDraft, ReservationStatus,
    format_iso_date,
};
use bungalow_bliss_persistence::Persistence;
use tracing::info;

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{ReservationSummary, ReservationView};

/// Which reservations a dashboard list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservationFilter {
    /// Only reservations that have not been processed.
    New,
    /// Every reservation.
    All,
}

/// Looks up a bungalow that a request refers to.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the bungalow does not exist.
pub fn get_bungalow(persistence: &mut Persistence, bungalow_id: i64) -> Result<Bungalow, ApiError> {
    persistence
        .get_bungalow(bungalow_id)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Bungalow"),
            message: format!("Bungalow {bungalow_id} does not exist"),
        })
}

/// Stores the reservation described by a completed draft.
///
/// The reservation and its restriction are written atomically after the
/// dates are re-checked.
///
/// # Errors
///
/// Returns `ApiError::DomainRuleViolation` if the draft is incomplete or the
/// bungalow has been taken meanwhile, and `ApiError::StorageFailure` if the
/// store fails.
pub fn finalize_reservation(
    persistence: &mut Persistence,
    draft: &ReservationDraft,
) -> Result<ReservationSummary, ApiError> {
    let reservation: NewReservation = draft.to_new_reservation().map_err(translate_domain_error)?;

    let bungalow_name: String = match draft.bungalow_name() {
        Some(name) => name.to_string(),
        None => get_bungalow(persistence, reservation.bungalow_id)?.name,
    };

    let reservation_id: i64 = persistence.create_reservation(&reservation)?;

    info!(
        reservation_id,
        bungalow_id = reservation.bungalow_id,
        "Reservation finalized"
    );

    Ok(ReservationSummary {
        reservation_id,
        bungalow_id: reservation.bungalow_id,
        bungalow_name,
        start_date: format_iso_date(reservation.range.start()),
        end_date: format_iso_date(reservation.range.end()),
        full_name: reservation.contact.full_name,
        email: reservation.contact.email,
        phone: reservation.contact.phone,
    })
}

/// Lists reservations for the dashboard.
///
/// # Errors
///
/// Returns `ApiError::StorageFailure` if the store cannot be queried.
pub fn list_reservations(
    persistence: &mut Persistence,
    filter: ReservationFilter,
) -> Result<Vec<ReservationView>, ApiError> {
    let reservations: Vec<Reservation> = match filter {
        ReservationFilter::New => persistence.list_new_reservations()?,
        ReservationFilter::All => persistence.list_all_reservations()?,
    };
    Ok(reservations.iter().map(ReservationView::from).collect())
}

/// Retrieves one reservation for the dashboard.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the reservation does not exist.
pub fn get_reservation(
    persistence: &mut Persistence,
    reservation_id: i64,
) -> Result<ReservationView, ApiError> {
    persistence
        .get_reservation(reservation_id)?
        .as_ref()
        .map(ReservationView::from)
        .ok_or_else(|| reservation_not_found(reservation_id))
}

/// Replaces the guest contact data of a reservation.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the reservation does not exist.
pub fn update_reservation(
    persistence: &mut Persistence,
    reservation_id: i64,
    contact: &ContactDetails,
) -> Result<(), ApiError> {
    persistence
        .update_reservation_contact(reservation_id, contact)
        .map_err(|e| not_found_or(e, reservation_id))?;
    info!(reservation_id, "Reservation contact updated");
    Ok(())
}

/// Marks a reservation as processed.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the reservation does not exist.
pub fn mark_processed(persistence: &mut Persistence, reservation_id: i64) -> Result<(), ApiError> {
    persistence
        .set_reservation_status(reservation_id, ReservationStatus::Processed)
        .map_err(|e| not_found_or(e, reservation_id))?;
    info!(reservation_id, "Reservation marked processed");
    Ok(())
}

/// Deletes a reservation together with its restriction.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the reservation does not exist.
pub fn delete_reservation(
    persistence: &mut Persistence,
    reservation_id: i64,
) -> Result<(), ApiError> {
    persistence
        .delete_reservation(reservation_id)
        .map_err(|e| not_found_or(e, reservation_id))
}

fn reservation_not_found(reservation_id: i64) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from("Reservation"),
        message: format!("Reservation {reservation_id} does not exist"),
    }
}

fn not_found_or(err: bungalow_bliss_persistence::PersistenceError, reservation_id: i64) -> ApiError {
    match ApiError::from(err) {
        ApiError::ResourceNotFound { .. } => reservation_not_found(reservation_id),
        other => other,
    }
}
