// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bungalow_bliss_domain::{
    ContactDetails, NewReservation, ReservationStatus, RestrictionKind, format_iso_date,
};
use diesel::SqliteConnection;
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::Text;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::{bungalow_restrictions, reservations};
use crate::error::PersistenceError;
use crate::queries::restrictions::is_bungalow_available;

/// Stores a reservation together with the restriction that blocks its dates.
///
/// Both rows are written in one transaction after re-checking that the
/// bungalow is still free, so a reservation never exists without its
/// restriction and two reservations cannot claim the same days.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reservation` - The reservation to store
///
/// # Returns
///
/// The id of the new reservation.
///
/// # Errors
///
/// Returns `PersistenceError::BungalowUnavailable` if the dates are taken,
/// or a database error if either insert fails.
pub fn create_reservation(
    conn: &mut SqliteConnection,
    reservation: &NewReservation,
) -> Result<i64, PersistenceError> {
    let start: String = format_iso_date(reservation.range.start());
    let end: String = format_iso_date(reservation.range.end());

    conn.transaction::<i64, PersistenceError, _>(|conn| {
        if !is_bungalow_available(conn, reservation.bungalow_id, &reservation.range)? {
            return Err(PersistenceError::BungalowUnavailable {
                bungalow_id: reservation.bungalow_id,
            });
        }

        diesel::insert_into(reservations::table)
            .values((
                reservations::full_name.eq(&reservation.contact.full_name),
                reservations::email.eq(&reservation.contact.email),
                reservations::phone.eq(&reservation.contact.phone),
                reservations::start_date.eq(&start),
                reservations::end_date.eq(&end),
                reservations::bungalow_id.eq(reservation.bungalow_id),
                reservations::status.eq(ReservationStatus::New.value()),
            ))
            .execute(conn)?;
        let reservation_id: i64 = get_last_insert_rowid(conn)?;

        diesel::insert_into(bungalow_restrictions::table)
            .values((
                bungalow_restrictions::start_date.eq(&start),
                bungalow_restrictions::end_date.eq(&end),
                bungalow_restrictions::bungalow_id.eq(reservation.bungalow_id),
                bungalow_restrictions::reservation_id.eq(Some(reservation_id)),
                bungalow_restrictions::restriction_id.eq(RestrictionKind::Reservation.id()),
            ))
            .execute(conn)?;

        Ok(reservation_id)
    })
    .inspect(|reservation_id| {
        info!(
            reservation_id,
            bungalow_id = reservation.bungalow_id,
            "Reservation created"
        );
    })
}

/// Replaces the guest contact data of a reservation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not exist.
pub fn update_reservation_contact(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    contact: &ContactDetails,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(reservations::table.find(reservation_id))
        .set((
            reservations::full_name.eq(&contact.full_name),
            reservations::email.eq(&contact.email),
            reservations::phone.eq(&contact.phone),
            reservations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("update_reservation_contact: {e}")))?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Reservation {reservation_id}"
        )));
    }
    Ok(())
}

/// Sets the processing status of a reservation.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not exist.
pub fn set_reservation_status(
    conn: &mut SqliteConnection,
    reservation_id: i64,
    status: ReservationStatus,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::update(reservations::table.find(reservation_id))
        .set((
            reservations::status.eq(status.value()),
            reservations::updated_at.eq(sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("set_reservation_status: {e}")))?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Reservation {reservation_id}"
        )));
    }
    Ok(())
}

/// Deletes a reservation; its restriction goes with it through the cascade.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the reservation does not exist.
pub fn delete_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(reservations::table.find(reservation_id))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("delete_reservation: {e}")))?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Reservation {reservation_id}"
        )));
    }

    info!(reservation_id, "Reservation deleted");
    Ok(())
}
