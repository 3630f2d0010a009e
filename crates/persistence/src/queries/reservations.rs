// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bungalow_bliss_domain::{
    ContactDetails, DateRange, Reservation, ReservationStatus, parse_iso_date,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{bungalows, reservations};
use crate::error::PersistenceError;

/// Diesel Queryable struct for reservation rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = reservations)]
struct ReservationRow {
    id: i64,
    full_name: String,
    email: String,
    phone: String,
    start_date: String,
    end_date: String,
    bungalow_id: i64,
    status: i32,
}

fn to_reservation(row: ReservationRow, bungalow_name: String) -> Result<Reservation, PersistenceError> {
    Ok(Reservation {
        id: row.id,
        bungalow_id: row.bungalow_id,
        bungalow_name,
        range: DateRange::new(
            parse_iso_date(&row.start_date)?,
            parse_iso_date(&row.end_date)?,
        )?,
        contact: ContactDetails {
            full_name: row.full_name,
            email: row.email,
            phone: row.phone,
        },
        status: ReservationStatus::from_value(row.status)?,
    })
}

/// Lists all reservations with their bungalow names, ordered by start date.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_all_reservations(
    conn: &mut SqliteConnection,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, String)> = reservations::table
        .inner_join(bungalows::table)
        .select((ReservationRow::as_select(), bungalows::bungalow_name))
        .order((reservations::start_date.asc(), reservations::id.asc()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_all_reservations: {e}")))?;

    rows.into_iter()
        .map(|(row, name)| to_reservation(row, name))
        .collect()
}

/// Lists reservations that have not been processed yet, ordered by start date.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_new_reservations(
    conn: &mut SqliteConnection,
) -> Result<Vec<Reservation>, PersistenceError> {
    let rows: Vec<(ReservationRow, String)> = reservations::table
        .inner_join(bungalows::table)
        .filter(reservations::status.eq(ReservationStatus::New.value()))
        .select((ReservationRow::as_select(), bungalows::bungalow_name))
        .order((reservations::start_date.asc(), reservations::id.asc()))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_new_reservations: {e}")))?;

    rows.into_iter()
        .map(|(row, name)| to_reservation(row, name))
        .collect()
}

/// Retrieves one reservation with its bungalow name.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is invalid.
/// Returns `Ok(None)` if the reservation does not exist.
pub fn get_reservation(
    conn: &mut SqliteConnection,
    reservation_id: i64,
) -> Result<Option<Reservation>, PersistenceError> {
    debug!(reservation_id, "Looking up reservation");

    let row: Option<(ReservationRow, String)> = reservations::table
        .inner_join(bungalows::table)
        .filter(reservations::id.eq(reservation_id))
        .select((ReservationRow::as_select(), bungalows::bungalow_name))
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_reservation: {e}")))?;

    row.map(|(row, name)| to_reservation(row, name)).transpose()
}
