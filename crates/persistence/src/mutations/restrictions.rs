// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bungalow_bliss_domain::{DateRange, RestrictionKind, format_iso_date};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::bungalow_restrictions;
use crate::error::PersistenceError;

/// Inserts an owner block for a bungalow.
///
/// # Returns
///
/// The id of the new restriction.
///
/// # Errors
///
/// Returns an error if the insert fails, e.g. for an unknown bungalow.
pub fn insert_block(
    conn: &mut SqliteConnection,
    bungalow_id: i64,
    range: &DateRange,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(bungalow_restrictions::table)
        .values((
            bungalow_restrictions::start_date.eq(format_iso_date(range.start())),
            bungalow_restrictions::end_date.eq(format_iso_date(range.end())),
            bungalow_restrictions::bungalow_id.eq(bungalow_id),
            bungalow_restrictions::reservation_id.eq(None::<i64>),
            bungalow_restrictions::restriction_id.eq(RestrictionKind::Block.id()),
        ))
        .execute(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("insert_block: {e}")))?;

    let restriction_id: i64 = get_last_insert_rowid(conn)?;
    debug!(restriction_id, bungalow_id, "Owner block inserted");
    Ok(restriction_id)
}

/// Deletes an owner block.
///
/// Reservation restrictions are never touched by this function.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no block has this id.
pub fn delete_block(
    conn: &mut SqliteConnection,
    restriction_id: i64,
) -> Result<(), PersistenceError> {
    let rows: usize = diesel::delete(
        bungalow_restrictions::table
            .filter(bungalow_restrictions::id.eq(restriction_id))
            .filter(bungalow_restrictions::restriction_id.eq(RestrictionKind::Block.id())),
    )
    .execute(conn)
    .map_err(|e| PersistenceError::QueryFailed(format!("delete_block: {e}")))?;

    if rows == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Block restriction {restriction_id}"
        )));
    }

    debug!(restriction_id, "Owner block deleted");
    Ok(())
}
