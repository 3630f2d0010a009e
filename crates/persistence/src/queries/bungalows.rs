// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bungalow_bliss_domain::Bungalow;
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::bungalows;
use crate::error::PersistenceError;

/// Diesel Queryable struct for bungalow rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bungalows)]
pub(crate) struct BungalowRow {
    pub id: i64,
    pub bungalow_name: String,
}

impl From<BungalowRow> for Bungalow {
    fn from(row: BungalowRow) -> Self {
        Self::new(row.id, row.bungalow_name)
    }
}

/// Lists every bungalow ordered by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bungalows(conn: &mut SqliteConnection) -> Result<Vec<Bungalow>, PersistenceError> {
    let rows: Vec<BungalowRow> = bungalows::table
        .select(BungalowRow::as_select())
        .order(bungalows::id.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_bungalows: {e}")))?;

    Ok(rows.into_iter().map(Bungalow::from).collect())
}

/// Retrieves a bungalow by id.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no such bungalow exists.
pub fn get_bungalow(
    conn: &mut SqliteConnection,
    bungalow_id: i64,
) -> Result<Option<Bungalow>, PersistenceError> {
    debug!(bungalow_id, "Looking up bungalow");

    let row: Option<BungalowRow> = bungalows::table
        .find(bungalow_id)
        .select(BungalowRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_bungalow: {e}")))?;

    Ok(row.map(Bungalow::from))
}
