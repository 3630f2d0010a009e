// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interval queries over the restriction store.
//!
//! Dates are stored as `YYYY-MM-DD` text, so string comparison in SQL is
//! calendar comparison. Every query here uses the same inclusive overlap
//! rule: a restriction `r` overlaps `[start, end]` iff
//! `r.start_date <= end AND r.end_date >= start`.

use bungalow_bliss_domain::{
    Bungalow, BungalowRestriction, DateRange, RestrictionKind, format_iso_date, parse_iso_date,
};
use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::diesel_schema::{bungalow_restrictions, bungalows};
use crate::error::PersistenceError;
use crate::queries::bungalows::BungalowRow;

/// Diesel Queryable struct for restriction rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = bungalow_restrictions)]
struct RestrictionRow {
    id: i64,
    start_date: String,
    end_date: String,
    bungalow_id: i64,
    reservation_id: Option<i64>,
    restriction_id: i32,
}

impl TryFrom<RestrictionRow> for BungalowRestriction {
    type Error = PersistenceError;

    fn try_from(row: RestrictionRow) -> Result<Self, Self::Error> {
        let range: DateRange = DateRange::new(
            parse_iso_date(&row.start_date)?,
            parse_iso_date(&row.end_date)?,
        )?;
        let kind: RestrictionKind = RestrictionKind::from_id(row.restriction_id)?;
        Ok(Self::new(
            row.id,
            row.bungalow_id,
            range,
            kind,
            row.reservation_id,
        )?)
    }
}

/// Counts the restrictions of a bungalow overlapping `range`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_overlapping_restrictions(
    conn: &mut SqliteConnection,
    bungalow_id: i64,
    range: &DateRange,
) -> Result<i64, PersistenceError> {
    let start: String = format_iso_date(range.start());
    let end: String = format_iso_date(range.end());

    bungalow_restrictions::table
        .filter(bungalow_restrictions::bungalow_id.eq(bungalow_id))
        .filter(bungalow_restrictions::start_date.le(end.as_str()))
        .filter(bungalow_restrictions::end_date.ge(start.as_str()))
        .count()
        .get_result(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("count_overlapping_restrictions: {e}")))
}

/// Whether a bungalow has no restriction overlapping `range`.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn is_bungalow_available(
    conn: &mut SqliteConnection,
    bungalow_id: i64,
    range: &DateRange,
) -> Result<bool, PersistenceError> {
    let overlapping: i64 = count_overlapping_restrictions(conn, bungalow_id, range)?;
    debug!(bungalow_id, overlapping, "Checked bungalow availability");
    Ok(overlapping == 0)
}

/// Lists the bungalows with no restriction overlapping `range`, ordered by id.
///
/// Bungalows that have never been restricted are included.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_available_bungalows(
    conn: &mut SqliteConnection,
    range: &DateRange,
) -> Result<Vec<Bungalow>, PersistenceError> {
    let start: String = format_iso_date(range.start());
    let end: String = format_iso_date(range.end());

    let restricted = bungalow_restrictions::table
        .filter(bungalow_restrictions::start_date.le(end))
        .filter(bungalow_restrictions::end_date.ge(start))
        .select(bungalow_restrictions::bungalow_id);

    let rows: Vec<BungalowRow> = bungalows::table
        .filter(bungalows::id.ne_all(restricted))
        .select(BungalowRow::as_select())
        .order(bungalows::id.asc())
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_available_bungalows: {e}")))?;

    Ok(rows.into_iter().map(Bungalow::from).collect())
}

/// Lists the restrictions of a bungalow overlapping `range`, ordered by start date.
///
/// # Errors
///
/// Returns an error if the database query fails or a stored row is invalid.
pub fn list_restrictions_for_bungalow(
    conn: &mut SqliteConnection,
    bungalow_id: i64,
    range: &DateRange,
) -> Result<Vec<BungalowRestriction>, PersistenceError> {
    let start: String = format_iso_date(range.start());
    let end: String = format_iso_date(range.end());

    let rows: Vec<RestrictionRow> = bungalow_restrictions::table
        .filter(bungalow_restrictions::bungalow_id.eq(bungalow_id))
        .filter(bungalow_restrictions::start_date.le(end.as_str()))
        .filter(bungalow_restrictions::end_date.ge(start.as_str()))
        .select(RestrictionRow::as_select())
        .order((
            bungalow_restrictions::start_date.asc(),
            bungalow_restrictions::id.asc(),
        ))
        .load(conn)
        .map_err(|e| PersistenceError::QueryFailed(format!("list_restrictions_for_bungalow: {e}")))?;

    rows.into_iter().map(BungalowRestriction::try_from).collect()
}
