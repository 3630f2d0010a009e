// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::UserData;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Diesel Queryable struct for user rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
struct UserRow {
    id: i64,
    full_name: String,
    email: String,
    password_hash: String,
    access_level: i32,
}

/// Retrieves a user by e-mail address.
///
/// The address is compared case-insensitively.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if no user has this address.
pub fn get_user_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    debug!(email = %normalized_email, "Looking up user by email");

    let row: Option<UserRow> = users::table
        .filter(users::email.eq(&normalized_email))
        .select(UserRow::as_select())
        .first(conn)
        .optional()
        .map_err(|e| PersistenceError::QueryFailed(format!("get_user_by_email: {e}")))?;

    Ok(row.map(|row| UserData {
        user_id: row.id,
        full_name: row.full_name,
        email: row.email,
        password_hash: row.password_hash,
        access_level: row.access_level,
    }))
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be read.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}
