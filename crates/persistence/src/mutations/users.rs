// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::diesel_schema::users;
use crate::error::PersistenceError;

/// Creates an administrator account.
///
/// The e-mail address is stored lowercased; the password is stored as a
/// bcrypt hash.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `full_name` - The display name
/// * `email` - The login address
/// * `password` - The plain-text password (will be hashed)
/// * `access_level` - The access level
///
/// # Errors
///
/// Returns an error if hashing fails or the address is already taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    full_name: &str,
    email: &str,
    password: &str,
    access_level: i32,
) -> Result<i64, PersistenceError> {
    let normalized_email: String = email.trim().to_lowercase();

    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(users::table)
        .values((
            users::full_name.eq(full_name),
            users::email.eq(&normalized_email),
            users::password_hash.eq(&password_hash),
            users::access_level.eq(access_level),
        ))
        .execute(conn)?;

    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, email = %normalized_email, "User created");
    Ok(user_id)
}
