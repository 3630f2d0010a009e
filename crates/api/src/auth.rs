// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Administrator authentication.

use bungalow_bliss_persistence::{Persistence, UserData};
use tracing::{info, warn};

use crate::error::{ApiError, AuthError};

/// Access level given to accounts created at startup.
pub const ADMIN_ACCESS_LEVEL: i32 = 3;

/// A user whose credentials have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub full_name: String,
    pub access_level: i32,
}

/// Authentication service for administrator logins.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks an e-mail address and password against the stored accounts.
    ///
    /// Unknown addresses and wrong passwords fail the same way.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `email` - The login address
    /// * `password` - The plain-text password
    ///
    /// # Errors
    ///
    /// Returns `AuthError::AuthenticationFailed` for bad credentials and
    /// `AuthError::Backend` if the store cannot be consulted.
    pub fn login(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
    ) -> Result<AuthenticatedUser, AuthError> {
        let invalid = || AuthError::AuthenticationFailed {
            reason: String::from("Invalid credentials"),
        };

        let user: UserData = persistence
            .get_user_by_email(email)
            .map_err(|e| AuthError::Backend {
                message: e.to_string(),
            })?
            .ok_or_else(invalid)?;

        let matches: bool = persistence
            .verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Backend {
                message: e.to_string(),
            })?;

        if !matches {
            warn!(user_id = user.user_id, "Rejected login with wrong password");
            return Err(invalid());
        }

        info!(user_id = user.user_id, "User logged in");

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            full_name: user.full_name,
            access_level: user.access_level,
        })
    }

    /// Creates an administrator account unless one with this address exists.
    ///
    /// # Returns
    ///
    /// The id of the new account, or `None` if it already existed.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::StorageFailure` if the store fails.
    pub fn ensure_admin(
        persistence: &mut Persistence,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<Option<i64>, ApiError> {
        if persistence.get_user_by_email(email)?.is_some() {
            info!(email, "Administrator account already exists");
            return Ok(None);
        }

        let user_id: i64 = persistence.create_user(full_name, email, password, ADMIN_ACCESS_LEVEL)?;
        Ok(Some(user_id))
    }
}
