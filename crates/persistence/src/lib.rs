// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Bungalow Bliss.
//!
//! Bungalows, reservations, restrictions and administrator accounts live in
//! a `SQLite` database accessed through Diesel. Migrations are embedded and
//! run when a connection is opened; they also seed the restriction kinds
//! and the three bungalows.
//!
//! ## Testing
//!
//! Tests use `Persistence::new_in_memory()`, which gives every caller its
//! own shared-cache in-memory database.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bungalow_bliss_domain::{
    Bungalow, BungalowRestriction, ContactDetails, DateRange, NewReservation, Reservation,
    ReservationStatus,
};
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::UserData;
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Handle to the booking database.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a persistence adapter over a fresh in-memory database.
    ///
    /// Each call receives a unique database instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_bungalow_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a persistence adapter over a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Bungalows
    // ========================================================================

    /// Lists every bungalow ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bungalows(&mut self) -> Result<Vec<Bungalow>, PersistenceError> {
        queries::bungalows::list_bungalows(&mut self.conn)
    }

    /// Retrieves a bungalow by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_bungalow(&mut self, bungalow_id: i64) -> Result<Option<Bungalow>, PersistenceError> {
        queries::bungalows::get_bungalow(&mut self.conn, bungalow_id)
    }

    // ========================================================================
    // Availability & Restrictions
    // ========================================================================

    /// Whether a bungalow has no restriction overlapping `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn is_bungalow_available(
        &mut self,
        bungalow_id: i64,
        range: &DateRange,
    ) -> Result<bool, PersistenceError> {
        queries::restrictions::is_bungalow_available(&mut self.conn, bungalow_id, range)
    }

    /// Lists the bungalows free for the whole of `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_available_bungalows(
        &mut self,
        range: &DateRange,
    ) -> Result<Vec<Bungalow>, PersistenceError> {
        queries::restrictions::list_available_bungalows(&mut self.conn, range)
    }

    /// Lists the restrictions of a bungalow overlapping `range`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored row is invalid.
    pub fn list_restrictions_for_bungalow(
        &mut self,
        bungalow_id: i64,
        range: &DateRange,
    ) -> Result<Vec<BungalowRestriction>, PersistenceError> {
        queries::restrictions::list_restrictions_for_bungalow(&mut self.conn, bungalow_id, range)
    }

    /// Inserts an owner block and returns its restriction id.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_block(
        &mut self,
        bungalow_id: i64,
        range: &DateRange,
    ) -> Result<i64, PersistenceError> {
        mutations::restrictions::insert_block(&mut self.conn, bungalow_id, range)
    }

    /// Deletes an owner block.
    ///
    /// # Errors
    ///
    /// Returns an error if no block has this id or the delete fails.
    pub fn delete_block(&mut self, restriction_id: i64) -> Result<(), PersistenceError> {
        mutations::restrictions::delete_block(&mut self.conn, restriction_id)
    }

    // ========================================================================
    // Reservations
    // ========================================================================

    /// Stores a reservation and its restriction atomically.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::BungalowUnavailable` if the dates are taken,
    /// or a database error.
    pub fn create_reservation(
        &mut self,
        reservation: &NewReservation,
    ) -> Result<i64, PersistenceError> {
        mutations::reservations::create_reservation(&mut self.conn, reservation)
    }

    /// Retrieves a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_reservation(
        &mut self,
        reservation_id: i64,
    ) -> Result<Option<Reservation>, PersistenceError> {
        queries::reservations::get_reservation(&mut self.conn, reservation_id)
    }

    /// Lists all reservations by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_all_reservations(&mut self) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_all_reservations(&mut self.conn)
    }

    /// Lists unprocessed reservations by start date.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_new_reservations(&mut self) -> Result<Vec<Reservation>, PersistenceError> {
        queries::reservations::list_new_reservations(&mut self.conn)
    }

    /// Replaces the contact data of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the update fails.
    pub fn update_reservation_contact(
        &mut self,
        reservation_id: i64,
        contact: &ContactDetails,
    ) -> Result<(), PersistenceError> {
        mutations::reservations::update_reservation_contact(&mut self.conn, reservation_id, contact)
    }

    /// Sets the processing status of a reservation.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the update fails.
    pub fn set_reservation_status(
        &mut self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> Result<(), PersistenceError> {
        mutations::reservations::set_reservation_status(&mut self.conn, reservation_id, status)
    }

    /// Deletes a reservation and its restriction.
    ///
    /// # Errors
    ///
    /// Returns an error if the reservation does not exist or the delete fails.
    pub fn delete_reservation(&mut self, reservation_id: i64) -> Result<(), PersistenceError> {
        mutations::reservations::delete_reservation(&mut self.conn, reservation_id)
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Creates an administrator account and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails or the address is taken.
    pub fn create_user(
        &mut self,
        full_name: &str,
        email: &str,
        password: &str,
        access_level: i32,
    ) -> Result<i64, PersistenceError> {
        mutations::users::create_user(&mut self.conn, full_name, email, password, access_level)
    }

    /// Retrieves a user by e-mail address.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(&mut self, email: &str) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_email(&mut self.conn, email)
    }

    /// Verifies a password against a stored hash.
    ///
    /// # Errors
    ///
    /// Returns an error if the hash cannot be read.
    pub fn verify_password(
        &self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::users::verify_password(password, password_hash)
    }
}
