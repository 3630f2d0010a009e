// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::dates::DateRange;
use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// A rentable holiday home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bungalow {
    /// The bungalow identifier.
    pub id: i64,
    /// The display name.
    pub name: String,
}

impl Bungalow {
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Parses a bungalow identifier taken from a request.
///
/// # Errors
///
/// Returns `DomainError::InvalidBungalowId` unless the value is a positive integer.
pub fn parse_bungalow_id(value: &str) -> Result<i64, DomainError> {
    match value.trim().parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(DomainError::InvalidBungalowId(value.to_string())),
    }
}

/// Why a bungalow is unavailable for an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RestrictionKind {
    /// A guest booking; always linked to a reservation.
    Reservation,
    /// A day blocked by the owner.
    Block,
}

impl RestrictionKind {
    /// The identifier of this kind in the `restrictions` reference table.
    #[must_use]
    pub const fn id(self) -> i32 {
        match self {
            Self::Reservation => 1,
            Self::Block => 2,
        }
    }

    /// Resolves a reference table identifier.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRestrictionKind` for unknown identifiers.
    pub const fn from_id(id: i32) -> Result<Self, DomainError> {
        match id {
            1 => Ok(Self::Reservation),
            2 => Ok(Self::Block),
            other => Err(DomainError::InvalidRestrictionKind(other)),
        }
    }
}

/// An interval during which a bungalow cannot be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BungalowRestriction {
    id: i64,
    bungalow_id: i64,
    range: DateRange,
    kind: RestrictionKind,
    reservation_id: Option<i64>,
}

impl BungalowRestriction {
    /// Creates a restriction, checking that the reservation link matches the kind.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InconsistentRestriction` if a reservation restriction
    /// has no reservation or a block carries one.
    pub const fn new(
        id: i64,
        bungalow_id: i64,
        range: DateRange,
        kind: RestrictionKind,
        reservation_id: Option<i64>,
    ) -> Result<Self, DomainError> {
        match (kind, reservation_id) {
            (RestrictionKind::Reservation, Some(_)) | (RestrictionKind::Block, None) => Ok(Self {
                id,
                bungalow_id,
                range,
                kind,
                reservation_id,
            }),
            _ => Err(DomainError::InconsistentRestriction { restriction_id: id }),
        }
    }

    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    #[must_use]
    pub const fn bungalow_id(&self) -> i64 {
        self.bungalow_id
    }

    #[must_use]
    pub const fn range(&self) -> DateRange {
        self.range
    }

    #[must_use]
    pub const fn kind(&self) -> RestrictionKind {
        self.kind
    }

    #[must_use]
    pub const fn reservation_id(&self) -> Option<i64> {
        self.reservation_id
    }
}

/// Processing state of a reservation in the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservationStatus {
    New,
    Processed,
}

impl ReservationStatus {
    #[must_use]
    pub const fn value(self) -> i32 {
        match self {
            Self::New => 0,
            Self::Processed => 1,
        }
    }

    /// Resolves a stored status value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidReservationStatus` for unknown values.
    pub const fn from_value(value: i32) -> Result<Self, DomainError> {
        match value {
            0 => Ok(Self::New),
            1 => Ok(Self::Processed),
            other => Err(DomainError::InvalidReservationStatus(other)),
        }
    }
}

/// Guest contact data collected on the reservation form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl ContactDetails {
    /// Creates contact details with surrounding whitespace removed.
    #[must_use]
    pub fn new(full_name: &str, email: &str, phone: &str) -> Self {
        Self {
            full_name: full_name.trim().to_string(),
            email: email.trim().to_string(),
            phone: phone.trim().to_string(),
        }
    }
}

/// A reservation ready to be written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewReservation {
    pub bungalow_id: i64,
    pub range: DateRange,
    pub contact: ContactDetails,
}

/// A stored reservation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub bungalow_id: i64,
    pub bungalow_name: String,
    pub range: DateRange,
    pub contact: ContactDetails,
    pub status: ReservationStatus,
}
