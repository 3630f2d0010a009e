// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod availability_tests;
mod initialization_tests;
mod user_tests;

use crate::Persistence;
use bungalow_bliss_domain::{ContactDetails, DateRange, NewReservation};

/// Seeded bungalow ids.
pub const EREMITE_HUT: i64 = 1;
pub const COUPLES_COTTAGE: i64 = 2;
pub const FAMILY_LODGE: i64 = 3;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).expect("Valid test range")
}

pub fn create_test_reservation(bungalow_id: i64, start: &str, end: &str) -> NewReservation {
    NewReservation {
        bungalow_id,
        range: range(start, end),
        contact: ContactDetails::new("Pat Doe", "pat@example.com", "555-0100"),
    }
}
