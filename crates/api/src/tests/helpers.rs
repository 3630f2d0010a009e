// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bungalow_bliss_domain::{ContactDetails, DateRange, ReservationDraft};
use bungalow_bliss_persistence::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("Failed to create in-memory persistence")
}

pub fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).expect("Valid test range")
}

/// A draft with bungalow and contact details filled in.
pub fn create_complete_draft(bungalow_id: i64, start: &str, end: &str) -> ReservationDraft {
    let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range(start, end), bungalow_id);
    draft.set_contact(ContactDetails::new("Pat Doe", "pat@example.com", "555-0100"));
    draft
}
