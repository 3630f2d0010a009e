// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{ContactDetails, DateRange, DomainError, DraftStage, NewReservation, ReservationDraft};

fn range() -> DateRange {
    DateRange::parse("2025-03-01", "2025-03-04").unwrap()
}

#[test]
fn test_draft_progresses_through_stages() {
    let mut draft: ReservationDraft = ReservationDraft::new(range());
    assert_eq!(draft.stage(), DraftStage::DatesSet);

    draft.choose_bungalow(2);
    assert_eq!(draft.stage(), DraftStage::BungalowChosen);

    draft.set_contact(ContactDetails::new("Pat Doe", "pat@example.com", ""));
    assert_eq!(draft.stage(), DraftStage::ContactPending);
}

#[test]
fn test_choosing_new_bungalow_forgets_loaded_name() {
    let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range(), 1);
    draft.set_bungalow_name("Eremite Hut");
    draft.choose_bungalow(2);
    assert_eq!(draft.bungalow_name(), None);
    assert_eq!(draft.bungalow_id(), Some(2));
}

#[test]
fn test_incomplete_draft_cannot_become_reservation() {
    let draft: ReservationDraft = ReservationDraft::new(range());
    assert_eq!(
        draft.to_new_reservation(),
        Err(DomainError::DraftIncomplete { missing: "bungalow" })
    );

    let draft: ReservationDraft = ReservationDraft::for_bungalow(range(), 1);
    assert!(matches!(
        draft.to_new_reservation(),
        Err(DomainError::DraftIncomplete { .. })
    ));
}

#[test]
fn test_complete_draft_becomes_reservation() {
    let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range(), 3);
    draft.set_contact(ContactDetails::new("Pat Doe", "pat@example.com", "555"));

    let reservation: NewReservation = draft.to_new_reservation().unwrap();

    assert_eq!(reservation.bungalow_id, 3);
    assert_eq!(reservation.range, range());
    assert_eq!(reservation.contact.phone, "555");
}

#[test]
fn test_draft_survives_json() {
    let mut draft: ReservationDraft = ReservationDraft::for_bungalow(range(), 3);
    draft.set_bungalow_name("Family Lodge");
    let json: String = serde_json::to_string(&draft).unwrap();
    let restored: ReservationDraft = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, draft);
}
