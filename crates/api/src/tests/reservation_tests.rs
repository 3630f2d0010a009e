// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_complete_draft, create_test_persistence, range};
use crate::{
    ApiError, ReservationFilter, ReservationSummary, ReservationView, delete_reservation,
    finalize_reservation, get_bungalow, get_reservation, list_reservations, mark_processed,
    update_reservation,
};
use bungalow_bliss_domain::{ContactDetails, ReservationDraft};
use bungalow_bliss_persistence::Persistence;

#[test]
fn test_finalize_reservation_returns_summary() {
    let mut persistence: Persistence = create_test_persistence();

    let summary: ReservationSummary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(3, "2025-02-01", "2025-02-07"),
    )
    .unwrap();

    assert!(summary.reservation_id > 0);
    assert_eq!(summary.bungalow_id, 3);
    assert_eq!(summary.bungalow_name, "Family Lodge");
    assert_eq!(summary.start_date, "2025-02-01");
    assert_eq!(summary.end_date, "2025-02-07");
    assert_eq!(summary.full_name, "Pat Doe");
    assert_eq!(summary.email, "pat@example.com");
    assert_eq!(summary.phone, "555-0100");

    assert!(
        !persistence
            .is_bungalow_available(3, &range("2025-02-03", "2025-02-04"))
            .unwrap()
    );
}

#[test]
fn test_finalize_uses_name_already_in_draft() {
    let mut persistence: Persistence = create_test_persistence();
    let mut draft: ReservationDraft = create_complete_draft(1, "2025-02-01", "2025-02-02");
    draft.set_bungalow_name("The Hut");

    let summary: ReservationSummary = finalize_reservation(&mut persistence, &draft).unwrap();

    assert_eq!(summary.bungalow_name, "The Hut");
}

#[test]
fn test_second_booking_of_same_dates_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    finalize_reservation(
        &mut persistence,
        &create_complete_draft(2, "2025-03-01", "2025-03-05"),
    )
    .unwrap();

    let result: Result<ReservationSummary, ApiError> = finalize_reservation(
        &mut persistence,
        &create_complete_draft(2, "2025-03-04", "2025-03-08"),
    );

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "bungalow_available"
    ));
    assert_eq!(
        list_reservations(&mut persistence, ReservationFilter::All)
            .unwrap()
            .len(),
        1
    );
}

#[test]
fn test_incomplete_draft_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let draft: ReservationDraft = ReservationDraft::for_bungalow(range("2025-03-01", "2025-03-02"), 1);

    let result: Result<ReservationSummary, ApiError> = finalize_reservation(&mut persistence, &draft);

    assert!(matches!(
        result,
        Err(ApiError::DomainRuleViolation { ref rule, .. }) if rule == "complete_draft"
    ));
}

#[test]
fn test_unknown_bungalow_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(matches!(
        get_bungalow(&mut persistence, 42),
        Err(ApiError::ResourceNotFound { .. })
    ));
    assert!(matches!(
        finalize_reservation(
            &mut persistence,
            &create_complete_draft(42, "2025-03-01", "2025-03-02")
        ),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_new_and_all_listings() {
    let mut persistence: Persistence = create_test_persistence();
    let first: ReservationSummary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(1, "2025-04-10", "2025-04-12"),
    )
    .unwrap();
    let second: ReservationSummary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(2, "2025-04-01", "2025-04-03"),
    )
    .unwrap();

    mark_processed(&mut persistence, first.reservation_id).unwrap();

    let new: Vec<ReservationView> = list_reservations(&mut persistence, ReservationFilter::New).unwrap();
    assert_eq!(new.len(), 1);
    assert_eq!(new[0].id, second.reservation_id);
    assert!(!new[0].processed);

    let all: Vec<ReservationView> = list_reservations(&mut persistence, ReservationFilter::All).unwrap();
    let ids: Vec<i64> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![second.reservation_id, first.reservation_id]);
    assert!(all[1].processed);
}

#[test]
fn test_update_reservation_contact() {
    let mut persistence: Persistence = create_test_persistence();
    let summary: ReservationSummary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(1, "2025-05-01", "2025-05-02"),
    )
    .unwrap();

    update_reservation(
        &mut persistence,
        summary.reservation_id,
        &ContactDetails::new("Sam Roe", "sam@example.org", ""),
    )
    .unwrap();

    let view: ReservationView = get_reservation(&mut persistence, summary.reservation_id).unwrap();
    assert_eq!(view.full_name, "Sam Roe");
    assert_eq!(view.email, "sam@example.org");
    assert_eq!(view.phone, "");
    assert_eq!(view.start_date, "2025-05-01");
}

#[test]
fn test_delete_reservation_frees_dates() {
    let mut persistence: Persistence = create_test_persistence();
    let summary: ReservationSummary = finalize_reservation(
        &mut persistence,
        &create_complete_draft(1, "2025-05-01", "2025-05-03"),
    )
    .unwrap();

    delete_reservation(&mut persistence, summary.reservation_id).unwrap();

    assert!(
        persistence
            .is_bungalow_available(1, &range("2025-05-01", "2025-05-03"))
            .unwrap()
    );
    assert!(matches!(
        get_reservation(&mut persistence, summary.reservation_id),
        Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Reservation"
    ));
}

#[test]
fn test_admin_operations_on_missing_reservation() {
    let mut persistence: Persistence = create_test_persistence();
    let contact: ContactDetails = ContactDetails::new("Sam Roe", "sam@example.org", "");

    for result in [
        update_reservation(&mut persistence, 77, &contact),
        mark_processed(&mut persistence, 77),
        delete_reservation(&mut persistence, 77),
    ] {
        assert!(matches!(
            result,
            Err(ApiError::ResourceNotFound { ref resource_type, .. }) if resource_type == "Reservation"
        ));
    }
}
