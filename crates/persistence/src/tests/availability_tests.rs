// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{
    COUPLES_COTTAGE, EREMITE_HUT, FAMILY_LODGE, create_test_persistence, create_test_reservation,
    range,
};
use crate::Persistence;
use bungalow_bliss_domain::Bungalow;

#[test]
fn test_empty_store_has_every_bungalow_available() {
    let mut persistence: Persistence = create_test_persistence();

    let available: Vec<Bungalow> = persistence
        .list_available_bungalows(&range("2025-01-01", "2025-01-05"))
        .unwrap();

    assert_eq!(available.len(), 3);
    assert!(
        persistence
            .is_bungalow_available(EREMITE_HUT, &range("2025-01-01", "2025-01-05"))
            .unwrap()
    );
}

#[test]
fn test_reserved_bungalow_is_excluded() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reservation(&create_test_reservation(COUPLES_COTTAGE, "2025-01-10", "2025-01-15"))
        .unwrap();

    let available: Vec<i64> = persistence
        .list_available_bungalows(&range("2025-01-12", "2025-01-13"))
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();

    assert_eq!(available, vec![EREMITE_HUT, FAMILY_LODGE]);
}

#[test]
fn test_back_to_back_stay_collides_on_checkout_day() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reservation(&create_test_reservation(EREMITE_HUT, "2025-01-10", "2025-01-15"))
        .unwrap();

    assert!(
        !persistence
            .is_bungalow_available(EREMITE_HUT, &range("2025-01-15", "2025-01-20"))
            .unwrap()
    );
    assert!(
        !persistence
            .is_bungalow_available(EREMITE_HUT, &range("2025-01-05", "2025-01-10"))
            .unwrap()
    );
    assert!(
        persistence
            .is_bungalow_available(EREMITE_HUT, &range("2025-01-16", "2025-01-20"))
            .unwrap()
    );
}

#[test]
fn test_enclosing_range_collides() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(FAMILY_LODGE, &range("2025-02-10", "2025-02-11"))
        .unwrap();

    assert!(
        !persistence
            .is_bungalow_available(FAMILY_LODGE, &range("2025-02-01", "2025-02-28"))
            .unwrap()
    );
}

#[test]
fn test_block_makes_following_day_unavailable_too() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .insert_block(EREMITE_HUT, &range("2025-03-05", "2025-03-06"))
        .unwrap();

    assert!(
        !persistence
            .is_bungalow_available(EREMITE_HUT, &range("2025-03-06", "2025-03-06"))
            .unwrap()
    );
}

#[test]
fn test_availability_agrees_with_available_list() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_reservation(&create_test_reservation(EREMITE_HUT, "2025-04-01", "2025-04-03"))
        .unwrap();
    persistence
        .insert_block(FAMILY_LODGE, &range("2025-04-03", "2025-04-04"))
        .unwrap();

    let searched = range("2025-04-03", "2025-04-05");
    let available: Vec<i64> = persistence
        .list_available_bungalows(&searched)
        .unwrap()
        .into_iter()
        .map(|b| b.id)
        .collect();

    for bungalow_id in [EREMITE_HUT, COUPLES_COTTAGE, FAMILY_LODGE] {
        assert_eq!(
            persistence.is_bungalow_available(bungalow_id, &searched).unwrap(),
            available.contains(&bungalow_id)
        );
    }
}
