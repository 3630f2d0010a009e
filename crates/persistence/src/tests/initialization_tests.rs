// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_persistence;
use crate::Persistence;
use bungalow_bliss_domain::Bungalow;

#[test]
fn test_in_memory_database_enforces_foreign_keys() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_migrations_seed_three_bungalows() {
    let mut persistence: Persistence = create_test_persistence();
    let bungalows: Vec<Bungalow> = persistence.list_bungalows().unwrap();

    let names: Vec<&str> = bungalows.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["Eremite Hut", "Couple's Cottage", "Family Lodge"]);
}

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first: Persistence = create_test_persistence();
    let mut second: Persistence = create_test_persistence();

    first
        .insert_block(1, &super::range("2025-01-05", "2025-01-06"))
        .unwrap();

    assert!(
        second
            .is_bungalow_available(1, &super::range("2025-01-05", "2025-01-06"))
            .unwrap()
    );
}

#[test]
fn test_get_unknown_bungalow_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert_eq!(persistence.get_bungalow(99).unwrap(), None);
    assert_eq!(
        persistence.get_bungalow(2).unwrap().map(|b| b.name),
        Some(String::from("Couple's Cottage"))
    );
}
