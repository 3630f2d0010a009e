// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::create_test_persistence;
use crate::{Persistence, UserData};

#[test]
fn test_create_user_stores_bcrypt_hash() {
    let mut persistence: Persistence = create_test_persistence();
    let user_id: i64 = persistence
        .create_user("Site Admin", "Admin@Example.com", "correct horse", 3)
        .unwrap();

    let user: UserData = persistence
        .get_user_by_email("admin@example.com")
        .unwrap()
        .unwrap();

    assert_eq!(user.user_id, user_id);
    assert_eq!(user.email, "admin@example.com");
    assert_ne!(user.password_hash, "correct horse");
    assert!(persistence.verify_password("correct horse", &user.password_hash).unwrap());
    assert!(!persistence.verify_password("wrong", &user.password_hash).unwrap());
}

#[test]
fn test_duplicate_email_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_user("Site Admin", "admin@example.com", "pw", 3)
        .unwrap();

    assert!(
        persistence
            .create_user("Other", "ADMIN@example.com", "pw", 1)
            .is_err()
    );
}

#[test]
fn test_unknown_email_returns_none() {
    let mut persistence: Persistence = create_test_persistence();
    assert!(persistence.get_user_by_email("nobody@example.com").unwrap().is_none());
}
