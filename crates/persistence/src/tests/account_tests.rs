// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Persistence, PersistenceError, SessionData, UserData};
use time::{Duration, OffsetDateTime};

#[test]
fn test_create_user_hashes_password_and_normalizes_login() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let user_id: i64 = persistence
        .create_user("Admin", "Quản trị viên", "mat-khau")
        .unwrap();

    let user: UserData = persistence.find_user_by_login("ADMIN").unwrap().unwrap();
    assert_eq!(user.id, user_id);
    assert_eq!(user.login, "admin");
    assert_ne!(user.password_hash, "mat-khau");
    assert!(Persistence::verify_password("mat-khau", &user.password_hash).unwrap());
    assert!(!Persistence::verify_password("sai", &user.password_hash).unwrap());
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_duplicate_login_is_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_user("admin", "A", "x").unwrap();

    let result: Result<i64, PersistenceError> = persistence.create_user("ADMIN", "B", "y");

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_last_login_is_stamped() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence.create_user("ketoan", "Kế toán", "x").unwrap();
    assert!(persistence.find_user(user_id).unwrap().unwrap().last_login_at.is_none());

    persistence.update_last_login(user_id).unwrap();

    assert!(persistence.find_user(user_id).unwrap().unwrap().last_login_at.is_some());
}

#[test]
fn test_live_session_is_found_until_deleted() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence.create_user("admin", "A", "x").unwrap();

    let session: SessionData = persistence
        .create_session("session_1", user_id, OffsetDateTime::now_utc() + Duration::hours(1))
        .unwrap();
    assert_eq!(session.user_id, user_id);

    let found: SessionData = persistence.find_live_session("session_1").unwrap().unwrap();
    assert_eq!(found, session);

    assert!(persistence.delete_session("session_1").unwrap());
    assert!(persistence.find_live_session("session_1").unwrap().is_none());
    assert!(!persistence.delete_session("session_1").unwrap());
}

#[test]
fn test_expired_session_is_ignored_and_purged() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let user_id: i64 = persistence.create_user("admin", "A", "x").unwrap();
    persistence
        .create_session("old", user_id, OffsetDateTime::now_utc() - Duration::hours(1))
        .unwrap();
    persistence
        .create_session("fresh", user_id, OffsetDateTime::now_utc() + Duration::hours(1))
        .unwrap();

    assert!(persistence.find_live_session("old").unwrap().is_none());
    assert_eq!(persistence.delete_expired_sessions().unwrap(), 1);
    assert!(persistence.find_live_session("fresh").unwrap().is_some());
}

#[test]
fn test_timestamp_format_matches_sqlite() {
    let instant: OffsetDateTime = time::macros::datetime!(2026-02-03 04:05:06 +07:00);

    assert_eq!(
        crate::sqlite_timestamp(instant).unwrap(),
        "2026-02-02 21:05:06"
    );
}
