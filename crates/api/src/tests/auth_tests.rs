// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hopdong_persistence::{Persistence, UserData};

use super::helpers::create_test_persistence;
use crate::{
    ApiError, AuthenticationService, DEFAULT_SESSION_HOURS, LoginRequest, LoginResponse,
    WhoAmIResponse, whoami,
};

fn login_request(login: &str, password: &str) -> LoginRequest {
    LoginRequest {
        login: String::from(login),
        password: String::from(password),
    }
}

fn persistence_with_admin() -> Persistence {
    let mut persistence: Persistence = create_test_persistence();
    let created: bool =
        AuthenticationService::ensure_initial_user(&mut persistence, "admin", "mat-khau").unwrap();
    assert!(created);
    persistence
}

#[test]
fn test_initial_user_is_created_once() {
    let mut persistence: Persistence = persistence_with_admin();

    let created_again: bool =
        AuthenticationService::ensure_initial_user(&mut persistence, "other", "secret").unwrap();

    assert!(!created_again);
    assert_eq!(persistence.count_users().unwrap(), 1);
}

#[test]
fn test_initial_user_requires_credentials() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError =
        AuthenticationService::ensure_initial_user(&mut persistence, " ", "").unwrap_err();

    assert!(matches!(err, ApiError::Validation { .. }));
}

#[test]
fn test_login_session_whoami_logout() {
    let mut persistence: Persistence = persistence_with_admin();

    let response: LoginResponse = AuthenticationService::login(
        &mut persistence,
        &login_request("ADMIN", "mat-khau"),
        DEFAULT_SESSION_HOURS,
    )
    .unwrap();
    assert!(response.token.starts_with("session_"));
    assert_eq!(response.user.login, "admin");
    assert!(response.user.last_login_at.is_some());

    let user: UserData =
        AuthenticationService::validate_session(&mut persistence, &response.token).unwrap();
    assert_eq!(user.id, response.user.id);

    let me: WhoAmIResponse = whoami(&mut persistence, &response.token).unwrap();
    assert_eq!(me.login, "admin");

    AuthenticationService::logout(&mut persistence, &response.token).unwrap();
    assert!(matches!(
        whoami(&mut persistence, &response.token),
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_wrong_password_and_unknown_user_look_the_same() {
    let mut persistence: Persistence = persistence_with_admin();

    let wrong_password: ApiError = AuthenticationService::login(
        &mut persistence,
        &login_request("admin", "sai"),
        DEFAULT_SESSION_HOURS,
    )
    .unwrap_err();
    let unknown_user: ApiError = AuthenticationService::login(
        &mut persistence,
        &login_request("ai-do", "mat-khau"),
        DEFAULT_SESSION_HOURS,
    )
    .unwrap_err();

    assert_eq!(wrong_password, unknown_user);
}

#[test]
fn test_expired_session_is_rejected() {
    let mut persistence: Persistence = persistence_with_admin();

    let response: LoginResponse = AuthenticationService::login(
        &mut persistence,
        &login_request("admin", "mat-khau"),
        -1,
    )
    .unwrap();

    assert!(matches!(
        AuthenticationService::validate_session(&mut persistence, &response.token),
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_logout_of_unknown_token_is_ignored() {
    let mut persistence: Persistence = create_test_persistence();

    assert!(AuthenticationService::logout(&mut persistence, "session_0_0").is_ok());
}
