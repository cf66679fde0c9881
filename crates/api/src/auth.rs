// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login sessions.
//!
//! Sessions identify who is using the back office. Every signed-in user may
//! do everything; there are no roles.

use hopdong_persistence::{Persistence, SessionData, UserData};
use std::time::{SystemTime, UNIX_EPOCH};
use time::{Duration, OffsetDateTime};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::request_response::{LoginRequest, LoginResponse, WhoAmIResponse};

/// Session lifetime used when the caller does not configure one.
pub const DEFAULT_SESSION_HOURS: i64 = 8;

/// Authentication service for session management.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Checks credentials and opens a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The persistence layer
    /// * `request` - Login name and password
    /// * `session_hours` - How long the session stays valid
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` for an unknown login or a
    /// wrong password. Both produce the same message.
    pub fn login(
        persistence: &mut Persistence,
        request: &LoginRequest,
        session_hours: i64,
    ) -> Result<LoginResponse, ApiError> {
        let rejected = || ApiError::AuthenticationFailed {
            reason: String::from("Invalid login or password"),
        };

        let Some(user) = persistence.find_user_by_login(&request.login)? else {
            warn!(login = %request.login, "Login for unknown user");
            return Err(rejected());
        };
        if !Persistence::verify_password(&request.password, &user.password_hash)? {
            warn!(user_id = user.id, "Login with wrong password");
            return Err(rejected());
        }

        let token: String = Self::generate_session_token();
        let expires_at: OffsetDateTime =
            OffsetDateTime::now_utc() + Duration::hours(session_hours);
        let session: SessionData = persistence.create_session(&token, user.id, expires_at)?;
        persistence.update_last_login(user.id)?;

        info!(user_id = user.id, "User logged in");
        let refreshed: UserData = persistence.find_user(user.id)?.unwrap_or(user);
        Ok(LoginResponse {
            token,
            expires_at: session.expires_at,
            user: whoami_response(&refreshed),
        })
    }

    /// Resolves a bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::AuthenticationFailed` if the token is unknown or
    /// expired.
    pub fn validate_session(
        persistence: &mut Persistence,
        token: &str,
    ) -> Result<UserData, ApiError> {
        let session: SessionData =
            persistence
                .find_live_session(token)?
                .ok_or_else(|| ApiError::AuthenticationFailed {
                    reason: String::from("Session is invalid or has expired"),
                })?;
        persistence
            .find_user(session.user_id)?
            .ok_or_else(|| ApiError::AuthenticationFailed {
                reason: String::from("Session user no longer exists"),
            })
    }

    /// Ends a session. Unknown tokens are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(persistence: &mut Persistence, token: &str) -> Result<(), ApiError> {
        if persistence.delete_session(token)? {
            info!("User logged out");
        }
        Ok(())
    }

    /// Creates the first user when the user table is empty.
    ///
    /// Returns whether a user was created.
    ///
    /// # Errors
    ///
    /// Returns an error if the users cannot be counted or created.
    pub fn ensure_initial_user(
        persistence: &mut Persistence,
        login: &str,
        password: &str,
    ) -> Result<bool, ApiError> {
        if persistence.count_users()? > 0 {
            return Ok(false);
        }
        if login.trim().is_empty() || password.is_empty() {
            return Err(ApiError::invalid_field(
                "adminLogin",
                "initial login and password must not be empty",
            ));
        }
        let user_id: i64 = persistence.create_user(login, login.trim(), password)?;
        info!(user_id, "Created initial user");
        Ok(true)
    }

    fn generate_session_token() -> String {
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }
}

/// Describes the user behind a session token.
///
/// # Errors
///
/// Returns `ApiError::AuthenticationFailed` if the token is not a live session.
pub fn whoami(persistence: &mut Persistence, token: &str) -> Result<WhoAmIResponse, ApiError> {
    let user: UserData = AuthenticationService::validate_session(persistence, token)?;
    Ok(whoami_response(&user))
}

fn whoami_response(user: &UserData) -> WhoAmIResponse {
    WhoAmIResponse {
        id: user.id,
        login: user.login.clone(),
        display_name: user.display_name.clone(),
        last_login_at: user.last_login_at.clone(),
    }
}
