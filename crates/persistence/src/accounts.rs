// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Users and login sessions.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{Nullable, Text};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{SessionData, UserData};
use crate::diesel_schema::{nguoi_dung, phien};
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = nguoi_dung)]
struct UserRow {
    id: i64,
    ten_dang_nhap: String,
    ho_ten: String,
    mat_khau_hash: String,
    ngay_tao: String,
    lan_dang_nhap_cuoi: Option<String>,
}

impl From<UserRow> for UserData {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            login: row.ten_dang_nhap,
            display_name: row.ho_ten,
            password_hash: row.mat_khau_hash,
            created_at: row.ngay_tao,
            last_login_at: row.lan_dang_nhap_cuoi,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = phien)]
struct SessionRow {
    id: i64,
    token: String,
    nguoi_dung_id: i64,
    ngay_tao: String,
    het_han: String,
}

impl From<SessionRow> for SessionData {
    fn from(row: SessionRow) -> Self {
        Self {
            id: row.id,
            token: row.token,
            user_id: row.nguoi_dung_id,
            created_at: row.ngay_tao,
            expires_at: row.het_han,
        }
    }
}

/// Creates a user. Logins are stored lowercased.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `login` - The login name
/// * `display_name` - The name shown in the UI
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns `PersistenceError::UniqueViolation` if the login is taken.
pub fn create_user(
    conn: &mut SqliteConnection,
    login: &str,
    display_name: &str,
    password: &str,
) -> Result<i64, PersistenceError> {
    let normalized_login: String = login.trim().to_lowercase();
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| PersistenceError::Other(format!("Failed to hash password: {e}")))?;

    diesel::insert_into(nguoi_dung::table)
        .values((
            nguoi_dung::ten_dang_nhap.eq(&normalized_login),
            nguoi_dung::ho_ten.eq(display_name),
            nguoi_dung::mat_khau_hash.eq(&password_hash),
        ))
        .execute(conn)?;
    let user_id: i64 = get_last_insert_rowid(conn)?;

    info!(user_id, login = %normalized_login, "Created user");
    Ok(user_id)
}

/// Looks a user up by login name, case-insensitively.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_user_by_login(
    conn: &mut SqliteConnection,
    login: &str,
) -> Result<Option<UserData>, PersistenceError> {
    let normalized_login: String = login.trim().to_lowercase();
    let row: Option<UserRow> = nguoi_dung::table
        .filter(nguoi_dung::ten_dang_nhap.eq(&normalized_login))
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(UserData::from))
}

/// Looks a user up by id.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_user(
    conn: &mut SqliteConnection,
    id: i64,
) -> Result<Option<UserData>, PersistenceError> {
    let row: Option<UserRow> = nguoi_dung::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(UserData::from))
}

/// Number of users.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_users(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(nguoi_dung::table.count().get_result(conn)?)
}

/// Stamps the user's last login with the current time.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_last_login(
    conn: &mut SqliteConnection,
    user_id: i64,
) -> Result<(), PersistenceError> {
    let now = diesel::dsl::sql::<Nullable<Text>>("CURRENT_TIMESTAMP");
    diesel::update(nguoi_dung::table.find(user_id))
        .set(nguoi_dung::lan_dang_nhap_cuoi.eq(now))
        .execute(conn)?;
    Ok(())
}

/// Verifies a password against a stored bcrypt hash.
///
/// # Errors
///
/// Returns an error if the hash cannot be parsed.
pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
    bcrypt::verify(password, password_hash)
        .map_err(|e| PersistenceError::Other(format!("Failed to verify password: {e}")))
}

/// Formats an instant the way `CURRENT_TIMESTAMP` does (UTC, second precision).
///
/// # Errors
///
/// Returns an error if the instant cannot be formatted.
pub fn sqlite_timestamp(instant: OffsetDateTime) -> Result<String, PersistenceError> {
    instant
        .to_offset(UtcOffset::UTC)
        .format(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        ))
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}

/// Stores a session token for a user.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_session(
    conn: &mut SqliteConnection,
    token: &str,
    user_id: i64,
    expires_at: OffsetDateTime,
) -> Result<SessionData, PersistenceError> {
    let expires_at: String = sqlite_timestamp(expires_at)?;
    diesel::insert_into(phien::table)
        .values((
            phien::token.eq(token),
            phien::nguoi_dung_id.eq(user_id),
            phien::het_han.eq(&expires_at),
        ))
        .execute(conn)?;
    let session_id: i64 = get_last_insert_rowid(conn)?;
    debug!(session_id, user_id, %expires_at, "Session created");

    let row: SessionRow = phien::table
        .find(session_id)
        .select(SessionRow::as_select())
        .first(conn)?;
    Ok(SessionData::from(row))
}

/// Looks up a session that has not yet expired.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_live_session(
    conn: &mut SqliteConnection,
    token: &str,
) -> Result<Option<SessionData>, PersistenceError> {
    let row: Option<SessionRow> = phien::table
        .filter(phien::token.eq(token))
        .filter(phien::het_han.gt(diesel::dsl::sql::<Text>("CURRENT_TIMESTAMP")))
        .select(SessionRow::as_select())
        .first(conn)
        .optional()?;
    Ok(row.map(SessionData::from))
}

/// Deletes a session by token. Returns whether a session was removed.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_session(conn: &mut SqliteConnection, token: &str) -> Result<bool, PersistenceError> {
    let removed: usize = diesel::delete(phien::table.filter(phien::token.eq(token))).execute(conn)?;
    Ok(removed > 0)
}

/// Deletes every expired session.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_expired_sessions(conn: &mut SqliteConnection) -> Result<usize, PersistenceError> {
    let removed: usize = diesel::delete(
        phien::table.filter(phien::het_han.le(diesel::dsl::sql::<Text>("CURRENT_TIMESTAMP"))),
    )
    .execute(conn)?;
    if removed > 0 {
        info!(removed, "Deleted expired sessions");
    }
    Ok(removed)
}
