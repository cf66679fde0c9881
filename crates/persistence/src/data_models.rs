// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hopdong_domain::{Contract, Document, Equipment, LookupRow, Payment, ProgressStep, Supplier};
use serde::Serialize;

/// A back-office user as stored, including the password hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub id: i64,
    pub login: String,
    pub display_name: String,
    pub password_hash: String,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A login session. Expiry is a UTC `YYYY-MM-DD HH:MM:SS` string, the same
/// shape `CURRENT_TIMESTAMP` produces, so the two compare as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub id: i64,
    pub token: String,
    pub user_id: i64,
    pub created_at: String,
    pub expires_at: String,
}

/// Every table the dashboard aggregates over, read in one transaction.
#[derive(Debug, Clone, Default)]
pub struct DashboardSnapshot {
    pub contracts: Vec<Contract>,
    pub payments: Vec<Payment>,
    pub equipment: Vec<Equipment>,
    pub documents: Vec<Document>,
    pub progress_steps: Vec<ProgressStep>,
    pub suppliers: Vec<Supplier>,
    pub contract_types: Vec<LookupRow>,
}
