// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes that are not plain domain records.

use hopdong::{
    ContractView, DisbursementView, EquipmentView, PaymentView, ProgressStepView, ReceptionView,
};
use hopdong_domain::Document;
use hopdong_persistence::ContractChildCounts;
use serde::{Deserialize, Serialize};

/// A contract with every record it owns, names resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDetail {
    pub contract: ContractView,
    pub payments: Vec<PaymentView>,
    pub equipment: Vec<EquipmentView>,
    /// Ordered by sequence number.
    pub progress_steps: Vec<ProgressStepView>,
    pub documents: Vec<Document>,
    pub receptions: Vec<ReceptionView>,
    pub disbursements: Vec<DisbursementView>,
}

/// Result of deleting a contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteContractResponse {
    pub contract_id: i64,
    /// Records removed alongside the contract; all zero for a plain delete.
    pub removed: ContractChildCounts,
}

/// An attachment body ready to send back to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedFile {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Request to log in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

/// Response to a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for subsequent requests.
    pub token: String,
    /// UTC expiry, `YYYY-MM-DD HH:MM:SS`.
    pub expires_at: String,
    pub user: WhoAmIResponse,
}

/// The user behind a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhoAmIResponse {
    pub id: i64,
    pub login: String,
    pub display_name: String,
    pub last_login_at: Option<String>,
}
