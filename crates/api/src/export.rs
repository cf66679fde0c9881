// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV export of the contract list.

use hopdong::ContractView;
use hopdong_domain::Contract;
use hopdong_persistence::Persistence;

use crate::error::ApiError;
use crate::handlers::list_contracts;

/// Column headers, in output order.
pub const CONTRACT_CSV_HEADERS: [&str; 14] = [
    "ID",
    "Tên hợp đồng",
    "Số hợp đồng nội bộ",
    "Số hợp đồng ngoại",
    "Ngày ký",
    "Giá trị",
    "Loại tiền",
    "Loại hợp đồng",
    "Trạng thái",
    "Chủ đầu tư",
    "Nhà cung cấp",
    "Cán bộ phụ trách",
    "Điều kiện giao hàng",
    "Địa điểm thông quan",
];

/// Writes one row per contract with every reference resolved to a name.
///
/// # Errors
///
/// Returns an error if the contracts cannot be read or the CSV cannot be
/// written.
pub fn export_contracts_csv(persistence: &mut Persistence) -> Result<String, ApiError> {
    let views: Vec<ContractView> = list_contracts(persistence)?;
    render_contracts_csv(&views)
}

/// Renders already-resolved contracts as CSV.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV writer fails.
pub fn render_contracts_csv(views: &[ContractView]) -> Result<String, ApiError> {
    let mut writer: csv::Writer<Vec<u8>> = csv::Writer::from_writer(Vec::new());
    writer.write_record(CONTRACT_CSV_HEADERS).map_err(csv_error)?;

    for view in views {
        let contract: &Contract = &view.contract;
        let value: String = contract
            .value
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        writer
            .write_record([
                contract.id.to_string().as_str(),
                contract.name.as_str(),
                contract.internal_number.as_deref().unwrap_or_default(),
                contract.external_number.as_deref().unwrap_or_default(),
                contract.sign_date.as_deref().unwrap_or_default(),
                value.as_str(),
                view.currency_name.as_str(),
                view.contract_type_name.as_str(),
                view.status_name.as_str(),
                view.investor_name.as_str(),
                view.supplier_name.as_str(),
                view.staff_name.as_str(),
                view.delivery_terms_name.as_str(),
                view.customs_location_name.as_str(),
            ])
            .map_err(csv_error)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV is not UTF-8: {e}"),
    })
}

fn csv_error(err: csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV: {err}"),
    }
}
