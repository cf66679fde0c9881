// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_lookup_row, create_test_contract, create_test_supplier};
use crate::{
    ContractView, DEFAULT_FLAG, ReferenceTables, SupplierView, UNDETERMINED, country_flag,
    image_data_uri, resolve_name,
};
use hopdong_domain::{Contract, LookupKind, LookupRow, Supplier};

#[test]
fn test_resolve_name_falls_back_for_null_and_unknown_ids() {
    let rows: Vec<LookupRow> = vec![create_lookup_row(1, "VND"), create_lookup_row(2, "USD")];
    let empty: Vec<LookupRow> = Vec::new();

    assert_eq!(resolve_name(None, &rows, "n/a"), "n/a");
    assert_eq!(resolve_name(Some(999_999), &empty, UNDETERMINED), UNDETERMINED);
    assert_eq!(resolve_name(Some(999_999), &rows, "n/a"), "n/a");
    assert_eq!(resolve_name(Some(2), &rows, "n/a"), "USD");
}

#[test]
fn test_resolve_name_works_for_party_tables() {
    let suppliers: Vec<Supplier> = vec![create_test_supplier(7, None)];
    assert_eq!(
        resolve_name(Some(7), &suppliers, UNDETERMINED),
        "Nhà cung cấp 7"
    );
}

#[test]
fn test_country_flag_uses_one_canonical_map() {
    assert_eq!(country_flag(Some("VN")), "🇻🇳");
    assert_eq!(country_flag(Some("jp")), "🇯🇵");
    assert_eq!(country_flag(Some(" gb ")), "🇬🇧");
    assert_eq!(country_flag(Some("BR")), DEFAULT_FLAG);
    assert_eq!(country_flag(None), DEFAULT_FLAG);
}

#[test]
fn test_image_data_uri_sniffs_mime_type() {
    assert_eq!(
        image_data_uri("iVBORw0KGgo=").as_deref(),
        Some("data:image/png;base64,iVBORw0KGgo=")
    );
    assert_eq!(
        image_data_uri("/9j/4AAQ").as_deref(),
        Some("data:image/jpeg;base64,/9j/4AAQ")
    );
    assert_eq!(
        image_data_uri("R0lGODlh").as_deref(),
        Some("data:image/gif;base64,R0lGODlh")
    );
    assert_eq!(
        image_data_uri("data:image/svg+xml;base64,PHN2Zz4=").as_deref(),
        Some("data:image/svg+xml;base64,PHN2Zz4=")
    );
    assert_eq!(image_data_uri("  "), None);
}

#[test]
fn test_contract_view_resolves_and_tolerates_dangling_references() {
    let mut tables: ReferenceTables = ReferenceTables::default();
    tables.set_lookup(
        LookupKind::ContractType,
        vec![create_lookup_row(1, "Nhập khẩu")],
    );
    tables.set_lookup(LookupKind::Currency, vec![create_lookup_row(2, "USD")]);
    tables.suppliers = vec![create_test_supplier(5, Some("Singapore"))];

    let mut contract: Contract = create_test_contract(1, Some(3), Some(10.0));
    contract.contract_type_id = Some(1);
    contract.currency_id = Some(2);
    contract.supplier_id = Some(5);
    contract.investor_id = Some(404);

    let view: ContractView = tables.contract_view(&contract);

    assert_eq!(view.contract_type_name, "Nhập khẩu");
    assert_eq!(view.currency_name, "USD");
    assert_eq!(view.supplier_name, "Nhà cung cấp 5");
    assert_eq!(view.investor_name, UNDETERMINED);
    assert_eq!(view.staff_name, UNDETERMINED);
    assert_eq!(view.status_name, "Tạm dừng");

    let json: serde_json::Value = serde_json::to_value(&view).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["contractTypeName"], "Nhập khẩu");
}

#[test]
fn test_status_name_prefers_table_row() {
    let mut tables: ReferenceTables = ReferenceTables::default();
    tables.set_lookup(
        LookupKind::ContractStatus,
        vec![create_lookup_row(2, "Hoàn tất")],
    );
    let contract: Contract = create_test_contract(1, Some(2), None);
    assert_eq!(tables.contract_view(&contract).status_name, "Hoàn tất");

    let unknown: Contract = create_test_contract(2, Some(9), None);
    assert_eq!(tables.contract_view(&unknown).status_name, UNDETERMINED);
}

#[test]
fn test_supplier_view_inlines_flag_and_logo() {
    let mut supplier: Supplier = create_test_supplier(1, Some("Tokyo"));
    supplier.country_code = Some(String::from("JP"));
    supplier.image = Some(String::from("/9j/abc"));

    let view: SupplierView = SupplierView::from(&supplier);

    assert_eq!(view.flag, "🇯🇵");
    assert_eq!(view.image_uri.as_deref(), Some("data:image/jpeg;base64,/9j/abc"));
}
