// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Suppliers, investors and staff.
//!
//! Contracts refer to these by plain integer columns, so deleting one is
//! always allowed and leaves the referring contracts with a dangling id.

use diesel::prelude::*;
use hopdong_domain::{Investor, InvestorInput, Staff, StaffInput, Supplier, SupplierInput};

use crate::diesel_schema::{can_bo, chu_dau_tu, nha_cung_cap};
use crate::entity::{Entity, table_ops};

#[derive(Queryable, Selectable)]
#[diesel(table_name = nha_cung_cap)]
struct SupplierRow {
    id: i64,
    ten: String,
    dia_chi: Option<String>,
    ma_quoc_gia: Option<String>,
    dien_thoai: Option<String>,
    email: Option<String>,
    anh: Option<String>,
    ghi_chu: Option<String>,
}

impl From<SupplierRow> for Supplier {
    fn from(row: SupplierRow) -> Self {
        Self {
            id: row.id,
            name: row.ten,
            address: row.dia_chi,
            country_code: row.ma_quoc_gia,
            phone: row.dien_thoai,
            email: row.email,
            image: row.anh,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = nha_cung_cap, treat_none_as_null = true)]
struct SupplierChanges<'a> {
    ten: &'a str,
    dia_chi: Option<&'a str>,
    ma_quoc_gia: Option<String>,
    dien_thoai: Option<&'a str>,
    email: Option<&'a str>,
    anh: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn supplier_changes(input: &SupplierInput) -> SupplierChanges<'_> {
    SupplierChanges {
        ten: input.name.trim(),
        dia_chi: input.address.as_deref(),
        ma_quoc_gia: input.country_code.as_deref().map(str::to_uppercase),
        dien_thoai: input.phone.as_deref(),
        email: input.email.as_deref(),
        anh: input.image.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Supplier {
    type Input = SupplierInput;
    const LABEL: &'static str = "Supplier";

    table_ops!(read: nha_cung_cap, SupplierRow);
    table_ops!(write: nha_cung_cap, supplier_changes);
    table_ops!(delete: nha_cung_cap);
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = chu_dau_tu)]
struct InvestorRow {
    id: i64,
    ten: String,
    dia_chi: Option<String>,
    dien_thoai: Option<String>,
    email: Option<String>,
    ghi_chu: Option<String>,
}

impl From<InvestorRow> for Investor {
    fn from(row: InvestorRow) -> Self {
        Self {
            id: row.id,
            name: row.ten,
            address: row.dia_chi,
            phone: row.dien_thoai,
            email: row.email,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = chu_dau_tu, treat_none_as_null = true)]
struct InvestorChanges<'a> {
    ten: &'a str,
    dia_chi: Option<&'a str>,
    dien_thoai: Option<&'a str>,
    email: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn investor_changes(input: &InvestorInput) -> InvestorChanges<'_> {
    InvestorChanges {
        ten: input.name.trim(),
        dia_chi: input.address.as_deref(),
        dien_thoai: input.phone.as_deref(),
        email: input.email.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Investor {
    type Input = InvestorInput;
    const LABEL: &'static str = "Investor";

    table_ops!(read: chu_dau_tu, InvestorRow);
    table_ops!(write: chu_dau_tu, investor_changes);
    table_ops!(delete: chu_dau_tu);
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = can_bo)]
struct StaffRow {
    id: i64,
    ten: String,
    chuc_vu: Option<String>,
    dien_thoai: Option<String>,
    email: Option<String>,
    anh: Option<String>,
}

impl From<StaffRow> for Staff {
    fn from(row: StaffRow) -> Self {
        Self {
            id: row.id,
            name: row.ten,
            position: row.chuc_vu,
            phone: row.dien_thoai,
            email: row.email,
            image: row.anh,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = can_bo, treat_none_as_null = true)]
struct StaffChanges<'a> {
    ten: &'a str,
    chuc_vu: Option<&'a str>,
    dien_thoai: Option<&'a str>,
    email: Option<&'a str>,
    anh: Option<&'a str>,
}

fn staff_changes(input: &StaffInput) -> StaffChanges<'_> {
    StaffChanges {
        ten: input.name.trim(),
        chuc_vu: input.position.as_deref(),
        dien_thoai: input.phone.as_deref(),
        email: input.email.as_deref(),
        anh: input.image.as_deref(),
    }
}

impl Entity for Staff {
    type Input = StaffInput;
    const LABEL: &'static str = "Staff";

    table_ops!(read: can_bo, StaffRow);
    table_ops!(write: can_bo, staff_changes);
    table_ops!(delete: can_bo);
}
