// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Equipment, payments and capital disbursements.

use diesel::prelude::*;
use hopdong_domain::{
    Equipment, EquipmentInput, FundDisbursement, FundDisbursementInput, Payment, PaymentInput,
};

use crate::diesel_schema::{cap_von, thanh_toan, thiet_bi};
use crate::entity::{Entity, contract_owned, table_ops};

#[derive(Queryable, Selectable)]
#[diesel(table_name = thiet_bi)]
struct EquipmentRow {
    id: i64,
    hop_dong_id: i64,
    ten: String,
    loai_thiet_bi_id: Option<i64>,
    so_luong: Option<f64>,
    don_gia: Option<f64>,
    xuat_xu: Option<String>,
    ghi_chu: Option<String>,
}

impl From<EquipmentRow> for Equipment {
    fn from(row: EquipmentRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            name: row.ten,
            equipment_type_id: row.loai_thiet_bi_id,
            quantity: row.so_luong,
            unit_price: row.don_gia,
            origin: row.xuat_xu,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = thiet_bi, treat_none_as_null = true)]
struct EquipmentChanges<'a> {
    hop_dong_id: i64,
    ten: &'a str,
    loai_thiet_bi_id: Option<i64>,
    so_luong: Option<f64>,
    don_gia: Option<f64>,
    xuat_xu: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn equipment_changes(input: &EquipmentInput) -> EquipmentChanges<'_> {
    EquipmentChanges {
        hop_dong_id: input.contract_id,
        ten: input.name.trim(),
        loai_thiet_bi_id: input.equipment_type_id,
        so_luong: input.quantity,
        don_gia: input.unit_price,
        xuat_xu: input.origin.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Equipment {
    type Input = EquipmentInput;
    const LABEL: &'static str = "Equipment";

    table_ops!(read: thiet_bi, EquipmentRow);
    table_ops!(write: thiet_bi, equipment_changes);
    table_ops!(delete: thiet_bi);
}

contract_owned!(Equipment, thiet_bi, EquipmentRow);

#[derive(Queryable, Selectable)]
#[diesel(table_name = thanh_toan)]
struct PaymentRow {
    id: i64,
    hop_dong_id: i64,
    so_tien: Option<f64>,
    loai_tien_id: Option<i64>,
    phuong_thuc_thanh_toan_id: Option<i64>,
    loai_thanh_toan_id: Option<i64>,
    han_thanh_toan: Option<String>,
    da_thanh_toan: i32,
    ngay_thanh_toan: Option<String>,
    trang_thai: Option<String>,
    ghi_chu: Option<String>,
}

impl From<PaymentRow> for Payment {
    fn from(row: PaymentRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            amount: row.so_tien,
            currency_id: row.loai_tien_id,
            payment_method_id: row.phuong_thuc_thanh_toan_id,
            payment_type_id: row.loai_thanh_toan_id,
            due_date: row.han_thanh_toan,
            paid: row.da_thanh_toan != 0,
            paid_date: row.ngay_thanh_toan,
            status: row.trang_thai,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = thanh_toan, treat_none_as_null = true)]
struct PaymentChanges<'a> {
    hop_dong_id: i64,
    so_tien: Option<f64>,
    loai_tien_id: Option<i64>,
    phuong_thuc_thanh_toan_id: Option<i64>,
    loai_thanh_toan_id: Option<i64>,
    han_thanh_toan: Option<&'a str>,
    da_thanh_toan: i32,
    ngay_thanh_toan: Option<&'a str>,
    trang_thai: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn payment_changes(input: &PaymentInput) -> PaymentChanges<'_> {
    PaymentChanges {
        hop_dong_id: input.contract_id,
        so_tien: input.amount,
        loai_tien_id: input.currency_id,
        phuong_thuc_thanh_toan_id: input.payment_method_id,
        loai_thanh_toan_id: input.payment_type_id,
        han_thanh_toan: input.due_date.as_deref(),
        da_thanh_toan: i32::from(input.paid),
        ngay_thanh_toan: input.paid_date.as_deref(),
        trang_thai: input.status.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for Payment {
    type Input = PaymentInput;
    const LABEL: &'static str = "Payment";

    table_ops!(read: thanh_toan, PaymentRow, order: (thanh_toan::han_thanh_toan, thanh_toan::id));
    table_ops!(write: thanh_toan, payment_changes);
    table_ops!(delete: thanh_toan);
}

contract_owned!(
    Payment,
    thanh_toan,
    PaymentRow,
    order: (thanh_toan::han_thanh_toan, thanh_toan::id)
);

#[derive(Queryable, Selectable)]
#[diesel(table_name = cap_von)]
struct DisbursementRow {
    id: i64,
    hop_dong_id: i64,
    so_tien: Option<f64>,
    loai_tien_id: Option<i64>,
    loai_ngan_sach_id: Option<i64>,
    ngay_cap: Option<String>,
    ghi_chu: Option<String>,
}

impl From<DisbursementRow> for FundDisbursement {
    fn from(row: DisbursementRow) -> Self {
        Self {
            id: row.id,
            contract_id: row.hop_dong_id,
            amount: row.so_tien,
            currency_id: row.loai_tien_id,
            budget_type_id: row.loai_ngan_sach_id,
            disbursed_date: row.ngay_cap,
            note: row.ghi_chu,
        }
    }
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = cap_von, treat_none_as_null = true)]
struct DisbursementChanges<'a> {
    hop_dong_id: i64,
    so_tien: Option<f64>,
    loai_tien_id: Option<i64>,
    loai_ngan_sach_id: Option<i64>,
    ngay_cap: Option<&'a str>,
    ghi_chu: Option<&'a str>,
}

fn disbursement_changes(input: &FundDisbursementInput) -> DisbursementChanges<'_> {
    DisbursementChanges {
        hop_dong_id: input.contract_id,
        so_tien: input.amount,
        loai_tien_id: input.currency_id,
        loai_ngan_sach_id: input.budget_type_id,
        ngay_cap: input.disbursed_date.as_deref(),
        ghi_chu: input.note.as_deref(),
    }
}

impl Entity for FundDisbursement {
    type Input = FundDisbursementInput;
    const LABEL: &'static str = "Fund disbursement";

    table_ops!(read: cap_von, DisbursementRow);
    table_ops!(write: cap_von, disbursement_changes);
    table_ops!(delete: cap_von);
}

contract_owned!(FundDisbursement, cap_von, DisbursementRow);
