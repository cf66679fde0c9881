// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

//! The read-side core of the contract back office.
//!
//! Both halves are pure and fail soft: aggregation degrades to zero-filled
//! buckets and resolution to a fallback label, so a dangling reference can
//! never break a dashboard render.

pub mod dashboard;
pub mod resolve;

#[cfg(test)]
mod tests;

pub use dashboard::{
    COUNTRY_BUCKETS, ChartData, CountryBucket, MapPoint, OverviewStats, SeriesPoint,
    compute_chart_series, compute_overview_stats, country_bucket,
};
pub use resolve::{
    ContractView, DEFAULT_FLAG, DisbursementView, EquipmentView, PaymentView, ProgressStepView,
    ReceptionView, ReferenceTables, StaffView, SupplierView, UNDETERMINED, country_flag,
    image_data_uri, resolve_name,
};
