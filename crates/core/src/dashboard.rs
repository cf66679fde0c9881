// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard statistics and chart series.
//!
//! Every function here is a full-table, point-in-time snapshot over slices
//! that the caller has already loaded. Missing or dangling references never
//! fail: the affected rows simply do not land in any bucket.

use std::collections::HashMap;

use hopdong_domain::{
    Contract, ContractStatus, Document, Equipment, LookupRow, Payment, PaymentStatus,
    ProgressStatus, ProgressStep, Supplier,
};
use serde::{Deserialize, Serialize};

/// The flat statistics shown at the top of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_contracts: usize,
    pub active_contracts: usize,
    pub completed_contracts: usize,
    pub paused_contracts: usize,
    /// Sum of contract values; a missing value counts as zero.
    pub total_value: f64,
    pub total_payments: usize,
    pub pending_payments: usize,
    pub completed_payments: usize,
    pub total_equipment: usize,
    pub total_documents: usize,
    pub total_progress_steps: usize,
    pub completed_steps: usize,
    pub in_progress_steps: usize,
    pub pending_steps: usize,
}

/// One category of a chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub name: String,
    pub value: usize,
}

impl SeriesPoint {
    fn new(name: &str, value: usize) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// A country marker on the world map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub name: String,
    /// `[longitude, latitude]`.
    pub coordinates: [f64; 2],
    /// Contracts whose supplier is located in this country.
    pub count: usize,
}

/// Every chart series on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub contracts_by_type: Vec<SeriesPoint>,
    pub contracts_by_status: Vec<SeriesPoint>,
    pub payment_status: Vec<SeriesPoint>,
    pub progress_status: Vec<SeriesPoint>,
    pub suppliers_by_country: Vec<SeriesPoint>,
    pub world_map: Vec<MapPoint>,
}

/// A country recognised in supplier addresses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryBucket {
    pub name: &'static str,
    /// Lower-case words or phrases; an address containing any of them as a
    /// whole word belongs here.
    pub patterns: &'static [&'static str],
    pub longitude: f64,
    pub latitude: f64,
}

/// The canonical country table, in display order.
///
/// Matching is first-hit, so more specific fragments must come before
/// fragments they contain.
pub const COUNTRY_BUCKETS: &[CountryBucket] = &[
    CountryBucket {
        name: "Việt Nam",
        patterns: &[
            "việt nam",
            "vietnam",
            "viet nam",
            "hà nội",
            "hanoi",
            "ha noi",
            "hồ chí minh",
            "ho chi minh",
            "hải phòng",
            "đà nẵng",
        ],
        longitude: 105.8342,
        latitude: 21.0278,
    },
    CountryBucket {
        name: "Trung Quốc",
        patterns: &[
            "trung quốc",
            "china",
            "bắc kinh",
            "beijing",
            "thượng hải",
            "shanghai",
            "quảng châu",
            "guangzhou",
            "shenzhen",
        ],
        longitude: 116.4074,
        latitude: 39.9042,
    },
    CountryBucket {
        name: "Hoa Kỳ",
        patterns: &["hoa kỳ", "united states", "usa", "u.s.a", "new york", "california"],
        longitude: -77.0369,
        latitude: 38.9072,
    },
    CountryBucket {
        name: "Singapore",
        patterns: &["singapore"],
        longitude: 103.8198,
        latitude: 1.3521,
    },
    CountryBucket {
        name: "Tây Ban Nha",
        patterns: &["tây ban nha", "spain", "españa", "madrid", "barcelona"],
        longitude: -3.7038,
        latitude: 40.4168,
    },
    CountryBucket {
        name: "Italy",
        patterns: &["italy", "italia", "milan", "rome", "roma"],
        longitude: 12.4964,
        latitude: 41.9028,
    },
    CountryBucket {
        name: "Thái Lan",
        patterns: &["thái lan", "thailand", "bangkok"],
        longitude: 100.5018,
        latitude: 13.7563,
    },
    CountryBucket {
        name: "Malaysia",
        patterns: &["malaysia", "kuala lumpur"],
        longitude: 101.6869,
        latitude: 3.1390,
    },
    CountryBucket {
        name: "Nhật Bản",
        patterns: &["nhật bản", "japan", "tokyo", "osaka"],
        longitude: 139.6917,
        latitude: 35.6895,
    },
    CountryBucket {
        name: "Hàn Quốc",
        patterns: &["hàn quốc", "korea", "seoul", "busan"],
        longitude: 126.9780,
        latitude: 37.5665,
    },
    CountryBucket {
        name: "Đức",
        patterns: &["germany", "deutschland", "berlin", "munich", "münchen", "hamburg"],
        longitude: 13.4050,
        latitude: 52.5200,
    },
    CountryBucket {
        name: "Pháp",
        patterns: &["france", "paris", "lyon"],
        longitude: 2.3522,
        latitude: 48.8566,
    },
    CountryBucket {
        name: "Anh",
        patterns: &["united kingdom", "vương quốc anh", "england", "london"],
        longitude: -0.1276,
        latitude: 51.5072,
    },
];

/// Finds the country bucket an address belongs to.
///
/// Matching is case-insensitive and word-bounded: `rome` matches
/// "Rome, Italy" but not "Jerome Avenue". The first bucket with a hit wins.
#[must_use]
pub fn country_bucket(address: &str) -> Option<usize> {
    let address: String = address.to_lowercase();
    COUNTRY_BUCKETS.iter().position(|bucket| {
        bucket
            .patterns
            .iter()
            .any(|pattern| contains_word(&address, pattern))
    })
}

/// Whether `pattern` occurs in `text` with no letter or digit running into
/// either end of it.
fn contains_word(text: &str, pattern: &str) -> bool {
    text.match_indices(pattern).any(|(start, found)| {
        let before: Option<char> = text[..start].chars().next_back();
        let after: Option<char> = text[start + found.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

/// Computes the dashboard overview statistics.
///
/// Contract buckets use exact status-id equality; contracts with a missing
/// or unknown status id count towards `total_contracts` only. Payment and
/// progress buckets read the free-text status, so rows without a status
/// count towards their totals only.
#[must_use]
pub fn compute_overview_stats(
    contracts: &[Contract],
    payments: &[Payment],
    equipment: &[Equipment],
    documents: &[Document],
    progress_steps: &[ProgressStep],
) -> OverviewStats {
    let mut stats: OverviewStats = OverviewStats {
        total_contracts: contracts.len(),
        total_payments: payments.len(),
        total_equipment: equipment.len(),
        total_documents: documents.len(),
        total_progress_steps: progress_steps.len(),
        ..OverviewStats::default()
    };

    for contract in contracts {
        stats.total_value += contract.value_or_zero();
        match contract.status() {
            Some(ContractStatus::Active) => stats.active_contracts += 1,
            Some(ContractStatus::Completed) => stats.completed_contracts += 1,
            Some(ContractStatus::Paused) => stats.paused_contracts += 1,
            None => {}
        }
    }

    for payment in payments {
        match payment.parsed_status() {
            Some(PaymentStatus::Unpaid) => stats.pending_payments += 1,
            Some(PaymentStatus::Paid) => stats.completed_payments += 1,
            None => {}
        }
    }

    for step in progress_steps {
        match step.parsed_status() {
            Some(ProgressStatus::Completed) => stats.completed_steps += 1,
            Some(ProgressStatus::InProgress) => stats.in_progress_steps += 1,
            Some(ProgressStatus::Pending) => stats.pending_steps += 1,
            Some(ProgressStatus::Paused) | None => {}
        }
    }

    stats
}

/// Computes every chart series on the dashboard.
///
/// # Arguments
///
/// * `contract_types` - The contract type lookup rows; the by-type series has
///   exactly one point per row, in the given order
/// * `contracts` - All contracts
/// * `payments` - All payments
/// * `progress_steps` - All progress steps
/// * `suppliers` - All suppliers, bucketed by address
#[must_use]
pub fn compute_chart_series(
    contract_types: &[LookupRow],
    contracts: &[Contract],
    payments: &[Payment],
    progress_steps: &[ProgressStep],
    suppliers: &[Supplier],
) -> ChartData {
    let mut by_type: HashMap<i64, usize> = HashMap::new();
    for type_id in contracts.iter().filter_map(|c| c.contract_type_id) {
        *by_type.entry(type_id).or_default() += 1;
    }
    let contracts_by_type: Vec<SeriesPoint> = contract_types
        .iter()
        .map(|row| SeriesPoint::new(&row.name, by_type.get(&row.id).copied().unwrap_or(0)))
        .collect();

    let contracts_by_status: Vec<SeriesPoint> = ContractStatus::ALL
        .into_iter()
        .map(|status| {
            let count: usize = contracts
                .iter()
                .filter(|c| c.status() == Some(status))
                .count();
            SeriesPoint::new(status.label(), count)
        })
        .collect();

    let payment_status: Vec<SeriesPoint> = PaymentStatus::ALL
        .into_iter()
        .map(|status| {
            let count: usize = payments
                .iter()
                .filter(|p| p.parsed_status() == Some(status))
                .count();
            SeriesPoint::new(status.label(), count)
        })
        .collect();

    let progress_status: Vec<SeriesPoint> = [
        ProgressStatus::Completed,
        ProgressStatus::InProgress,
        ProgressStatus::Pending,
    ]
    .into_iter()
    .map(|status| {
        let count: usize = progress_steps
            .iter()
            .filter(|s| s.parsed_status() == Some(status))
            .count();
        SeriesPoint::new(status.label(), count)
    })
    .collect();

    let (suppliers_by_country, world_map) = country_series(contracts, suppliers);

    ChartData {
        contracts_by_type,
        contracts_by_status,
        payment_status,
        progress_status,
        suppliers_by_country,
        world_map,
    }
}

fn country_series(
    contracts: &[Contract],
    suppliers: &[Supplier],
) -> (Vec<SeriesPoint>, Vec<MapPoint>) {
    let mut supplier_bucket: HashMap<i64, usize> = HashMap::new();
    let mut supplier_counts: Vec<usize> = vec![0; COUNTRY_BUCKETS.len()];
    for supplier in suppliers {
        if let Some(bucket) = supplier.address.as_deref().and_then(country_bucket) {
            supplier_bucket.insert(supplier.id, bucket);
            supplier_counts[bucket] += 1;
        }
    }

    let mut contract_counts: Vec<usize> = vec![0; COUNTRY_BUCKETS.len()];
    for supplier_id in contracts.iter().filter_map(|c| c.supplier_id) {
        if let Some(&bucket) = supplier_bucket.get(&supplier_id) {
            contract_counts[bucket] += 1;
        }
    }

    let mut by_country: Vec<SeriesPoint> = Vec::new();
    let mut world_map: Vec<MapPoint> = Vec::new();
    for (index, bucket) in COUNTRY_BUCKETS.iter().enumerate() {
        if supplier_counts[index] == 0 {
            continue;
        }
        by_country.push(SeriesPoint::new(bucket.name, supplier_counts[index]));
        world_map.push(MapPoint {
            name: bucket.name.to_string(),
            coordinates: [bucket.longitude, bucket.latitude],
            count: contract_counts[index],
        });
    }

    (by_country, world_map)
}
