pub mod session;

use std::cmp::Ordering;
use std::str::FromStr;

use crate::models::capability::names;
use crate::models::SkuRecord;

// Re-export commonly used types
pub use session::{CatalogSession, FetchTicket};

/// Fixed page size for query results.
pub const PAGE_SIZE: usize = 25;

/// Sortable columns. Name and family compare lexicographically, the rest
/// numerically through the named capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Family,
    VCpus,
    MemoryGb,
    MaxDataDisks,
    MaxNics,
    PricePerHour,
}

impl SortKey {
    fn capability_name(&self) -> Option<&'static str> {
        match self {
            SortKey::Name | SortKey::Family => None,
            SortKey::VCpus => Some(names::VCPUS),
            SortKey::MemoryGb => Some(names::MEMORY_GB),
            SortKey::MaxDataDisks => Some(names::MAX_DATA_DISKS),
            SortKey::MaxNics => Some(names::MAX_NICS),
            SortKey::PricePerHour => Some(names::PRICE_PER_HOUR),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "family" => Ok(SortKey::Family),
            "vcpus" | "cpu" => Ok(SortKey::VCpus),
            "memory" | "ram" => Ok(SortKey::MemoryGb),
            "disks" => Ok(SortKey::MaxDataDisks),
            "nics" => Ok(SortKey::MaxNics),
            "price" => Ok(SortKey::PricePerHour),
            other => Err(format!(
                "unknown sort key '{}' (expected name, family, vcpus, memory, disks, nics, or price)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn ascending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: SortKey) -> Self {
        Self {
            key,
            direction: SortDirection::Descending,
        }
    }
}

impl Default for SortConfig {
    fn default() -> Self {
        Self::ascending(SortKey::VCpus)
    }
}

/// Boolean capabilities a filter can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureFilter {
    PremiumIo,
    EphemeralOs,
    AcceleratedNetworking,
    NestedVirtualization,
    EncryptionAtHost,
}

impl FeatureFilter {
    pub fn capability_name(&self) -> &'static str {
        match self {
            FeatureFilter::PremiumIo => names::PREMIUM_IO,
            FeatureFilter::EphemeralOs => names::EPHEMERAL_OS,
            FeatureFilter::AcceleratedNetworking => names::ACCELERATED_NETWORKING,
            FeatureFilter::NestedVirtualization => names::NESTED_VIRTUALIZATION,
            FeatureFilter::EncryptionAtHost => names::ENCRYPTION_AT_HOST,
        }
    }
}

impl FromStr for FeatureFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "premium-io" | "premiumio" => Ok(FeatureFilter::PremiumIo),
            "ephemeral-os" | "ephemeralos" => Ok(FeatureFilter::EphemeralOs),
            "accelerated-networking" | "accelnet" => Ok(FeatureFilter::AcceleratedNetworking),
            "nested-virtualization" | "nestedvirt" => Ok(FeatureFilter::NestedVirtualization),
            "encryption-at-host" | "encryption" => Ok(FeatureFilter::EncryptionAtHost),
            other => Err(format!(
                "unknown feature '{}' (expected premium-io, ephemeral-os, accelerated-networking, \
                 nested-virtualization, or encryption-at-host)",
                other
            )),
        }
    }
}

/// Conjunctive filters over the record set. Unset or zero minimums are
/// inactive; an unavailable value fails every active minimum.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    pub min_cpu: Option<u32>,
    pub min_ram: Option<f64>,
    pub min_disks: Option<u32>,
    pub min_nics: Option<u32>,
    pub family: Option<String>,
    pub features: Vec<FeatureFilter>,
}

/// One page of query results.
#[derive(Debug, Clone)]
pub struct QueryPage {
    pub items: Vec<SkuRecord>,
    pub page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

/// Filter, sort, and slice records into one page. The requested page is
/// clamped to `[1, total_pages]`; an empty result still reports one page.
pub fn run_query(
    records: &[SkuRecord],
    filters: &FilterOptions,
    sort: &SortConfig,
    page: usize,
) -> QueryPage {
    let mut filtered: Vec<&SkuRecord> = records
        .iter()
        .filter(|record| matches_filters(record, filters))
        .collect();

    // sort_by is stable, so equal keys keep their original relative order.
    filtered.sort_by(|a, b| compare_records(a, b, sort));

    let total_records = filtered.len();
    let total_pages = total_pages_for(total_records);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * PAGE_SIZE;

    let items = filtered
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .cloned()
        .collect();

    QueryPage {
        items,
        page,
        total_pages,
        total_records,
    }
}

pub(crate) fn total_pages_for(record_count: usize) -> usize {
    ((record_count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

pub(crate) fn matches_filters(record: &SkuRecord, filters: &FilterOptions) -> bool {
    if !passes_min(record, names::VCPUS, filters.min_cpu.map(f64::from)) {
        return false;
    }
    if !passes_min(record, names::MEMORY_GB, filters.min_ram) {
        return false;
    }
    if !passes_min(
        record,
        names::MAX_DATA_DISKS,
        filters.min_disks.map(f64::from),
    ) {
        return false;
    }
    if !passes_min(record, names::MAX_NICS, filters.min_nics.map(f64::from)) {
        return false;
    }

    if let Some(family) = &filters.family {
        if !record.family.eq_ignore_ascii_case(family) {
            return false;
        }
    }

    filters
        .features
        .iter()
        .all(|feature| record.feature_enabled(feature.capability_name()))
}

fn passes_min(record: &SkuRecord, capability: &str, minimum: Option<f64>) -> bool {
    match minimum {
        Some(min) if min > 0.0 => match record.numeric_capability(capability) {
            Some(value) => value >= min,
            // Unavailable never passes an active minimum.
            None => false,
        },
        _ => true,
    }
}

fn compare_records(a: &SkuRecord, b: &SkuRecord, sort: &SortConfig) -> Ordering {
    let ordering = match sort.key {
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::Family => a.family.cmp(&b.family),
        key => compare_numeric(a, b, key),
    };

    match sort.direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

/// Unavailable sorts below every real value ascending, which places it
/// above every real value once a descending sort reverses the ordering.
fn compare_numeric(a: &SkuRecord, b: &SkuRecord, key: SortKey) -> Ordering {
    let capability = match key.capability_name() {
        Some(name) => name,
        None => return Ordering::Equal,
    };

    match (
        a.numeric_capability(capability),
        b.numeric_capability(capability),
    ) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}
