use std::collections::HashMap;

use super::parser;
use super::resolver::{self, ResolvedSpecs};
use crate::models::capability::names;
use crate::models::{Capability, CapabilityValue, RawCapabilitySku, RawPriceItem, SkuRecord};

const TIER: &str = "Standard";

/// Join price rows with capability entries into display-ready records.
///
/// Each price row resolves its specs through the chain (feed entry, curated
/// table, name heuristics), then duplicate names collapse to the cheapest
/// row. First-seen order is preserved; a cheaper duplicate replaces the
/// earlier record in place and a price tie keeps the first row.
pub fn merge(
    price_items: &[RawPriceItem],
    capability_map: &HashMap<String, RawCapabilitySku>,
) -> Vec<SkuRecord> {
    let chain = resolver::standard_chain(capability_map);

    let mut records: Vec<SkuRecord> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for item in price_items {
        let specs = resolver::resolve_specs(&chain, item);
        let record = build_record(item, specs);

        match by_name.get(&record.name) {
            None => {
                by_name.insert(record.name.clone(), records.len());
                records.push(record);
            }
            Some(&index) => {
                let existing = records[index].price_per_hour().unwrap_or(0.0);
                let candidate = record.price_per_hour().unwrap_or(0.0);
                if candidate < existing {
                    records[index] = record;
                }
            }
        }
    }

    tracing::debug!(
        records = records.len(),
        price_rows = price_items.len(),
        "merged price and capability data"
    );
    records
}

fn build_record(item: &RawPriceItem, specs: ResolvedSpecs) -> SkuRecord {
    let is_spot = parser::is_spot(&item.arm_sku_name);
    let capabilities = vec![
        Capability::new(names::VCPUS, specs.vcpus),
        Capability::new(names::MEMORY_GB, specs.memory_gb),
        Capability::new(
            names::PRICE_PER_HOUR,
            CapabilityValue::known(item.retail_price.to_string()),
        ),
        Capability::new(names::IS_SPOT, CapabilityValue::from_bool(is_spot)),
        Capability::new(names::MAX_DATA_DISKS, specs.max_data_disks),
        Capability::new(names::MAX_NICS, specs.max_nics),
        Capability::new(names::ACCELERATED_NETWORKING, specs.accelerated_networking),
        Capability::new(names::PREMIUM_IO, specs.premium_io),
        Capability::new(names::EPHEMERAL_OS, specs.ephemeral_os),
        Capability::new(names::NESTED_VIRTUALIZATION, specs.nested_virtualization),
        Capability::new(names::ENCRYPTION_AT_HOST, specs.encryption_at_host),
    ];

    SkuRecord {
        name: item.arm_sku_name.clone(),
        family: specs.family.unwrap_or_else(|| "Unknown".to_string()),
        size: item.sku_name.clone(),
        tier: TIER.to_string(),
        locations: vec![item.arm_region_name.clone()],
        source: specs.source,
        capabilities,
    }
}
