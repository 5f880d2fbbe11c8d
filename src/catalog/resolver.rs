use std::collections::HashMap;

use super::known_skus;
use super::parser;
use crate::models::capability::feed_names;
use crate::models::{CapabilityValue, RawCapabilitySku, RawPriceItem, SpecSource};

/// Fully resolved spec fields for one price row, ready to merge.
#[derive(Debug, Clone)]
pub struct ResolvedSpecs {
    pub source: SpecSource,
    pub family: Option<String>,
    pub vcpus: CapabilityValue,
    pub memory_gb: CapabilityValue,
    pub max_data_disks: CapabilityValue,
    pub max_nics: CapabilityValue,
    pub accelerated_networking: CapabilityValue,
    pub premium_io: CapabilityValue,
    pub ephemeral_os: CapabilityValue,
    pub nested_virtualization: CapabilityValue,
    pub encryption_at_host: CapabilityValue,
}

/// One tier of the spec resolution chain. Tiers are tried in order and the
/// first that produces specs wins.
pub trait SpecResolver {
    fn name(&self) -> &'static str;
    fn resolve(&self, item: &RawPriceItem) -> Option<ResolvedSpecs>;
}

/// Resolves from the authenticated resource SKU feed.
pub struct ApiResolver<'a> {
    skus: &'a HashMap<String, RawCapabilitySku>,
}

impl<'a> ApiResolver<'a> {
    pub fn new(skus: &'a HashMap<String, RawCapabilitySku>) -> Self {
        Self { skus }
    }
}

impl SpecResolver for ApiResolver<'_> {
    fn name(&self) -> &'static str {
        "api"
    }

    fn resolve(&self, item: &RawPriceItem) -> Option<ResolvedSpecs> {
        let sku = self.skus.get(&item.arm_sku_name)?;

        // A field missing from a feed-listed SKU reads as zero or False.
        // Heuristics never fill gaps inside authoritative entries.
        let numeric = |name: &str| CapabilityValue::known(sku.capability(name).unwrap_or("0"));
        let boolean = |name: &str| CapabilityValue::known(sku.capability(name).unwrap_or("False"));

        Some(ResolvedSpecs {
            source: SpecSource::Api,
            family: sku.family.clone().filter(|f| !f.is_empty()),
            vcpus: numeric(feed_names::VCPUS),
            memory_gb: numeric(feed_names::MEMORY_GB),
            max_data_disks: numeric(feed_names::MAX_DATA_DISKS),
            max_nics: numeric(feed_names::MAX_NICS),
            accelerated_networking: boolean(feed_names::ACCELERATED_NETWORKING),
            premium_io: boolean(feed_names::PREMIUM_IO),
            ephemeral_os: boolean(feed_names::EPHEMERAL_OS),
            nested_virtualization: boolean(feed_names::NESTED_VIRTUALIZATION),
            encryption_at_host: boolean(feed_names::ENCRYPTION_AT_HOST),
        })
    }
}

/// Resolves from the curated table of common sizes.
pub struct KnownSkuResolver;

impl SpecResolver for KnownSkuResolver {
    fn name(&self) -> &'static str {
        "known-sku"
    }

    fn resolve(&self, item: &RawPriceItem) -> Option<ResolvedSpecs> {
        let spec = known_skus::lookup(&item.arm_sku_name)?;
        let name = &item.arm_sku_name;
        let class = parser::classify_family(name);
        let features = parser::infer_features(name, class, Some(spec.vcpus));

        Some(ResolvedSpecs {
            source: SpecSource::KnownSku,
            family: Some(spec.family.to_string()),
            vcpus: CapabilityValue::known(spec.vcpus.to_string()),
            memory_gb: CapabilityValue::known(spec.memory_gb.to_string()),
            max_data_disks: CapabilityValue::known(parser::max_data_disks(spec.vcpus).to_string()),
            max_nics: CapabilityValue::known(parser::max_nics(spec.vcpus).to_string()),
            accelerated_networking: CapabilityValue::from_bool(features.accelerated_networking),
            premium_io: CapabilityValue::from_bool(features.premium_io),
            ephemeral_os: CapabilityValue::from_bool(features.ephemeral_os),
            nested_virtualization: CapabilityValue::from_bool(features.nested_virtualization),
            // No naming signal exists for encryption at host.
            encryption_at_host: CapabilityValue::Unavailable,
        })
    }
}

/// Last-resort inference from the SKU name alone. Always resolves.
pub struct HeuristicResolver;

impl SpecResolver for HeuristicResolver {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn resolve(&self, item: &RawPriceItem) -> Option<ResolvedSpecs> {
        Some(infer_specs(item))
    }
}

/// Name-only inference. Total: any field the name does not support stays
/// unavailable instead of defaulting to zero.
pub fn infer_specs(item: &RawPriceItem) -> ResolvedSpecs {
    let name = &item.arm_sku_name;
    let class = parser::classify_family(name);
    let vcpus = parser::extract_vcpus(name);
    let features = parser::infer_features(name, class, vcpus);

    let known_or_unavailable = |value: Option<String>| match value {
        Some(v) => CapabilityValue::Known(v),
        None => CapabilityValue::Unavailable,
    };

    ResolvedSpecs {
        source: SpecSource::Inferred,
        family: Some(class.label().to_string()),
        vcpus: known_or_unavailable(vcpus.map(|v| v.to_string())),
        memory_gb: known_or_unavailable(
            vcpus
                .and_then(|v| parser::memory_gb_for(class, v, name))
                .map(|m| m.to_string()),
        ),
        max_data_disks: known_or_unavailable(
            vcpus.map(|v| parser::max_data_disks(v).to_string()),
        ),
        max_nics: known_or_unavailable(vcpus.map(|v| parser::max_nics(v).to_string())),
        accelerated_networking: CapabilityValue::from_bool(features.accelerated_networking),
        premium_io: CapabilityValue::from_bool(features.premium_io),
        ephemeral_os: CapabilityValue::from_bool(features.ephemeral_os),
        nested_virtualization: CapabilityValue::from_bool(features.nested_virtualization),
        encryption_at_host: CapabilityValue::Unavailable,
    }
}

/// The standard resolution order: feed entry, curated table, name
/// heuristics.
pub fn standard_chain(
    skus: &HashMap<String, RawCapabilitySku>,
) -> Vec<Box<dyn SpecResolver + '_>> {
    vec![
        Box::new(ApiResolver::new(skus)),
        Box::new(KnownSkuResolver),
        Box::new(HeuristicResolver),
    ]
}

/// Run a chain over one price row, falling back to pure inference when
/// no tier claims it.
pub fn resolve_specs(chain: &[Box<dyn SpecResolver + '_>], item: &RawPriceItem) -> ResolvedSpecs {
    for resolver in chain {
        if let Some(specs) = resolver.resolve(item) {
            tracing::trace!(sku = %item.arm_sku_name, tier = resolver.name(), "specs resolved");
            return specs;
        }
    }
    infer_specs(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawCapability;

    fn price_item(name: &str) -> RawPriceItem {
        RawPriceItem {
            arm_sku_name: name.to_string(),
            arm_region_name: "westeurope".to_string(),
            sku_name: name.replace("Standard_", "").replace('_', " "),
            retail_price: 0.1,
        }
    }

    fn feed_sku(name: &str, caps: &[(&str, &str)]) -> RawCapabilitySku {
        RawCapabilitySku {
            name: name.to_string(),
            resource_type: "virtualMachines".to_string(),
            family: Some("standardDSv3Family".to_string()),
            capabilities: caps
                .iter()
                .map(|(n, v)| RawCapability {
                    name: n.to_string(),
                    value: v.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_feed_entry_wins_over_table_and_heuristics() {
        // Name is in the curated table and parseable, but the feed entry
        // must take priority with its own numbers.
        let mut map = HashMap::new();
        map.insert(
            "Standard_D2s_v3".to_string(),
            feed_sku("Standard_D2s_v3", &[("vCPUs", "2"), ("MemoryGB", "8")]),
        );
        let chain = standard_chain(&map);

        let specs = resolve_specs(&chain, &price_item("Standard_D2s_v3"));
        assert_eq!(specs.source, SpecSource::Api);
        assert_eq!(specs.vcpus, CapabilityValue::known("2"));
        assert_eq!(specs.family.as_deref(), Some("standardDSv3Family"));
    }

    #[test]
    fn test_feed_entry_zero_fills_missing_fields() {
        let mut map = HashMap::new();
        map.insert(
            "Standard_D2s_v3".to_string(),
            feed_sku("Standard_D2s_v3", &[("vCPUs", "2")]),
        );
        let chain = standard_chain(&map);

        let specs = resolve_specs(&chain, &price_item("Standard_D2s_v3"));
        assert_eq!(specs.memory_gb, CapabilityValue::known("0"));
        assert_eq!(specs.premium_io, CapabilityValue::known("False"));
        assert_eq!(specs.encryption_at_host, CapabilityValue::known("False"));
    }

    #[test]
    fn test_table_covers_absent_feed_entry() {
        let map = HashMap::new();
        let chain = standard_chain(&map);

        let specs = resolve_specs(&chain, &price_item("Standard_D2s_v5"));
        assert_eq!(specs.source, SpecSource::KnownSku);
        assert_eq!(specs.vcpus, CapabilityValue::known("2"));
        assert_eq!(specs.memory_gb, CapabilityValue::known("8"));
        assert_eq!(specs.family.as_deref(), Some("D v5 Series"));
        // The table knows nothing about host encryption.
        assert_eq!(specs.encryption_at_host, CapabilityValue::Unavailable);
    }

    #[test]
    fn test_heuristics_cover_everything_else() {
        let map = HashMap::new();
        let chain = standard_chain(&map);

        let specs = resolve_specs(&chain, &price_item("Standard_F48s_v6"));
        assert_eq!(specs.source, SpecSource::Inferred);
        assert_eq!(specs.vcpus, CapabilityValue::known("48"));
        assert_eq!(specs.memory_gb, CapabilityValue::known("96"));
        assert_eq!(specs.family.as_deref(), Some("Compute Optimized"));
        assert_eq!(specs.max_data_disks, CapabilityValue::known("64"));
        assert_eq!(specs.max_nics, CapabilityValue::known("8"));
    }

    #[test]
    fn test_unparseable_name_stays_unavailable() {
        let map = HashMap::new();
        let chain = standard_chain(&map);

        let specs = resolve_specs(&chain, &price_item("Mystery_Size"));
        assert_eq!(specs.source, SpecSource::Inferred);
        assert_eq!(specs.vcpus, CapabilityValue::Unavailable);
        assert_eq!(specs.memory_gb, CapabilityValue::Unavailable);
        assert_eq!(specs.max_data_disks, CapabilityValue::Unavailable);
        assert_eq!(specs.max_nics, CapabilityValue::Unavailable);
        assert_eq!(specs.family.as_deref(), Some("Unknown"));
    }
}
