use serde::{Deserialize, Serialize};

use crate::models::capability::{names, Capability, CapabilityValue};

/// Which tier of the resolution chain produced a record's spec fields.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SpecSource {
    /// Authoritative resource SKU feed.
    Api,
    /// Hand-maintained table of common sizes.
    KnownSku,
    /// Heuristics over the SKU name.
    Inferred,
}

impl SpecSource {
    pub fn label(&self) -> &'static str {
        match self {
            SpecSource::Api => "api",
            SpecSource::KnownSku => "table",
            SpecSource::Inferred => "inferred",
        }
    }
}

/// One virtual machine size in one region, merged from the retail price
/// and resource SKU feeds.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SkuRecord {
    pub name: String,
    pub family: String,
    pub size: String,
    pub tier: String,
    pub locations: Vec<String>,
    pub source: SpecSource,
    pub capabilities: Vec<Capability>,
}

impl SkuRecord {
    pub fn capability(&self, name: &str) -> Option<&CapabilityValue> {
        self.capabilities
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.value)
    }

    pub fn numeric_capability(&self, name: &str) -> Option<f64> {
        self.capability(name).and_then(|v| v.as_numeric())
    }

    /// True only when the capability is present and affirmatively set.
    pub fn feature_enabled(&self, name: &str) -> bool {
        self.capability(name).map(|v| v.is_true()).unwrap_or(false)
    }

    pub fn price_per_hour(&self) -> Option<f64> {
        self.numeric_capability(names::PRICE_PER_HOUR)
    }
}
