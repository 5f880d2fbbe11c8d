use serde::{Deserialize, Serialize};

/// A name/value pair as the resource SKU feed reports capabilities.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct RawCapability {
    pub name: String,
    pub value: String,
}

/// One entry of the resource SKU feed. Only entries with
/// `resourceType == "virtualMachines"` are retained.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawCapabilitySku {
    pub name: String,
    #[serde(default)]
    pub resource_type: String,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub capabilities: Vec<RawCapability>,
}

impl RawCapabilitySku {
    pub fn capability(&self, name: &str) -> Option<&str> {
        self.capabilities
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.value.as_str())
    }
}

/// One page of the resource SKU feed. Pagination follows `nextLink`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityPage {
    #[serde(default)]
    pub value: Vec<RawCapabilitySku>,
    #[serde(default)]
    pub next_link: Option<String>,
}
