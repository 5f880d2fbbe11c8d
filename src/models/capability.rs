use std::fmt;

use serde::{Deserialize, Serialize};

/// Capability names as they appear on merged catalog records.
pub mod names {
    pub const VCPUS: &str = "vCPUs";
    pub const MEMORY_GB: &str = "MemoryGB";
    pub const PRICE_PER_HOUR: &str = "PricePerHour";
    pub const IS_SPOT: &str = "IsSpot";
    pub const MAX_DATA_DISKS: &str = "MaxDataDiskCount";
    pub const MAX_NICS: &str = "MaxNetworkInterfaces";
    pub const ACCELERATED_NETWORKING: &str = "AcceleratedNetworking";
    pub const PREMIUM_IO: &str = "PremiumIO";
    pub const EPHEMERAL_OS: &str = "EphemeralOS";
    pub const NESTED_VIRTUALIZATION: &str = "NestedVirtualization";
    pub const ENCRYPTION_AT_HOST: &str = "EncryptionAtHost";
}

/// Capability names as the resource SKU feed reports them. Some differ from
/// the record-side names above (`AcceleratedNetworkingEnabled` vs
/// `AcceleratedNetworking`), so the mapping lives here in one place.
pub mod feed_names {
    pub const VCPUS: &str = "vCPUs";
    pub const MEMORY_GB: &str = "MemoryGB";
    pub const MAX_DATA_DISKS: &str = "MaxDataDiskCount";
    pub const MAX_NICS: &str = "MaxNetworkInterfaces";
    pub const ACCELERATED_NETWORKING: &str = "AcceleratedNetworkingEnabled";
    pub const PREMIUM_IO: &str = "PremiumIO";
    pub const EPHEMERAL_OS: &str = "EphemeralOSDiskSupported";
    pub const NESTED_VIRTUALIZATION: &str = "NestedVirtualizationSupport";
    pub const ENCRYPTION_AT_HOST: &str = "EncryptionAtHostSupported";
}

/// A single named capability of a SKU, e.g. `vCPUs` or `PremiumIO`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Capability {
    pub name: String,
    pub value: CapabilityValue,
}

impl Capability {
    pub fn new(name: &str, value: CapabilityValue) -> Self {
        Self {
            name: name.to_string(),
            value,
        }
    }
}

/// Capability value that keeps "known to be X" distinct from "not available".
///
/// Values are carried as strings the way the resource SKU feed reports them
/// ("4", "3.5", "True"). A known value serializes as its JSON string and the
/// unavailable sentinel as JSON `null`, so downstream consumers can never
/// mistake missing data for a real value.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CapabilityValue {
    Known(String),
    Unavailable,
}

impl CapabilityValue {
    pub fn known(value: impl Into<String>) -> Self {
        CapabilityValue::Known(value.into())
    }

    /// Boolean capabilities use the feed's `True`/`False` spelling.
    pub fn from_bool(value: bool) -> Self {
        CapabilityValue::Known(if value { "True" } else { "False" }.to_string())
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, CapabilityValue::Unavailable)
    }

    /// True only for a known, affirmative value.
    pub fn is_true(&self) -> bool {
        match self {
            CapabilityValue::Known(v) => v.eq_ignore_ascii_case("true"),
            CapabilityValue::Unavailable => false,
        }
    }

    /// Numeric reading of a known value, `None` when unavailable or
    /// not a number.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            CapabilityValue::Known(v) => v.parse::<f64>().ok(),
            CapabilityValue::Unavailable => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CapabilityValue::Known(v) => Some(v.as_str()),
            CapabilityValue::Unavailable => None,
        }
    }
}

impl fmt::Display for CapabilityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapabilityValue::Known(v) => write!(f, "{}", v),
            CapabilityValue::Unavailable => write!(f, "N/A"),
        }
    }
}
