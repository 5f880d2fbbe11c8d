pub mod capability;
pub mod credentials;
pub mod raw_capability;
pub mod raw_price;
pub mod sku_record;

// Re-export commonly used types
pub use capability::{Capability, CapabilityValue};
pub use credentials::Credentials;
pub use raw_capability::{CapabilityPage, RawCapability, RawCapabilitySku};
pub use raw_price::{PricePage, RawPriceItem};
pub use sku_record::{SkuRecord, SpecSource};
