pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod query;

// Re-export the types most callers need
pub use cache::{CacheEntry, CacheStore, DiskCache, MemoryCache};
pub use catalog::{merge, CatalogConfig, CatalogService};
pub use error::CatalogError;
pub use models::{Capability, CapabilityValue, RawCapabilitySku, RawPriceItem, SkuRecord, SpecSource};
pub use query::{
    run_query, CatalogSession, FilterOptions, QueryPage, SortConfig, SortDirection, SortKey,
};
