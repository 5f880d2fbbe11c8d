pub mod disk;
pub mod memory;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::SkuRecord;

// Re-export commonly used types
pub use disk::DiskCache;
pub use memory::MemoryCache;

/// Cached records stay fresh for a day.
pub const CACHE_TTL_MS: i64 = 24 * 60 * 60 * 1000;

/// A region's merged records plus the moment they were fetched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CacheEntry {
    /// Unix epoch milliseconds at fetch time.
    pub timestamp: i64,
    pub data: Vec<SkuRecord>,
}

impl CacheEntry {
    pub fn new(timestamp: i64, data: Vec<SkuRecord>) -> Self {
        Self { timestamp, data }
    }

    pub fn now(data: Vec<SkuRecord>) -> Self {
        Self::new(Utc::now().timestamp_millis(), data)
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis().saturating_sub(self.timestamp) >= CACHE_TTL_MS
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

/// Region-keyed persistence for merged records.
pub trait CacheStore: Send + Sync {
    fn get(&self, region: &str) -> Result<Option<CacheEntry>, CatalogError>;
    fn put(&self, region: &str, entry: &CacheEntry) -> Result<(), CatalogError>;
    fn remove(&self, region: &str) -> Result<(), CatalogError>;
    /// Regions with a stored entry, sorted by name.
    fn list(&self) -> Result<Vec<String>, CatalogError>;
}
