use std::collections::HashMap;
use std::sync::Mutex;

use super::{CacheEntry, CacheStore};
use crate::error::CatalogError;

/// In-memory store for tests and one-shot runs that should not touch disk.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryCache {
    fn get(&self, region: &str) -> Result<Option<CacheEntry>, CatalogError> {
        Ok(self.entries.lock().unwrap().get(region).cloned())
    }

    fn put(&self, region: &str, entry: &CacheEntry) -> Result<(), CatalogError> {
        self.entries
            .lock()
            .unwrap()
            .insert(region.to_string(), entry.clone());
        Ok(())
    }

    fn remove(&self, region: &str) -> Result<(), CatalogError> {
        self.entries.lock().unwrap().remove(region);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, CatalogError> {
        let mut regions: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        regions.sort();
        Ok(regions)
    }
}
