use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{CacheEntry, CacheStore};
use crate::error::CatalogError;

/// One JSON file per region under the cache directory.
pub struct DiskCache {
    dir: PathBuf,
}

impl DiskCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, region: &str) -> PathBuf {
        self.dir.join(format!("skus-{}.json", region))
    }
}

impl CacheStore for DiskCache {
    fn get(&self, region: &str) -> Result<Option<CacheEntry>, CatalogError> {
        let path = self.path_for(region);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(CatalogError::Storage(format!("{}: {}", path.display(), e))),
        };

        match serde_json::from_str::<CacheEntry>(&text) {
            Ok(entry) => Ok(Some(entry)),
            Err(e) => {
                // A file that no longer parses reads as a miss.
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache file");
                Ok(None)
            }
        }
    }

    fn put(&self, region: &str, entry: &CacheEntry) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| CatalogError::Storage(format!("{}: {}", self.dir.display(), e)))?;
        let path = self.path_for(region);
        let json =
            serde_json::to_string_pretty(entry).map_err(|e| CatalogError::Storage(e.to_string()))?;
        fs::write(&path, json)
            .map_err(|e| CatalogError::Storage(format!("{}: {}", path.display(), e)))
    }

    fn remove(&self, region: &str) -> Result<(), CatalogError> {
        let path = self.path_for(region);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(CatalogError::Storage(format!("{}: {}", path.display(), e))),
        }
    }

    fn list(&self) -> Result<Vec<String>, CatalogError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CatalogError::Storage(format!(
                    "{}: {}",
                    self.dir.display(),
                    e
                )))
            }
        };

        let mut regions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| CatalogError::Storage(e.to_string()))?;
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(region) = name.strip_prefix("skus-").and_then(|n| n.strip_suffix(".json"))
            {
                regions.push(region.to_string());
            }
        }
        regions.sort();
        Ok(regions)
    }
}
