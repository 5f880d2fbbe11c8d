use std::fs;
use std::path::Path;

use crate::error::CatalogError;
use crate::models::SkuRecord;

/// Write records as a pretty-printed JSON array, creating parent
/// directories as needed. This file is what offline consumers load
/// instead of talking to the feeds.
pub fn write_snapshot(path: &Path, records: &[SkuRecord]) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| CatalogError::Artifact(format!("{}: {}", parent.display(), e)))?;
        }
    }

    let json =
        serde_json::to_string_pretty(records).map_err(|e| CatalogError::Artifact(e.to_string()))?;
    fs::write(path, json)
        .map_err(|e| CatalogError::Artifact(format!("{}: {}", path.display(), e)))?;

    tracing::info!(records = records.len(), path = %path.display(), "snapshot written");
    Ok(())
}

pub fn read_snapshot(path: &Path) -> Result<Vec<SkuRecord>, CatalogError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CatalogError::Artifact(format!("{}: {}", path.display(), e)))?;
    serde_json::from_str(&text)
        .map_err(|e| CatalogError::Artifact(format!("{}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::capability::names;
    use crate::models::{Capability, CapabilityValue, SpecSource};

    fn sample_record() -> SkuRecord {
        SkuRecord {
            name: "Standard_D2s_v5".to_string(),
            family: "D v5 Series".to_string(),
            size: "D2s v5".to_string(),
            tier: "Standard".to_string(),
            locations: vec!["westeurope".to_string()],
            source: SpecSource::KnownSku,
            capabilities: vec![
                Capability::new(names::VCPUS, CapabilityValue::known("2")),
                Capability::new(names::ENCRYPTION_AT_HOST, CapabilityValue::Unavailable),
            ],
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("skus.json");

        let records = vec![sample_record()];
        write_snapshot(&path, &records).unwrap();

        let back = read_snapshot(&path).unwrap();
        assert_eq!(back, records);
    }

    #[test]
    fn test_missing_snapshot_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_snapshot(&dir.path().join("absent.json")).is_err());
    }
}
