mod common;

use std::fs;

use azsku::cache::{CacheEntry, CacheStore, DiskCache, MemoryCache, CACHE_TTL_MS};
use azsku::models::capability::names;
use chrono::Utc;

use common::{known, record_with};

fn entry_with_one_record() -> CacheEntry {
    CacheEntry::now(vec![record_with(
        "Standard_D2s_v3",
        vec![known(names::VCPUS, "2"), known(names::PRICE_PER_HOUR, "0.096")],
    )])
}

#[test]
fn test_disk_cache_round_trips_an_entry() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());
    let entry = entry_with_one_record();

    store.put("westeurope", &entry).unwrap();
    let back = store.get("westeurope").unwrap().unwrap();

    assert_eq!(back, entry);
    assert!(dir.path().join("skus-westeurope.json").exists());
}

#[test]
fn test_disk_cache_read_of_absent_region_is_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());

    assert!(store.get("westeurope").unwrap().is_none());
}

#[test]
fn test_disk_cache_treats_a_corrupt_file_as_a_miss() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());
    fs::write(dir.path().join("skus-westeurope.json"), "{ not json").unwrap();

    assert!(store.get("westeurope").unwrap().is_none());
}

#[test]
fn test_disk_cache_remove_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());
    store.put("westeurope", &entry_with_one_record()).unwrap();

    store.remove("westeurope").unwrap();
    assert!(store.get("westeurope").unwrap().is_none());

    // Removing again is not an error.
    store.remove("westeurope").unwrap();
}

#[test]
fn test_disk_cache_lists_regions_sorted() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());
    store.put("westeurope", &entry_with_one_record()).unwrap();
    store.put("eastus2", &entry_with_one_record()).unwrap();
    // Files that do not follow the cache naming are not regions.
    fs::write(dir.path().join("notes.txt"), "scratch").unwrap();

    let regions = store.list().unwrap();

    assert_eq!(regions, vec!["eastus2".to_string(), "westeurope".to_string()]);
}

#[test]
fn test_disk_cache_list_of_missing_dir_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path().join("never-created"));

    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_stale_timestamp_survives_the_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = DiskCache::new(dir.path());
    let stale = CacheEntry::new(
        Utc::now().timestamp_millis() - CACHE_TTL_MS - 1,
        Vec::new(),
    );

    store.put("westeurope", &stale).unwrap();
    let back = store.get("westeurope").unwrap().unwrap();

    assert!(back.is_expired());
}

#[test]
fn test_memory_cache_round_trips_an_entry() {
    let store = MemoryCache::new();
    let entry = entry_with_one_record();

    store.put("westeurope", &entry).unwrap();
    assert_eq!(store.get("westeurope").unwrap().unwrap(), entry);

    store.remove("westeurope").unwrap();
    assert!(store.get("westeurope").unwrap().is_none());
}

#[test]
fn test_memory_cache_lists_regions_sorted() {
    let store = MemoryCache::new();
    store.put("westeurope", &entry_with_one_record()).unwrap();
    store.put("eastus2", &entry_with_one_record()).unwrap();

    assert_eq!(
        store.list().unwrap(),
        vec!["eastus2".to_string(), "westeurope".to_string()]
    );
}
