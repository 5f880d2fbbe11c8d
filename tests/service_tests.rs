mod common;

use azsku::cache::{CacheEntry, CacheStore, MemoryCache, CACHE_TTL_MS};
use azsku::catalog::{CatalogConfig, CatalogService};
use azsku::error::CatalogError;
use azsku::models::{Credentials, SpecSource};
use chrono::Utc;
use serde_json::json;

use common::{capability_page, capability_sku, price_item, price_page, ScriptedGateway};

fn public_config() -> CatalogConfig {
    CatalogConfig {
        price_base_url: "https://prices.test".to_string(),
        mgmt_base_url: "https://mgmt.test".to_string(),
        identity_base_url: "https://login.test".to_string(),
        subscription_id: None,
        credentials: None,
        access_token: None,
    }
}

fn token_config() -> CatalogConfig {
    CatalogConfig {
        subscription_id: Some("sub-1".to_string()),
        access_token: Some("tok-123".to_string()),
        ..public_config()
    }
}

fn credential_config() -> CatalogConfig {
    CatalogConfig {
        subscription_id: Some("sub-1".to_string()),
        credentials: Some(Credentials {
            tenant_id: "tenant-1".to_string(),
            client_id: "client-1".to_string(),
            client_secret: "shhh".to_string(),
        }),
        ..public_config()
    }
}

#[tokio::test]
async fn test_fetch_works_without_credentials() {
    let gateway = ScriptedGateway::new().with(
        "prices.test",
        Ok(price_page(vec![price_item("Standard_D2s_v5", 0.096)], None)),
    );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        public_config(),
    );

    let records = service.fetch_skus("westeurope", false).await.unwrap();

    assert_eq!(records.len(), 1);
    // Without the capability feed the curated table fills the specs.
    assert_eq!(records[0].source, SpecSource::KnownSku);

    let urls = log.lock().unwrap().clone();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].starts_with("https://prices.test/"));
}

#[tokio::test]
async fn test_fetch_writes_the_cache_and_serves_from_it() {
    let gateway = ScriptedGateway::new().with(
        "prices.test",
        Ok(price_page(vec![price_item("Standard_D2s_v5", 0.096)], None)),
    );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        public_config(),
    );

    let first = service.fetch_skus("westeurope", false).await.unwrap();
    let second = service.fetch_skus("westeurope", false).await.unwrap();

    assert_eq!(first, second);
    // The second call never touched the network.
    assert_eq!(log.lock().unwrap().len(), 1);

    let entry = service.store().get("westeurope").unwrap().unwrap();
    assert!(!entry.is_expired());
    assert_eq!(entry.data, first);
}

#[tokio::test]
async fn test_force_refresh_bypasses_a_fresh_entry() {
    let gateway = ScriptedGateway::new()
        .with(
            "prices.test",
            Ok(price_page(vec![price_item("Standard_D2s_v5", 0.096)], None)),
        )
        .with(
            "prices.test",
            Ok(price_page(vec![price_item("Standard_D2s_v5", 0.048)], None)),
        );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        public_config(),
    );

    service.fetch_skus("westeurope", false).await.unwrap();
    let refreshed = service.fetch_skus("westeurope", true).await.unwrap();

    assert_eq!(log.lock().unwrap().len(), 2);
    assert_eq!(refreshed[0].price_per_hour(), Some(0.048));
}

#[tokio::test]
async fn test_expired_entry_triggers_a_refetch() {
    let gateway = ScriptedGateway::new().with(
        "prices.test",
        Ok(price_page(vec![price_item("Standard_D2s_v5", 0.096)], None)),
    );
    let log = gateway.request_log();
    let store = MemoryCache::new();
    let stale = CacheEntry::new(
        Utc::now().timestamp_millis() - CACHE_TTL_MS - 1,
        Vec::new(),
    );
    store.put("westeurope", &stale).unwrap();
    let service = CatalogService::new(Box::new(gateway), Box::new(store), public_config());

    let records = service.fetch_skus("westeurope", false).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_access_token_unlocks_the_capability_feed() {
    let gateway = ScriptedGateway::new()
        .with(
            "prices.test",
            Ok(price_page(vec![price_item("Standard_D4s_v3", 0.19)], None)),
        )
        .with(
            "mgmt.test",
            Ok(capability_page(
                vec![capability_sku(
                    "Standard_D4s_v3",
                    &[("vCPUs", "4"), ("MemoryGB", "16")],
                )],
                None,
            )),
        );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        token_config(),
    );

    let records = service.fetch_skus("westeurope", false).await.unwrap();

    assert_eq!(records[0].source, SpecSource::Api);

    let urls = log.lock().unwrap().clone();
    assert!(urls.iter().any(|u| u.contains("prices.test")));
    assert!(urls.iter().any(|u| u.contains("mgmt.test")));
    // A pre-acquired token skips the identity endpoint.
    assert!(!urls.iter().any(|u| u.contains("login.test")));
}

#[tokio::test]
async fn test_credentials_flow_through_the_token_exchange() {
    let gateway = ScriptedGateway::new()
        .with(
            "login.test",
            Ok(json!({ "access_token": "tok-xyz", "expires_in": 3599, "token_type": "Bearer" })),
        )
        .with(
            "prices.test",
            Ok(price_page(vec![price_item("Standard_D4s_v3", 0.19)], None)),
        )
        .with(
            "mgmt.test",
            Ok(capability_page(
                vec![capability_sku("Standard_D4s_v3", &[("vCPUs", "4")])],
                None,
            )),
        );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        credential_config(),
    );

    let records = service.fetch_skus("westeurope", false).await.unwrap();

    assert_eq!(records[0].source, SpecSource::Api);
    let urls = log.lock().unwrap().clone();
    assert_eq!(urls[0], "https://login.test/tenant-1/oauth2/v2.0/token");
}

#[tokio::test]
async fn test_failed_token_exchange_degrades_to_public_data() {
    let gateway = ScriptedGateway::new()
        .with(
            "login.test",
            Err(CatalogError::Network("HTTP 502: bad gateway".to_string())),
        )
        .with(
            "prices.test",
            Ok(price_page(vec![price_item("Standard_D2s_v3", 0.096)], None)),
        );
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        credential_config(),
    );

    let records = service.fetch_skus("westeurope", false).await.unwrap();

    // The refresh still succeeds on public data alone.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source, SpecSource::KnownSku);
    let urls = log.lock().unwrap().clone();
    assert!(!urls.iter().any(|u| u.contains("mgmt.test")));
}

#[tokio::test]
async fn test_unusable_region_fails_before_any_request() {
    let gateway = ScriptedGateway::new();
    let log = gateway.request_log();
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        public_config(),
    );

    let result = service.fetch_skus("///", false).await;

    assert!(matches!(result, Err(CatalogError::Config(_))));
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_last_updated_reflects_the_cached_fetch_time() {
    let gateway = ScriptedGateway::new().with(
        "prices.test",
        Ok(price_page(vec![price_item("Standard_D2s_v5", 0.096)], None)),
    );
    let service = CatalogService::new(
        Box::new(gateway),
        Box::new(MemoryCache::new()),
        public_config(),
    );

    assert!(service.last_updated("westeurope").is_none());

    service.fetch_skus("westeurope", false).await.unwrap();

    let updated = service.last_updated("westeurope").unwrap();
    assert!(Utc::now().signed_duration_since(updated).num_seconds() < 60);
}
