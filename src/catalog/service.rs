use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::merge::merge;
use crate::api::{self, HttpGateway, ReqwestGateway};
use crate::cache::{CacheEntry, CacheStore, DiskCache};
use crate::config;
use crate::error::CatalogError;
use crate::models::{Credentials, RawCapabilitySku, SkuRecord};

/// Endpoint and credential settings for a catalog service.
pub struct CatalogConfig {
    pub price_base_url: String,
    pub mgmt_base_url: String,
    pub identity_base_url: String,
    pub subscription_id: Option<String>,
    pub credentials: Option<Credentials>,
    pub access_token: Option<String>,
}

impl CatalogConfig {
    pub fn from_env() -> Self {
        Self {
            price_base_url: config::get_price_base_url(),
            mgmt_base_url: config::get_mgmt_base_url(),
            identity_base_url: config::get_identity_base_url(),
            subscription_id: config::get_subscription_id(),
            credentials: config::get_credentials(),
            access_token: config::get_access_token(),
        }
    }
}

/// Fetches, merges, and caches the per-region SKU catalog.
pub struct CatalogService {
    gateway: Box<dyn HttpGateway>,
    store: Box<dyn CacheStore>,
    config: CatalogConfig,
}

impl CatalogService {
    pub fn new(
        gateway: Box<dyn HttpGateway>,
        store: Box<dyn CacheStore>,
        config: CatalogConfig,
    ) -> Self {
        Self {
            gateway,
            store,
            config,
        }
    }

    /// Service wired to the real HTTP client and the on-disk cache.
    pub fn from_env() -> Self {
        Self::new(
            Box::new(ReqwestGateway::new()),
            Box::new(DiskCache::new(config::get_cache_dir())),
            CatalogConfig::from_env(),
        )
    }

    pub fn store(&self) -> &dyn CacheStore {
        self.store.as_ref()
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Records for a region: served from cache while fresh, otherwise
    /// fetched, merged, and written back. `force_refresh` skips the cache
    /// read but still writes the fresh entry afterward.
    ///
    /// The two feeds run concurrently; each walks its own pages
    /// sequentially since a next-page link is only known after the
    /// previous response.
    pub async fn fetch_skus(
        &self,
        region: &str,
        force_refresh: bool,
    ) -> Result<Vec<SkuRecord>, CatalogError> {
        let key = cache_key(region)?;

        if !force_refresh {
            match self.store.get(&key) {
                Ok(Some(entry)) if !entry.is_expired() => {
                    tracing::info!(
                        region = %key,
                        records = entry.data.len(),
                        "serving cached records"
                    );
                    return Ok(entry.data);
                }
                Ok(Some(_)) => tracing::debug!(region = %key, "cache entry expired"),
                Ok(None) => tracing::debug!(region = %key, "cache miss"),
                Err(e) => {
                    tracing::warn!(region = %key, error = %e, "cache read failed, fetching fresh")
                }
            }
        }

        let token = self.resolve_access_token().await;
        let price_fut =
            api::fetch_retail_prices(self.gateway.as_ref(), &self.config.price_base_url, &key);
        let caps_fut = self.fetch_capabilities(token.as_deref(), &key);
        let (price_result, capability_map) = tokio::join!(price_fut, caps_fut);

        let price_items = price_result?;
        let records = merge(&price_items, &capability_map);

        let entry = CacheEntry::now(records.clone());
        if let Err(e) = self.store.put(&key, &entry) {
            tracing::warn!(region = %key, error = %e, "failed to persist cache entry");
        }

        Ok(records)
    }

    /// The cached fetch time for a region, when an entry exists.
    pub fn last_updated(&self, region: &str) -> Option<DateTime<Utc>> {
        let key = cache_key(region).ok()?;
        self.store
            .get(&key)
            .ok()
            .flatten()
            .and_then(|entry| entry.fetched_at())
    }

    async fn resolve_access_token(&self) -> Option<String> {
        if let Some(token) = &self.config.access_token {
            tracing::debug!("using pre-acquired access token");
            return Some(token.clone());
        }

        let credentials = match &self.config.credentials {
            Some(c) => c,
            None => {
                tracing::warn!(
                    "no credentials configured, fetching public retail data only (specs will be limited)"
                );
                return None;
            }
        };

        match api::acquire_token(
            self.gateway.as_ref(),
            &self.config.identity_base_url,
            &self.config.mgmt_base_url,
            credentials,
        )
        .await
        {
            Ok(token) => Some(token),
            Err(e) => {
                tracing::warn!(error = %e, "token exchange failed, continuing with heuristic specs");
                None
            }
        }
    }

    async fn fetch_capabilities(
        &self,
        token: Option<&str>,
        region: &str,
    ) -> HashMap<String, RawCapabilitySku> {
        let (token, subscription_id) = match (token, &self.config.subscription_id) {
            (Some(token), Some(subscription_id)) => (token, subscription_id),
            _ => {
                tracing::debug!("skipping capability feed, no token or subscription");
                return HashMap::new();
            }
        };

        api::fetch_resource_skus(
            self.gateway.as_ref(),
            &self.config.mgmt_base_url,
            subscription_id,
            token,
            region,
        )
        .await
    }
}

/// Normalize a region for use as a cache key and request filter:
/// lowercase ASCII alphanumeric, never empty.
pub fn cache_key(region: &str) -> Result<String, CatalogError> {
    let key: String = region
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    if key.is_empty() {
        return Err(CatalogError::Config(format!(
            "'{}' is not a usable region name",
            region
        )));
    }
    Ok(key)
}
