use std::collections::HashMap;

use super::gateway::HttpGateway;
use crate::models::{CapabilityPage, RawCapabilitySku};

const SKUS_API_VERSION: &str = "2023-01-01";
const RESOURCE_TYPE_VM: &str = "virtualMachines";

pub fn capability_feed_url(base_url: &str, subscription_id: &str, region: &str) -> String {
    let filter = format!("location eq '{}'", region);
    format!(
        "{}/subscriptions/{}/providers/Microsoft.Compute/skus?api-version={}&$filter={}",
        base_url,
        subscription_id,
        SKUS_API_VERSION,
        urlencoding::encode(&filter)
    )
}

/// Walk the resource SKU feed for one region and index the virtual machine
/// entries by SKU name. A name listed twice keeps the later entry.
///
/// This feed is advisory: any failure mid-walk degrades to whatever was
/// gathered before it, so spec resolution falls back to heuristics instead
/// of failing the refresh.
pub async fn fetch_resource_skus(
    gateway: &dyn HttpGateway,
    base_url: &str,
    subscription_id: &str,
    token: &str,
    region: &str,
) -> HashMap<String, RawCapabilitySku> {
    let mut map: HashMap<String, RawCapabilitySku> = HashMap::new();
    let mut next = Some(capability_feed_url(base_url, subscription_id, region));
    let mut pages = 0u32;

    while let Some(url) = next.take() {
        pages += 1;
        tracing::debug!(page = pages, region, "requesting resource SKU page");

        let payload = match gateway.get_json(&url, Some(token)).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    page = pages,
                    region,
                    error = %e,
                    "resource SKU page failed, continuing with partial capabilities"
                );
                break;
            }
        };

        let page: CapabilityPage = match serde_json::from_value(payload) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(
                    page = pages,
                    region,
                    error = %e,
                    "resource SKU page malformed, continuing with partial capabilities"
                );
                break;
            }
        };

        for sku in page.value {
            if sku.resource_type == RESOURCE_TYPE_VM {
                if let Some(previous) = map.insert(sku.name.clone(), sku) {
                    tracing::debug!(
                        sku = %previous.name,
                        region,
                        "duplicate resource SKU entry replaced"
                    );
                }
            }
        }
        next = page.next_link.filter(|link| !link.is_empty());
    }

    tracing::info!(skus = map.len(), pages, region, "resource SKU fetch complete");
    map
}
