use serde_json::Value;

use super::gateway::HttpGateway;
use crate::error::CatalogError;
use crate::models::{PricePage, RawPriceItem};

/// Rows requested per page. The feed caps pages at 1000 rows.
const PAGE_SIZE: u32 = 1000;

pub fn price_feed_url(base_url: &str, region: &str) -> String {
    feed_url(base_url, region, PAGE_SIZE)
}

fn feed_url(base_url: &str, region: &str, top: u32) -> String {
    let filter = format!(
        "serviceName eq 'Virtual Machines' and armRegionName eq '{}' and priceType eq 'Consumption'",
        region
    );
    format!(
        "{}/api/retail/prices?$filter={}&$top={}",
        base_url,
        urlencoding::encode(&filter),
        top
    )
}

/// Walk the retail price feed for one region, following `NextPageLink`
/// until the feed stops sending one.
///
/// A page failing mid-walk is logged and the rows gathered so far are
/// returned; the error is fatal only when no rows were gathered at all.
pub async fn fetch_retail_prices(
    gateway: &dyn HttpGateway,
    base_url: &str,
    region: &str,
) -> Result<Vec<RawPriceItem>, CatalogError> {
    let mut items: Vec<RawPriceItem> = Vec::new();
    let mut next = Some(price_feed_url(base_url, region));
    let mut pages = 0u32;
    let mut last_error: Option<CatalogError> = None;

    while let Some(url) = next.take() {
        pages += 1;
        tracing::debug!(page = pages, region, "requesting retail price page");

        let payload = match gateway.get_json(&url, None).await {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(
                    page = pages,
                    region,
                    error = %e,
                    "retail price page failed, keeping rows gathered so far"
                );
                last_error = Some(e);
                break;
            }
        };

        let page = match parse_price_page(payload) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(
                    page = pages,
                    region,
                    error = %e,
                    "retail price page malformed, keeping rows gathered so far"
                );
                last_error = Some(e);
                break;
            }
        };

        items.extend(page.items);
        next = page.next_page_link.filter(|link| !link.is_empty());
    }

    if items.is_empty() {
        if let Some(e) = last_error {
            return Err(e);
        }
    }

    tracing::info!(rows = items.len(), pages, region, "retail price fetch complete");
    Ok(items)
}

fn parse_price_page(payload: Value) -> Result<PricePage, CatalogError> {
    serde_json::from_value(payload).map_err(|e| CatalogError::MalformedResponse(e.to_string()))
}

/// Request a single trimmed page to verify the endpoint answers, without
/// walking the whole feed. Used by `check-config --ping`.
pub async fn probe(
    gateway: &dyn HttpGateway,
    base_url: &str,
    region: &str,
) -> Result<usize, CatalogError> {
    let payload = gateway.get_json(&feed_url(base_url, region, 1), None).await?;
    let page = parse_price_page(payload)?;
    Ok(page.items.len())
}
