use serde::{Deserialize, Serialize};

/// One row of the public retail price feed.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawPriceItem {
    #[serde(default)]
    pub arm_sku_name: String,
    #[serde(default)]
    pub arm_region_name: String,
    #[serde(default)]
    pub sku_name: String,
    #[serde(default)]
    pub retail_price: f64,
}

/// One page of the retail price feed. The feed paginates with absolute
/// `NextPageLink` URLs and signals the last page with a null link.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
pub struct PricePage {
    #[serde(default)]
    pub items: Vec<RawPriceItem>,
    #[serde(default)]
    pub next_page_link: Option<String>,
}
