#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use azsku::api::HttpGateway;
use azsku::error::CatalogError;
use azsku::models::{Capability, CapabilityValue, SkuRecord, SpecSource};

/// Gateway that answers from a scripted route table and records every
/// requested URL. Routes match by substring and are consumed in order, so
/// consecutive pages of one feed queue under the same fragment.
pub struct ScriptedGateway {
    routes: Mutex<Vec<(String, Result<Value, CatalogError>)>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            routes: Mutex::new(Vec::new()),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with(self, url_fragment: &str, response: Result<Value, CatalogError>) -> Self {
        self.routes
            .lock()
            .unwrap()
            .push((url_fragment.to_string(), response));
        self
    }

    /// Handle to the request log that stays usable after the gateway moves
    /// into a service.
    pub fn request_log(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.requests)
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn respond(&self, url: &str) -> Result<Value, CatalogError> {
        self.requests.lock().unwrap().push(url.to_string());
        let mut routes = self.routes.lock().unwrap();
        match routes
            .iter()
            .position(|(fragment, _)| url.contains(fragment.as_str()))
        {
            Some(index) => routes.remove(index).1,
            None => Err(CatalogError::Network(format!(
                "no scripted response for {}",
                url
            ))),
        }
    }
}

#[async_trait]
impl HttpGateway for ScriptedGateway {
    async fn get_json(&self, url: &str, _bearer: Option<&str>) -> Result<Value, CatalogError> {
        self.respond(url)
    }

    async fn post_form(&self, url: &str, _form: &[(&str, &str)]) -> Result<Value, CatalogError> {
        self.respond(url)
    }
}

pub fn price_item(arm_sku_name: &str, retail_price: f64) -> Value {
    json!({
        "armSkuName": arm_sku_name,
        "armRegionName": "westeurope",
        "skuName": arm_sku_name.trim_start_matches("Standard_").replace('_', " "),
        "retailPrice": retail_price,
    })
}

pub fn price_page(items: Vec<Value>, next_page_link: Option<&str>) -> Value {
    json!({ "Items": items, "NextPageLink": next_page_link })
}

pub fn capability_sku(name: &str, capabilities: &[(&str, &str)]) -> Value {
    let capabilities: Vec<Value> = capabilities
        .iter()
        .map(|(name, value)| json!({ "name": name, "value": value }))
        .collect();
    json!({
        "name": name,
        "resourceType": "virtualMachines",
        "family": "standardDSv3Family",
        "capabilities": capabilities,
    })
}

pub fn capability_page(value: Vec<Value>, next_link: Option<&str>) -> Value {
    json!({ "value": value, "nextLink": next_link })
}

pub fn record_with(name: &str, capabilities: Vec<Capability>) -> SkuRecord {
    SkuRecord {
        name: name.to_string(),
        family: "General Purpose".to_string(),
        size: name.trim_start_matches("Standard_").replace('_', " "),
        tier: "Standard".to_string(),
        locations: vec!["westeurope".to_string()],
        source: SpecSource::Inferred,
        capabilities,
    }
}

pub fn known(name: &str, value: &str) -> Capability {
    Capability::new(name, CapabilityValue::known(value))
}

pub fn unavailable(name: &str) -> Capability {
    Capability::new(name, CapabilityValue::Unavailable)
}
