use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CatalogError;

/// HTTP seam between the catalog and the outside world. The production
/// implementation is [`ReqwestGateway`]; tests script responses instead.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// GET a JSON document, optionally with a bearer token.
    async fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value, CatalogError>;

    /// POST a URL-encoded form and return the JSON response.
    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value, CatalogError>;
}

/// Gateway backed by a shared reqwest client.
pub struct ReqwestGateway {
    client: reqwest::Client,
}

impl ReqwestGateway {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(format!("azsku/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for ReqwestGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn get_json(&self, url: &str, bearer: Option<&str>) -> Result<Value, CatalogError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        read_json(response).await
    }

    async fn post_form(&self, url: &str, form: &[(&str, &str)]) -> Result<Value, CatalogError> {
        let response = self
            .client
            .post(url)
            .form(form)
            .send()
            .await
            .map_err(|e| CatalogError::Network(e.to_string()))?;

        read_json(response).await
    }
}

async fn read_json(response: reqwest::Response) -> Result<Value, CatalogError> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        return Err(CatalogError::Network(format!(
            "HTTP {}: {}",
            status, error_text
        )));
    }

    response
        .json::<Value>()
        .await
        .map_err(|e| CatalogError::MalformedResponse(e.to_string()))
}
