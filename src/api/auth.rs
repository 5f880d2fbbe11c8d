use serde::Deserialize;

use super::gateway::HttpGateway;
use crate::error::CatalogError;
use crate::models::Credentials;

#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: u64,
    #[serde(default)]
    token_type: String,
}

/// Exchange service principal credentials for a management-scope bearer
/// token via the v2.0 client-credentials flow.
pub async fn acquire_token(
    gateway: &dyn HttpGateway,
    identity_base_url: &str,
    mgmt_base_url: &str,
    credentials: &Credentials,
) -> Result<String, CatalogError> {
    let url = format!(
        "{}/{}/oauth2/v2.0/token",
        identity_base_url, credentials.tenant_id
    );
    let scope = format!("{}/.default", mgmt_base_url);
    let form = [
        ("grant_type", "client_credentials"),
        ("client_id", credentials.client_id.as_str()),
        ("client_secret", credentials.client_secret.as_str()),
        ("scope", scope.as_str()),
    ];

    let payload = gateway
        .post_form(&url, &form)
        .await
        .map_err(|e| CatalogError::Auth(e.to_string()))?;

    // Identity endpoints can report failure inside a success body.
    if let Some(description) = payload.get("error_description").and_then(|v| v.as_str()) {
        return Err(CatalogError::Auth(description.to_string()));
    }

    let token: TokenResponse = serde_json::from_value(payload)
        .map_err(|e| CatalogError::Auth(format!("unexpected token response: {}", e)))?;

    tracing::debug!(
        expires_in = token.expires_in,
        token_type = %token.token_type,
        "bearer token acquired"
    );
    Ok(token.access_token)
}
