use std::env;
use std::path::{Path, PathBuf};

use crate::models::Credentials;

// Default configuration constants
pub const DEFAULT_PRICE_BASE_URL: &str = "https://prices.azure.com";
pub const DEFAULT_MGMT_BASE_URL: &str = "https://management.azure.com";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://login.microsoftonline.com";
pub const DEFAULT_REGION: &str = "westeurope";
pub const DEFAULT_CACHE_DIR: &str = ".azsku-cache";
pub const DEFAULT_SNAPSHOT_PATH: &str = "data/skus.json";

/// Regions offered by the `regions` subcommand. Any other region name is
/// still accepted wherever a region is asked for.
pub const POPULAR_REGIONS: &[&str] = &[
    "eastus",
    "eastus2",
    "westus",
    "westus2",
    "centralus",
    "southcentralus",
    "northeurope",
    "westeurope",
    "uksouth",
    "ukwest",
    "southeastasia",
    "eastasia",
    "japaneast",
    "japanwest",
    "australiaeast",
    "australiasoutheast",
];

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_price_base_url() -> String {
    sanitize_base_url(
        &env::var("AZSKU_PRICE_BASE_URL").unwrap_or_default(),
        DEFAULT_PRICE_BASE_URL,
    )
}

pub fn get_mgmt_base_url() -> String {
    sanitize_base_url(
        &env::var("AZSKU_MGMT_BASE_URL").unwrap_or_default(),
        DEFAULT_MGMT_BASE_URL,
    )
}

pub fn get_identity_base_url() -> String {
    sanitize_base_url(
        &env::var("AZSKU_IDENTITY_BASE_URL").unwrap_or_default(),
        DEFAULT_IDENTITY_BASE_URL,
    )
}

pub fn get_default_region() -> String {
    let raw = env::var("AZSKU_REGION").unwrap_or_default();
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        DEFAULT_REGION.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

pub fn get_cache_dir() -> PathBuf {
    match env::var("AZSKU_CACHE_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir.trim()),
        _ => PathBuf::from(DEFAULT_CACHE_DIR),
    }
}

pub fn get_subscription_id() -> Option<String> {
    env::var("AZURE_SUBSCRIPTION_ID")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// A pre-acquired bearer token (e.g. handed in by CI) that skips the
/// client-credentials exchange entirely.
pub fn get_access_token() -> Option<String> {
    env::var("AZURE_ACCESS_TOKEN")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Service principal credentials, present only when all three parts are set.
pub fn get_credentials() -> Option<Credentials> {
    let tenant_id = env::var("AZURE_TENANT_ID").ok()?;
    let client_id = env::var("AZURE_CLIENT_ID").ok()?;
    let client_secret = env::var("AZURE_CLIENT_SECRET").ok()?;
    if tenant_id.trim().is_empty() || client_id.trim().is_empty() || client_secret.trim().is_empty()
    {
        return None;
    }
    Some(Credentials {
        tenant_id: tenant_id.trim().to_string(),
        client_id: client_id.trim().to_string(),
        client_secret: client_secret.trim().to_string(),
    })
}

pub fn sanitize_base_url(raw: &str, default: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
