use thiserror::Error;

/// Errors that can occur while building or serving the SKU catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    /// A network request failed or came back with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// A response arrived but could not be decoded into the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Token exchange with the identity endpoint failed
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Reading or writing the on-disk cache failed
    #[error("Cache storage error: {0}")]
    Storage(String),

    /// Required configuration is missing or invalid
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing or reading the offline snapshot file failed
    #[error("Snapshot error: {0}")]
    Artifact(String),
}
