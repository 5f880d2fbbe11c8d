// Atomic API modules
pub mod auth;
pub mod capabilities;
pub mod gateway;
pub mod prices;

// Re-export commonly used functions
pub use auth::acquire_token;
pub use capabilities::{capability_feed_url, fetch_resource_skus};
pub use gateway::{HttpGateway, ReqwestGateway};
pub use prices::{fetch_retail_prices, price_feed_url, probe};
