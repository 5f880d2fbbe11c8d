pub mod artifact;
pub mod known_skus;
pub mod merge;
pub mod parser;
pub mod resolver;
pub mod service;

// Re-export commonly used functions
pub use artifact::{read_snapshot, write_snapshot};
pub use merge::merge;
pub use resolver::{
    ApiResolver, HeuristicResolver, KnownSkuResolver, ResolvedSpecs, SpecResolver,
};
pub use service::{cache_key, CatalogConfig, CatalogService};
