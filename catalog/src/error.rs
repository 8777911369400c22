//! Error types for the catalog facade.

use thiserror::Error;

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur in the catalog facade.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Listing compaction error.
    #[error("listing error: {0}")]
    Listing(#[from] coop_listing::ListingError),

    /// Search error.
    #[error("search error: {0}")]
    Search(#[from] coop_search::SearchError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Malformed TOML configuration.
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON projection failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
