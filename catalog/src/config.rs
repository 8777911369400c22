//! Configuration for the catalog facade.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use coop_listing::CompactionConfig;
use coop_search::SearchConfig;

use crate::error::{CatalogError, Result};

/// Configuration for the catalog facade.
///
/// ```toml
/// [listing]
/// max_files = 500
/// root_label = "harvard-lil/gov-data/"
///
/// [search]
/// fuzzy_threshold = 0.7
/// default_top_k = 10
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Listing compaction settings.
    pub listing: CompactionConfig,

    /// Search and ranking settings.
    pub search: SearchConfig,
}

impl CatalogConfig {
    /// Parse a configuration from TOML text. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading catalog configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Set the listing configuration.
    pub fn with_listing(mut self, listing: CompactionConfig) -> Self {
        self.listing = listing;
        self
    }

    /// Set the search configuration.
    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    /// Check both sections, reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        self.listing
            .validate()
            .map_err(|e| CatalogError::Config(format!("[listing] {e}")))?;
        self.search
            .validate()
            .map_err(|e| CatalogError::Config(format!("[search] {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_document_is_default() {
        let config = CatalogConfig::from_toml_str("").unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let config = CatalogConfig::from_toml_str(
            r#"
            [listing]
            max_files = 50
            root_label = "maxar/"

            [search]
            default_top_k = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.listing.max_files, 50);
        assert_eq!(config.listing.root_label.as_deref(), Some("maxar/"));
        assert_eq!(config.listing.indent_width, 2);
        assert_eq!(config.search.default_top_k, 8);
        assert_eq!(config.search.fuzzy_threshold, 0.6);
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        let err = CatalogConfig::from_toml_str("[search]\ndefault_top_k = 0\n").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));

        let err = CatalogConfig::from_toml_str("[listing]\nindent_width = 0\n").unwrap_err();
        assert!(matches!(err, CatalogError::Config(_)));
    }

    #[test]
    fn test_malformed_toml() {
        let err = CatalogConfig::from_toml_str("[listing\n").unwrap_err();
        assert!(matches!(err, CatalogError::Toml(_)));
    }
}
