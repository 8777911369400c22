//! The catalog facade.

use std::collections::HashSet;

use tracing::{debug, info};

use coop_listing::{CompactListing, ListingRecord, compact, find_readme};
use coop_search::{
    HybridRanker, ProductMatch, ProductRecord, ProductSearch, ScoredCandidate, SearchField,
    blend_sources,
};

use crate::config::CatalogConfig;
use crate::error::Result;

/// Entry point combining listing compaction and catalog search.
///
/// The facade holds no catalog data of its own: callers fetch listings and
/// product records from wherever they live and hand them in per call.
#[derive(Debug, Clone)]
pub struct Catalog {
    config: CatalogConfig,
    ranker: HybridRanker,
    products: ProductSearch,
}

impl Catalog {
    /// Create a catalog from a validated configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        config.validate()?;
        let ranker = HybridRanker::new(&config.search);
        let products = ProductSearch::new(&config.search);
        info!(
            "Catalog ready (fuzzy threshold {}, top {})",
            config.search.fuzzy_threshold, config.search.default_top_k
        );
        Ok(Self {
            config,
            ranker,
            products,
        })
    }

    /// Create a catalog with default settings.
    pub fn with_defaults() -> Self {
        let config = CatalogConfig::default();
        Self {
            ranker: HybridRanker::new(&config.search),
            products: ProductSearch::new(&config.search),
            config,
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Compact a listing taken under `prefix`.
    ///
    /// Keys are made relative to `prefix` first; records outside it, and the
    /// prefix's own marker, are skipped. When no root label is configured the
    /// prefix itself becomes the header line.
    pub fn compact_listing(&self, records: &[ListingRecord], prefix: &str) -> Result<CompactListing> {
        let relative: Vec<ListingRecord> = records
            .iter()
            .filter_map(|record| record.relative_to(prefix))
            .collect();
        debug!(
            "{} of {} records under {prefix:?}",
            relative.len(),
            records.len()
        );

        let mut listing = self.config.listing.clone();
        if listing.root_label.is_none() && !prefix.is_empty() {
            listing.root_label = Some(prefix.to_string());
        }
        Ok(compact(&relative, &listing)?)
    }

    /// The README at the root of a listing taken under `prefix`, if any.
    pub fn readme(&self, records: &[ListingRecord], prefix: &str) -> Option<ListingRecord> {
        let relative: Vec<ListingRecord> = records
            .iter()
            .filter_map(|record| record.relative_to(prefix))
            .collect();
        find_readme(&relative).cloned()
    }

    /// Rank accounts and products for `query`.
    ///
    /// `top_k` falls back to the configured default.
    pub fn search<A, P>(
        &self,
        query: &str,
        accounts: &[A],
        products: &[(A, P)],
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredCandidate>>
    where
        A: AsRef<str>,
        P: AsRef<str>,
    {
        let top_k = top_k.unwrap_or(self.config.search.default_top_k);
        Ok(self.ranker.rank(query, accounts, products, top_k)?)
    }

    /// Rank the accounts and products of a product catalog for `query`.
    ///
    /// Accounts are taken from the catalog in first-seen order.
    pub fn search_catalog(
        &self,
        query: &str,
        catalog: &[ProductRecord],
        top_k: Option<usize>,
    ) -> Result<Vec<ScoredCandidate>> {
        let mut seen = HashSet::new();
        let accounts: Vec<&str> = catalog
            .iter()
            .map(|p| p.account_id.as_str())
            .filter(|account| seen.insert(*account))
            .collect();
        let products: Vec<(&str, &str)> = catalog
            .iter()
            .map(|p| (p.account_id.as_str(), p.product_id.as_str()))
            .collect();
        self.search(query, &accounts, &products, top_k)
    }

    /// Ranked hits as JSON records of `{label, kind, score}`.
    pub fn search_json<A, P>(
        &self,
        query: &str,
        accounts: &[A],
        products: &[(A, P)],
        top_k: Option<usize>,
    ) -> Result<String>
    where
        A: AsRef<str>,
        P: AsRef<str>,
    {
        let hits = self.search(query, accounts, products, top_k)?;
        Ok(serde_json::to_string_pretty(&hits)?)
    }

    /// Merge published and stored product records into one catalog.
    pub fn blend(&self, api: Vec<ProductRecord>, storage: Vec<ProductRecord>) -> Vec<ProductRecord> {
        blend_sources(api, storage)
    }

    /// Field-weighted product search, optionally limited to one account.
    pub fn search_products(
        &self,
        query: &str,
        catalog: &[ProductRecord],
        account: Option<&str>,
        fields: &[SearchField],
    ) -> Result<Vec<ProductMatch>> {
        let Some(account) = account else {
            return Ok(self.products.search(query, catalog, fields)?);
        };
        let scoped: Vec<ProductRecord> = catalog
            .iter()
            .filter(|p| p.account_id == account)
            .cloned()
            .collect();
        Ok(self.products.search(query, &scoped, fields)?)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
