//! Product catalog assembly and field-weighted product search.
//!
//! A catalog is assembled from two sources: the published listing served by
//! the catalog API, and the products discovered by walking object storage
//! (which also sees unpublished ones). Search then scores each product over
//! its title, description and identifier.

use std::collections::HashSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::SearchConfig;
use crate::error::{Result, SearchError};
use crate::relevance::RelevanceScorer;
use crate::similarity::similarity_lowered;

/// Where a product record was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSource {
    /// Published product returned by the catalog API.
    Api,
    /// Product found only by listing object storage.
    Storage,
}

/// One product of the data catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub account_id: String,
    pub product_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
    pub source: ProductSource,
}

impl ProductRecord {
    /// Create a published product.
    pub fn published(account_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            product_id: product_id.into(),
            title: String::new(),
            description: String::new(),
            featured: false,
            source: ProductSource::Api,
        }
    }

    /// Create a product discovered in storage. Its title defaults to its id.
    pub fn discovered(account_id: impl Into<String>, product_id: impl Into<String>) -> Self {
        let product_id = product_id.into();
        Self {
            account_id: account_id.into(),
            title: product_id.clone(),
            product_id,
            description: String::new(),
            featured: false,
            source: ProductSource::Storage,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_featured(mut self, featured: bool) -> Self {
        self.featured = featured;
        self
    }

    /// `account/product` path of the product.
    pub fn path(&self) -> String {
        format!("{}/{}", self.account_id, self.product_id)
    }

    fn key(&self) -> (&str, &str) {
        (&self.account_id, &self.product_id)
    }
}

/// Merge API and storage product lists into one catalog.
///
/// API records come first in their given order; storage records follow,
/// skipping any product the API already published. Within each source only
/// the first record of a product is kept.
pub fn blend_sources(api: Vec<ProductRecord>, storage: Vec<ProductRecord>) -> Vec<ProductRecord> {
    let api_count = api.len();
    let storage_count = storage.len();
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut catalog = Vec::with_capacity(api_count + storage_count);

    for record in api.into_iter().chain(storage) {
        let (account, product) = record.key();
        if seen.insert((account.to_string(), product.to_string())) {
            catalog.push(record);
        }
    }

    debug!(
        "blended {api_count} published and {storage_count} stored products into {}",
        catalog.len()
    );
    catalog
}

/// Featured products, in catalog order.
pub fn featured_only(products: &[ProductRecord]) -> Vec<&ProductRecord> {
    products.iter().filter(|p| p.featured).collect()
}

/// A product field that search can look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Description,
    ProductId,
}

impl SearchField {
    /// Every field, in scoring order.
    pub const ALL: [SearchField; 3] = [Self::Title, Self::Description, Self::ProductId];

    fn text(self, product: &ProductRecord) -> &str {
        match self {
            Self::Title => &product.title,
            Self::Description => &product.description,
            Self::ProductId => &product.product_id,
        }
    }

    /// Points for a field that contains the query, or for a fuzzy match of
    /// the given similarity.
    fn points(self, similarity: f64) -> f64 {
        let literal = similarity >= 1.0;
        match self {
            Self::Title if literal => 3.0,
            Self::Title => 1.0 + 2.0 * similarity,
            Self::Description if literal => 2.0,
            Self::Description => 0.6 + 1.4 * similarity,
            Self::ProductId if literal => 5.0,
            Self::ProductId => 2.0 + 3.0 * similarity,
        }
    }
}

/// A product that matched a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMatch {
    #[serde(flatten)]
    pub product: ProductRecord,

    /// Sum of the matched fields' points, rounded to two decimals.
    pub search_score: f64,

    /// Best similarity over the matched fields, rounded to two decimals.
    pub similarity: f64,

    pub matched_fields: Vec<SearchField>,
}

/// Searches product records field by field.
#[derive(Debug, Clone, Default)]
pub struct ProductSearch {
    scorer: RelevanceScorer,
}

impl ProductSearch {
    pub fn new(config: &SearchConfig) -> Self {
        Self {
            scorer: RelevanceScorer::new(config),
        }
    }

    /// Search `products` for `query` over `fields` (every field when empty).
    pub fn search(
        &self,
        query: &str,
        products: &[ProductRecord],
        fields: &[SearchField],
    ) -> Result<Vec<ProductMatch>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Err(SearchError::InvalidArgument(
                "query must not be empty".to_string(),
            ));
        }
        let fields = if fields.is_empty() {
            &SearchField::ALL[..]
        } else {
            fields
        };

        let mut matches: Vec<ProductMatch> = products
            .iter()
            .filter_map(|product| self.score_product(&query, product, fields))
            .collect();

        matches.sort_by(|a, b| {
            OrderedFloat(b.search_score)
                .cmp(&OrderedFloat(a.search_score))
                .then_with(|| OrderedFloat(b.similarity).cmp(&OrderedFloat(a.similarity)))
        });

        info!(
            "product search for {query:?} matched {} of {} products",
            matches.len(),
            products.len()
        );
        Ok(matches)
    }

    fn score_product(
        &self,
        query: &str,
        product: &ProductRecord,
        fields: &[SearchField],
    ) -> Option<ProductMatch> {
        let mut score = 0.0;
        let mut best = 0.0_f64;
        let mut matched_fields = Vec::new();

        for field in SearchField::ALL.into_iter().filter(|f| fields.contains(f)) {
            let Some(similarity) = self.field_similarity(query, field.text(product)) else {
                continue;
            };
            score += field.points(similarity);
            best = best.max(similarity);
            matched_fields.push(field);
        }

        if score <= 0.0 {
            return None;
        }
        Some(ProductMatch {
            product: product.clone(),
            search_score: round2(score),
            similarity: round2(best),
            matched_fields,
        })
    }

    /// Similarity of an accepted match, `1.0` when the text contains the query.
    fn field_similarity(&self, query: &str, text: &str) -> Option<f64> {
        let text = text.to_lowercase();
        if text.contains(query) {
            return Some(1.0);
        }
        let similarity = text
            .split_whitespace()
            .map(|word| similarity_lowered(query, word))
            .fold(similarity_lowered(query, &text), f64::max);
        self.scorer.accepts(similarity).then_some(similarity)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Search with the default configuration.
pub fn search_products(
    query: &str,
    products: &[ProductRecord],
    fields: &[SearchField],
) -> Result<Vec<ProductMatch>> {
    ProductSearch::default().search(query, products, fields)
}
