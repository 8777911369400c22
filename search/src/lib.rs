//! # Catalog Search
//!
//! Fuzzy, relevance-ranked search over the accounts and products of a
//! dataset catalog.
//!
//! ## Features
//!
//! - **Similarity**: case-insensitive Ratcliff/Obershelp ratio in `[0, 1]`
//! - **Relevance**: tiered exact / substring / fuzzy scoring over ordered fields
//! - **Hybrid ranking**: accounts and products merged into one deterministic list
//! - **Product search**: field-weighted search over titles, descriptions and ids
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Catalog Search                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  accounts ─┐                                                    │
//! │            ├──► HybridRanker ──► RelevanceScorer ──► similarity │
//! │  products ─┘         │                                          │
//! │                      ▼                                          │
//! │              Vec<ScoredCandidate>                               │
//! │                                                                 │
//! │  ProductRecord ──► blend_sources ──► ProductSearch ──► matches  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod products;
pub mod ranker;
pub mod relevance;
pub mod similarity;

pub use config::SearchConfig;
pub use error::{Result, SearchError};
pub use products::{
    ProductMatch, ProductRecord, ProductSearch, ProductSource, SearchField, blend_sources,
    featured_only, search_products,
};
pub use ranker::{HybridRanker, Provenance, ScoredCandidate, rank};
pub use relevance::{FieldMatch, MatchKind, RelevanceScorer, relevance};
pub use similarity::similarity;
