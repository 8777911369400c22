//! # Catalog
//!
//! A facade over the two engines of a dataset catalog browser:
//!
//! - **Listing compaction** (`coop-listing`): object listings rendered as a
//!   compact tree with partitions, numbered files and dated snapshots folded
//! - **Catalog search** (`coop-search`): accounts and products ranked by
//!   exact and fuzzy relevance
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          Catalog                                │
//! ├─────────────────────────────────────────────────────────────────┤
//! │                                                                 │
//! │  ┌──────────────┐                         ┌──────────────┐      │
//! │  │ CatalogConfig│──── [listing] ─────────►│   Listing    │      │
//! │  │   (TOML)     │                         │  Compaction  │      │
//! │  └──────────────┘──── [search] ──┐        └──────────────┘      │
//! │                                  ▼               │              │
//! │                          ┌──────────────┐        ▼              │
//! │                          │    Hybrid    │   CompactListing      │
//! │                          │    Ranker    │                       │
//! │                          └──────────────┘                       │
//! │                                  │                              │
//! │                                  ▼                              │
//! │                       ScoredCandidate / JSON                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coop_catalog::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::new(CatalogConfig::load("catalog.toml")?)?;
//! let listing = catalog.compact_listing(&records, "harvard-lil/gov-data/")?;
//! println!("{}", listing.tree);
//!
//! let json = catalog.search_json("harvard", &accounts, &products, None)?;
//! ```

pub mod config;
pub mod engine;
pub mod error;

pub use config::CatalogConfig;
pub use engine::Catalog;
pub use error::{CatalogError, Result};

// Re-export from dependencies for convenience
pub use coop_listing::{CompactListing, CompactionConfig, ListingRecord, ListingStats};
pub use coop_search::{
    ProductMatch, ProductRecord, ProductSource, Provenance, ScoredCandidate, SearchConfig,
    SearchField,
};
