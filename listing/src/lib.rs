//! # Listing Compaction
//!
//! This crate turns flat object-storage listings into compact, indented
//! trees for token-constrained readers.
//!
//! ## Features
//!
//! - **Segment Classification**: Hive partitions, numeric stems, ISO dates
//! - **Pattern Detection**: Summarize uniform sibling groups in one line
//! - **Tree Building**: Trie of directories and files, last write wins
//! - **Rendering**: Deterministic two-space indented text
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Listing Compaction                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ListingRecord ──► Entry ──► TreeBuilder ──► TreeRenderer       │
//! │                                  │                              │
//! │                                  ▼                              │
//! │                  classify ──► PatternDetector                   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use coop_listing::{CompactionConfig, compact};
//!
//! let listing = compact(&records, &CompactionConfig::default())?;
//! println!("{}", listing.tree);
//! ```

pub mod config;
pub mod entry;
pub mod error;
pub mod pattern;
pub mod readme;
pub mod render;
pub mod segment;
pub mod stats;
pub mod tree;

pub use config::CompactionConfig;
pub use entry::{Entry, ListingRecord};
pub use error::{ListingError, Result};
pub use pattern::{PatternDetail, PatternDetector, PatternKind, PatternSummary, detect};
pub use readme::find_readme;
pub use render::{TreeRenderer, render};
pub use segment::{SegmentClass, classify};
pub use stats::{CompactListing, DirectoryRef, ListingStats, compact, directories, format_size};
pub use tree::{Directory, FileNode, TreeBuilder, TreeNode, build};
