//! Listing statistics and the end-to-end compaction entry point.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::CompactionConfig;
use crate::entry::{Entry, ListingRecord};
use crate::error::Result;
use crate::render::TreeRenderer;
use crate::tree::{Directory, TreeBuilder, TreeNode};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Format a byte count with 1024-based units and one decimal, e.g. `5.2 KB`.
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    for unit in SIZE_UNITS {
        if value < 1024.0 {
            return format!("{value:.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:.1} PB")
}

/// Aggregate numbers describing one compacted listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingStats {
    /// Files in the tree.
    pub total_files: usize,

    /// Directories in the tree, excluding the root.
    pub total_directories: usize,

    /// Sum of all file sizes in bytes.
    pub total_size: u64,

    /// `total_size` in human-readable form.
    pub total_size_human: String,

    /// Whether records beyond the configured cap were dropped.
    pub truncated: bool,
}

impl ListingStats {
    /// Compute statistics for a built tree.
    pub fn from_tree(root: &Directory, truncated: bool) -> Self {
        let total_size = root.total_size();
        Self {
            total_files: root.file_count(),
            total_directories: root.directory_count(),
            total_size,
            total_size_human: format_size(total_size),
            truncated,
        }
    }
}

/// A directory reachable in the listing tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryRef {
    /// Directory name.
    pub name: String,

    /// Path from the listing root, ending in `/`.
    pub path: String,
}

/// List every directory below `root`, depth first in name order.
pub fn directories(root: &Directory) -> Vec<DirectoryRef> {
    let mut out = Vec::new();
    collect_directories(root, "", &mut out);
    out
}

fn collect_directories(dir: &Directory, prefix: &str, out: &mut Vec<DirectoryRef>) {
    for node in dir.children.values() {
        if let TreeNode::Directory(child) = node {
            let path = format!("{prefix}{}/", child.name);
            out.push(DirectoryRef {
                name: child.name.clone(),
                path: path.clone(),
            });
            collect_directories(child, &path, out);
        }
    }
}

/// The compacted form of a listing: rendered tree plus statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactListing {
    /// Rendered tree text.
    pub tree: String,

    /// Listing statistics.
    pub stats: ListingStats,
}

/// Build, annotate and render a listing in one call.
///
/// At most `config.max_files` file records are used; directory markers are
/// always kept and do not count against the limit. `stats.truncated` reports
/// whether any file was left out.
pub fn compact(records: &[ListingRecord], config: &CompactionConfig) -> Result<CompactListing> {
    config.validate()?;

    let mut files = 0usize;
    let mut entries = Vec::with_capacity(records.len().min(config.max_files));
    for record in records {
        if !record.is_directory_marker() {
            files += 1;
            if files > config.max_files {
                continue;
            }
        }
        entries.push(Entry::from_record(record)?);
    }
    let truncated = files > config.max_files;

    let root = TreeBuilder::new(config).build(&entries);
    let tree = TreeRenderer::new(config).render(&root);
    let stats = ListingStats::from_tree(&root, truncated);

    debug!("Rendered listing tree: {} bytes of text", tree.len());
    info!(
        "Compacted {} records into {} files across {} directories ({})",
        entries.len(),
        stats.total_files,
        stats.total_directories,
        stats.total_size_human
    );

    Ok(CompactListing { tree, stats })
}
