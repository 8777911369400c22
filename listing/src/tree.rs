//! Directory tree assembled from a flat listing.
//!
//! Entries are inserted into a trie keyed by path segment. Once every entry is
//! in place a bottom-up pass annotates each directory with the pattern its
//! children form, if any. The children themselves are always retained; the
//! annotation only changes how the directory is rendered.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::CompactionConfig;
use crate::entry::Entry;
use crate::pattern::{PatternDetector, PatternSummary};
use crate::segment::{SegmentClass, classify};

/// A node in the listing tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum TreeNode {
    Directory(Directory),
    File(FileNode),
}

impl TreeNode {
    /// Name of this node within its parent.
    pub fn name(&self) -> &str {
        match self {
            Self::Directory(dir) => &dir.name,
            Self::File(file) => &file.name,
        }
    }

    /// Whether this node is a directory.
    pub fn is_dir(&self) -> bool {
        matches!(self, Self::Directory(_))
    }

    /// Total bytes under this node.
    pub fn total_size(&self) -> u64 {
        match self {
            Self::Directory(dir) => dir.total_size(),
            Self::File(file) => file.size,
        }
    }
}

/// A file leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    /// File name.
    pub name: String,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: DateTime<Utc>,
}

/// A directory and its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Directory {
    /// Directory name; empty for the listing root.
    pub name: String,

    /// Children keyed by name.
    pub children: BTreeMap<String, TreeNode>,

    /// Pattern formed by the children, if they form one.
    pub pattern: Option<PatternSummary>,
}

impl Directory {
    /// Create an empty directory.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: BTreeMap::new(),
            pattern: None,
        }
    }

    /// Create an empty listing root.
    pub fn root() -> Self {
        Self::new("")
    }

    /// Whether the directory has no children.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Look up a direct child.
    pub fn get(&self, name: &str) -> Option<&TreeNode> {
        self.children.get(name)
    }

    /// Look up a descendant by path segments.
    pub fn find<S: AsRef<str>>(&self, path: &[S]) -> Option<&TreeNode> {
        let (first, rest) = path.split_first()?;
        let node = self.children.get(first.as_ref())?;
        if rest.is_empty() {
            return Some(node);
        }
        match node {
            TreeNode::Directory(dir) => dir.find(rest),
            TreeNode::File(_) => None,
        }
    }

    /// The child the pattern summary uses as its structure sample.
    pub fn representative(&self) -> Option<&Directory> {
        let name = self.pattern.as_ref()?.representative.as_deref()?;
        match self.children.get(name)? {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File(_) => None,
        }
    }

    /// Direct children paired with the class of their name, in name order.
    pub fn classified_children(&self) -> Vec<(SegmentClass, &TreeNode)> {
        self.children
            .values()
            .map(|node| (classify(node.name()), node))
            .collect()
    }

    /// Number of files in this subtree.
    pub fn file_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TreeNode::Directory(dir) => dir.file_count(),
                TreeNode::File(_) => 1,
            })
            .sum()
    }

    /// Number of directories in this subtree, excluding `self`.
    pub fn directory_count(&self) -> usize {
        self.children
            .values()
            .map(|node| match node {
                TreeNode::Directory(dir) => 1 + dir.directory_count(),
                TreeNode::File(_) => 0,
            })
            .sum()
    }

    /// Total bytes in this subtree.
    pub fn total_size(&self) -> u64 {
        self.children
            .values()
            .map(TreeNode::total_size)
            .fold(0, u64::saturating_add)
    }

    /// Number of directories in this subtree carrying a pattern summary.
    pub fn pattern_count(&self) -> usize {
        let own = usize::from(self.pattern.is_some());
        own + self
            .children
            .values()
            .map(|node| match node {
                TreeNode::Directory(dir) => dir.pattern_count(),
                TreeNode::File(_) => 0,
            })
            .sum::<usize>()
    }

    /// Insert one entry, creating intermediate directories as needed.
    ///
    /// A later entry replaces whatever an earlier one left at the same path,
    /// including a file standing where a directory is now needed.
    fn insert(&mut self, entry: &Entry) {
        let Some((last, parents)) = entry.path.split_last() else {
            return;
        };

        let mut current = self;
        for segment in parents {
            let Some(next) = current.child_dir_mut(segment) else {
                return;
            };
            current = next;
        }

        if entry.is_leaf {
            current.children.insert(
                last.clone(),
                TreeNode::File(FileNode {
                    name: last.clone(),
                    size: entry.size,
                    modified: entry.modified,
                }),
            );
        } else {
            current.child_dir_mut(last);
        }
    }

    /// The child directory `name`, created if missing. A file of that name
    /// is replaced by an empty directory.
    fn child_dir_mut(&mut self, name: &str) -> Option<&mut Directory> {
        let slot = self
            .children
            .entry(name.to_string())
            .or_insert_with(|| TreeNode::Directory(Directory::new(name)));
        if !slot.is_dir() {
            *slot = TreeNode::Directory(Directory::new(name));
        }
        match slot {
            TreeNode::Directory(dir) => Some(dir),
            TreeNode::File(_) => None,
        }
    }

    /// Recompute pattern summaries for this subtree, children first.
    pub fn annotate(&mut self, detector: &PatternDetector) {
        for node in self.children.values_mut() {
            if let TreeNode::Directory(dir) = node {
                dir.annotate(detector);
            }
        }
        self.pattern = detector.detect_directory(self);
    }
}

/// Builds annotated trees from listing entries.
#[derive(Debug, Clone, Default)]
pub struct TreeBuilder {
    detector: PatternDetector,
}

impl TreeBuilder {
    /// Create a builder with the thresholds of `config`.
    pub fn new(config: &CompactionConfig) -> Self {
        Self {
            detector: PatternDetector::new(config),
        }
    }

    /// Build the tree for `entries`.
    pub fn build<'a, I>(&self, entries: I) -> Directory
    where
        I: IntoIterator<Item = &'a Entry>,
    {
        let mut root = Directory::root();
        let mut inserted = 0usize;
        for entry in entries {
            root.insert(entry);
            inserted += 1;
        }
        root.annotate(&self.detector);

        debug!(
            "Built listing tree from {inserted} entries: {} files, {} directories, {} patterns",
            root.file_count(),
            root.directory_count(),
            root.pattern_count()
        );
        root
    }
}

/// Build a tree with the default thresholds.
pub fn build(entries: &[Entry]) -> Directory {
    TreeBuilder::default().build(entries)
}
