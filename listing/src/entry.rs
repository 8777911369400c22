//! Listing records and the entries compacted into a tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};

/// One object-store record as handed over by the listing collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Object key, `/`-separated.
    pub key: String,

    /// Object size in bytes.
    pub size: u64,

    /// When the object was last modified.
    pub last_modified: DateTime<Utc>,
}

impl ListingRecord {
    /// Create a new record.
    pub fn new(key: impl Into<String>, size: u64, last_modified: DateTime<Utc>) -> Self {
        Self {
            key: key.into(),
            size,
            last_modified,
        }
    }

    /// Whether the key denotes a directory marker rather than an object.
    pub fn is_directory_marker(&self) -> bool {
        self.key.ends_with('/')
    }

    /// Re-root the record under `prefix`, stripping the prefix and any
    /// leading or trailing slashes left over.
    ///
    /// Returns `None` when the key does not live under `prefix` or nothing
    /// remains once the prefix is removed.
    pub fn relative_to(&self, prefix: &str) -> Option<ListingRecord> {
        let rest = self.key.strip_prefix(prefix)?;
        let marker = rest.ends_with('/');
        let trimmed = rest.trim_matches('/');
        if trimmed.is_empty() {
            return None;
        }
        let key = if marker {
            format!("{trimmed}/")
        } else {
            trimmed.to_string()
        };
        Some(ListingRecord {
            key,
            size: self.size,
            last_modified: self.last_modified,
        })
    }
}

/// A listing entry decomposed into path segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Ordered path segments from the listing root.
    pub path: Vec<String>,

    /// Size in bytes.
    pub size: u64,

    /// Last modification time.
    pub modified: DateTime<Utc>,

    /// `true` for objects, `false` for directory markers.
    pub is_leaf: bool,
}

impl Entry {
    /// Create an object entry from already-split segments.
    pub fn file<I, S>(path: I, size: u64, modified: DateTime<Utc>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            path: path.into_iter().map(Into::into).collect(),
            size,
            modified,
            is_leaf: true,
        }
    }

    /// Decompose a record key into segments.
    ///
    /// A single trailing slash marks a directory; interior empty segments are
    /// kept as-is so that no part of the key is dropped.
    pub fn from_record(record: &ListingRecord) -> Result<Self> {
        let is_leaf = !record.is_directory_marker();
        let key = record.key.strip_suffix('/').unwrap_or(&record.key);
        if key.is_empty() {
            return Err(ListingError::EmptyPath(record.key.clone()));
        }
        Ok(Self {
            path: key.split('/').map(str::to_string).collect(),
            size: record.size,
            modified: record.last_modified,
            is_leaf,
        })
    }

    /// The final path segment.
    pub fn name(&self) -> &str {
        self.path.last().map(String::as_str).unwrap_or_default()
    }
}
