//! Configuration for listing compaction and rendering.

use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};

/// Number of distinct values listed verbatim before a value list is elided.
pub const DEFAULT_MAX_LISTED_VALUES: usize = 10;

/// Smallest sibling group summarized as a Hive partition.
pub const DEFAULT_MIN_PARTITION_RUN: usize = 2;

/// Smallest sibling group summarized as a numeric run.
pub const DEFAULT_MIN_NUMERIC_RUN: usize = 3;

/// Smallest sibling group summarized as a date run.
pub const DEFAULT_MIN_DATE_RUN: usize = 2;

/// Configuration for pattern detection and tree rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompactionConfig {
    /// Distinct values listed in full before switching to `first,second,...,last`.
    pub max_listed_values: usize,

    /// Minimum siblings for a partition summary.
    pub min_partition_run: usize,

    /// Minimum siblings for a numeric-run summary.
    pub min_numeric_run: usize,

    /// Minimum siblings for a date-run summary.
    pub min_date_run: usize,

    /// Spaces per depth level in rendered output.
    pub indent_width: usize,

    /// Maximum number of file records compacted per listing. Directory
    /// markers are not counted.
    pub max_files: usize,

    /// Optional header line printed above the tree (e.g. the listing URI).
    pub root_label: Option<String>,
}

impl CompactionConfig {
    /// Set the header line.
    pub fn with_root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Set the record cap.
    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    /// Set the indentation width.
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Check that every threshold is usable.
    pub fn validate(&self) -> Result<()> {
        if self.indent_width == 0 {
            return Err(ListingError::InvalidArgument(
                "indent_width must be at least 1".to_string(),
            ));
        }
        if self.max_files == 0 {
            return Err(ListingError::InvalidArgument(
                "max_files must be at least 1".to_string(),
            ));
        }
        if self.max_listed_values < 3 {
            return Err(ListingError::InvalidArgument(
                "max_listed_values must be at least 3".to_string(),
            ));
        }
        let runs = [
            ("min_partition_run", self.min_partition_run),
            ("min_numeric_run", self.min_numeric_run),
            ("min_date_run", self.min_date_run),
        ];
        for (name, value) in runs {
            if value < 2 {
                return Err(ListingError::InvalidArgument(format!(
                    "{name} must be at least 2, got {value}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for CompactionConfig {
    fn default() -> Self {
        Self {
            max_listed_values: DEFAULT_MAX_LISTED_VALUES,
            min_partition_run: DEFAULT_MIN_PARTITION_RUN,
            min_numeric_run: DEFAULT_MIN_NUMERIC_RUN,
            min_date_run: DEFAULT_MIN_DATE_RUN,
            indent_width: 2,
            max_files: 1000,
            root_label: None,
        }
    }
}
