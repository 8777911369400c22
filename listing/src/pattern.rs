//! Structural pattern detection across sibling segments.
//!
//! A directory whose children all share one segment shape can be described
//! by a single summary instead of one line per child:
//!
//! - **Partition**: every child is `key=value` with the same key
//! - **Numeric run**: every child is a file named `<number><suffix>` with the same suffix
//! - **Date run**: every child is a `YYYY-MM-DD` date
//!
//! Mixed groups never match; the caller then lists the children verbatim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::config::CompactionConfig;
use crate::segment::SegmentClass;
use crate::tree::{Directory, TreeNode};

/// Which rule produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Partition,
    NumericRun,
    DateRun,
}

/// Kind-dependent statistics of a summarized sibling group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PatternDetail {
    /// Distinct partition values in first-seen order.
    Partition { key: String, values: Vec<String> },

    /// Range of the numbered files and their size aggregates.
    NumericRun {
        suffix: String,
        min: u64,
        max: u64,
        min_size: u64,
        max_size: u64,
        total_size: u64,
    },

    /// Snapshot dates in ascending order.
    DateRun { dates: Vec<NaiveDate> },
}

/// A compact description of a directory's children.
///
/// The summary never owns the children it describes. The representative is
/// kept by name and resolved against the directory at render time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSummary {
    /// Number of siblings the summary replaces. Always at least 2.
    pub count: usize,

    /// Name of the child whose subtree stands in for the group, if any.
    pub representative: Option<String>,

    /// Rule-specific statistics.
    pub detail: PatternDetail,
}

impl PatternSummary {
    /// The rule that produced this summary.
    pub fn kind(&self) -> PatternKind {
        match self.detail {
            PatternDetail::Partition { .. } => PatternKind::Partition,
            PatternDetail::NumericRun { .. } => PatternKind::NumericRun,
            PatternDetail::DateRun { .. } => PatternKind::DateRun,
        }
    }
}

/// Detects repeating structure in sibling groups.
#[derive(Debug, Clone)]
pub struct PatternDetector {
    min_partition_run: usize,
    min_numeric_run: usize,
    min_date_run: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self::new(&CompactionConfig::default())
    }
}

impl PatternDetector {
    /// Create a detector with the thresholds of `config`.
    ///
    /// Thresholds below 2 are raised to 2; a single child is never summarized.
    pub fn new(config: &CompactionConfig) -> Self {
        Self {
            min_partition_run: config.min_partition_run.max(2),
            min_numeric_run: config.min_numeric_run.max(2),
            min_date_run: config.min_date_run.max(2),
        }
    }

    /// Classify the children of `dir` and run detection over them.
    pub fn detect_directory(&self, dir: &Directory) -> Option<PatternSummary> {
        let siblings = dir.classified_children();
        self.detect(&siblings)
    }

    /// Detect a pattern over an ordered sibling group.
    pub fn detect(&self, siblings: &[(SegmentClass, &TreeNode)]) -> Option<PatternSummary> {
        let (leading, _) = siblings.first()?;
        let summary = match leading {
            SegmentClass::Partition { .. } => self.partition(siblings),
            SegmentClass::NumericStem { .. } => self.numeric_run(siblings),
            SegmentClass::DateStem { .. } => self.date_run(siblings),
            SegmentClass::Plain { .. } => None,
        };
        trace!(
            "{} siblings led by a {} segment: {:?}",
            siblings.len(),
            leading.kind(),
            summary.as_ref().map(PatternSummary::kind)
        );
        summary
    }

    fn partition(&self, siblings: &[(SegmentClass, &TreeNode)]) -> Option<PatternSummary> {
        if siblings.len() < self.min_partition_run {
            return None;
        }
        let mut group_key: Option<&str> = None;
        let mut values: Vec<String> = Vec::with_capacity(siblings.len());
        for (class, _) in siblings {
            let SegmentClass::Partition { key, value } = class else {
                return None;
            };
            match group_key {
                Some(expected) if expected != key.as_str() => return None,
                Some(_) => {}
                None => group_key = Some(key.as_str()),
            }
            if !values.contains(value) {
                values.push(value.clone());
            }
        }

        let key = group_key?.to_string();
        let representative = siblings
            .iter()
            .find(|(_, node)| node.is_dir())
            .map(|(_, node)| node.name().to_string());

        Some(PatternSummary {
            count: siblings.len(),
            representative,
            detail: PatternDetail::Partition { key, values },
        })
    }

    fn numeric_run(&self, siblings: &[(SegmentClass, &TreeNode)]) -> Option<PatternSummary> {
        if siblings.len() < self.min_numeric_run {
            return None;
        }
        let mut group_suffix: Option<&str> = None;
        let mut min = u64::MAX;
        let mut max = 0;
        let mut min_size = u64::MAX;
        let mut max_size = 0;
        let mut total_size: u64 = 0;

        for (class, node) in siblings {
            let SegmentClass::NumericStem { number, suffix } = class else {
                return None;
            };
            let TreeNode::File(file) = node else {
                return None;
            };
            match group_suffix {
                Some(expected) if expected != suffix.as_str() => return None,
                Some(_) => {}
                None => group_suffix = Some(suffix.as_str()),
            }
            // Gaps are not checked; the run is reported as [min-max] regardless.
            min = min.min(*number);
            max = max.max(*number);
            min_size = min_size.min(file.size);
            max_size = max_size.max(file.size);
            total_size = total_size.saturating_add(file.size);
        }

        Some(PatternSummary {
            count: siblings.len(),
            representative: None,
            detail: PatternDetail::NumericRun {
                suffix: group_suffix?.to_string(),
                min,
                max,
                min_size,
                max_size,
                total_size,
            },
        })
    }

    fn date_run(&self, siblings: &[(SegmentClass, &TreeNode)]) -> Option<PatternSummary> {
        if siblings.len() < self.min_date_run {
            return None;
        }
        let mut dated: Vec<(NaiveDate, &TreeNode)> = Vec::with_capacity(siblings.len());
        for (class, node) in siblings {
            let SegmentClass::DateStem { date } = class else {
                return None;
            };
            dated.push((*date, *node));
        }
        dated.sort_by_key(|(date, _)| *date);

        let representative = dated
            .iter()
            .find(|(_, node)| node.is_dir())
            .map(|(_, node)| node.name().to_string());
        let dates = dated.into_iter().map(|(date, _)| date).collect();

        Some(PatternSummary {
            count: siblings.len(),
            representative,
            detail: PatternDetail::DateRun { dates },
        })
    }
}

/// Detect a pattern with the default thresholds.
pub fn detect(siblings: &[(SegmentClass, &TreeNode)]) -> Option<PatternSummary> {
    PatternDetector::default().detect(siblings)
}

/// Render a value list, eliding the middle once it exceeds `max_listed`.
///
/// `a,b,c` for short lists; `first,second,...,last (N total)` for long ones.
pub fn summarize_values<S: AsRef<str>>(values: &[S], max_listed: usize) -> String {
    if values.len() <= max_listed || values.len() < 3 {
        return values
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(",");
    }
    let first = values[0].as_ref();
    let second = values[1].as_ref();
    let last = values[values.len() - 1].as_ref();
    format!("{first},{second},...,{last} ({} total)", values.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::classify;
    use crate::tree::FileNode;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn file(name: &str, size: u64) -> TreeNode {
        TreeNode::File(FileNode {
            name: name.to_string(),
            size,
            modified: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    fn dir(name: &str) -> TreeNode {
        TreeNode::Directory(Directory::new(name))
    }

    fn siblings(nodes: &[TreeNode]) -> Vec<(SegmentClass, &TreeNode)> {
        nodes.iter().map(|n| (classify(n.name()), n)).collect()
    }

    #[test]
    fn test_partition_collects_values_in_order() {
        let nodes = vec![dir("year=2021"), dir("year=2020"), dir("year=2022")];
        let summary = detect(&siblings(&nodes)).unwrap();
        assert_eq!(summary.kind(), PatternKind::Partition);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.representative.as_deref(), Some("year=2021"));
        assert_eq!(
            summary.detail,
            PatternDetail::Partition {
                key: "year".to_string(),
                values: vec!["2021".into(), "2020".into(), "2022".into()],
            }
        );
    }

    #[test]
    fn test_partition_requires_single_key() {
        let nodes = vec![dir("year=2020"), dir("month=01")];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_single_partition_is_not_summarized() {
        let nodes = vec![dir("year=2020")];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_numeric_run_aggregates_sizes() {
        let nodes = vec![
            file("0.parquet", 10),
            file("1.parquet", 30),
            file("5.parquet", 20),
        ];
        let summary = detect(&siblings(&nodes)).unwrap();
        assert_eq!(summary.count, 3);
        assert_eq!(
            summary.detail,
            PatternDetail::NumericRun {
                suffix: ".parquet".to_string(),
                min: 0,
                max: 5,
                min_size: 10,
                max_size: 30,
                total_size: 60,
            }
        );
    }

    #[test]
    fn test_numeric_run_needs_three() {
        let nodes = vec![file("0.parquet", 1), file("1.parquet", 1)];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_numeric_run_rejects_mixed_suffix() {
        let nodes = vec![file("0.csv", 1), file("1.csv", 1), file("2.json", 1)];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_numeric_run_ignores_directories() {
        let nodes = vec![dir("0"), dir("1"), dir("2")];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_date_run_sorts_and_samples_first_directory() {
        let nodes = vec![dir("2024-03-01"), dir("2024-01-01"), dir("2024-02-01")];
        let summary = detect(&siblings(&nodes)).unwrap();
        assert_eq!(summary.kind(), PatternKind::DateRun);
        assert_eq!(summary.representative.as_deref(), Some("2024-01-01"));
        let PatternDetail::DateRun { dates } = summary.detail else {
            panic!("expected a date run");
        };
        assert_eq!(
            dates.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["2024-01-01", "2024-02-01", "2024-03-01"]
        );
    }

    #[test]
    fn test_mixed_classes_never_match() {
        let nodes = vec![dir("year=2020"), file("notes.txt", 3)];
        assert_eq!(detect(&siblings(&nodes)), None);
    }

    #[test]
    fn test_summarize_values() {
        let ten: Vec<String> = (2020..2030).map(|y| format!("{y}")).collect();
        assert_eq!(
            summarize_values(&ten, 10),
            "2020,2021,2022,2023,2024,2025,2026,2027,2028,2029"
        );
        let eleven: Vec<String> = (2020..=2030).map(|y| format!("{y}")).collect();
        assert_eq!(summarize_values(&eleven, 10), "2020,2021,...,2030 (11 total)");
    }
}
