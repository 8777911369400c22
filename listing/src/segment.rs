//! Path segment classification.
//!
//! Every path segment is sorted into exactly one [`SegmentClass`]. The checks
//! run in a fixed order and the first match wins:
//!
//! 1. `key=value` Hive partition tokens
//! 2. numeric stems such as `83.parquet`
//! 3. ISO calendar dates such as `2024-06-01`
//! 4. anything else

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

static PARTITION_RE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.-]+=[A-Za-z0-9_.-]+$").ok());

/// The shape of a single path segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "class")]
pub enum SegmentClass {
    /// A name with no recognizable structure.
    Plain { name: String },

    /// A Hive-style `key=value` partition token.
    Partition { key: String, value: String },

    /// A purely numeric stem with its dot-extension, e.g. `83` + `.parquet`.
    NumericStem { number: u64, suffix: String },

    /// A `YYYY-MM-DD` calendar date.
    DateStem { date: NaiveDate },
}

impl SegmentClass {
    /// Short label naming the class, as logged by pattern detection.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Plain { .. } => "plain",
            Self::Partition { .. } => "partition",
            Self::NumericStem { .. } => "numeric",
            Self::DateStem { .. } => "date",
        }
    }
}

/// Classify a path segment.
///
/// Malformed segments (empty, or carrying control characters) are `Plain`;
/// classification never fails.
pub fn classify(segment: &str) -> SegmentClass {
    if segment.is_empty() || segment.chars().any(char::is_control) {
        return plain(segment);
    }

    if let Some((key, value)) = partition(segment) {
        return SegmentClass::Partition {
            key: key.to_string(),
            value: value.to_string(),
        };
    }

    if let Some((number, suffix)) = numeric_stem(segment) {
        return SegmentClass::NumericStem {
            number,
            suffix: suffix.to_string(),
        };
    }

    if let Some(date) = calendar_date(segment) {
        return SegmentClass::DateStem { date };
    }

    plain(segment)
}

fn plain(segment: &str) -> SegmentClass {
    SegmentClass::Plain {
        name: segment.to_string(),
    }
}

fn partition(segment: &str) -> Option<(&str, &str)> {
    let re = PARTITION_RE.as_ref()?;
    if !re.is_match(segment) {
        return None;
    }
    segment.split_once('=')
}

/// Split off the dot-extension and parse the remaining stem as a number.
fn numeric_stem(segment: &str) -> Option<(u64, &str)> {
    let (stem, suffix) = match segment.rfind('.') {
        Some(idx) => segment.split_at(idx),
        None => (segment, ""),
    };
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number = stem.parse::<u64>().ok()?;
    Some((number, suffix))
}

fn calendar_date(segment: &str) -> Option<NaiveDate> {
    // chrono accepts unpadded fields and signed years; insist on the strict shape.
    let bytes = segment.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    let digits_ok = bytes
        .iter()
        .enumerate()
        .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !digits_ok {
        return None;
    }
    NaiveDate::parse_from_str(segment, "%Y-%m-%d").ok()
}
