//! README discovery in a product's root listing.

use crate::entry::ListingRecord;

/// File names recognized as a product README, compared case-insensitively.
pub const README_NAMES: [&str; 4] = ["readme.md", "readme.markdown", "readme.txt", "readme"];

/// Find the first root-level README among `records`.
///
/// Keys are expected relative to the product root; nested READMEs and
/// directory markers are ignored.
pub fn find_readme(records: &[ListingRecord]) -> Option<&ListingRecord> {
    records.iter().find(|record| {
        !record.is_directory_marker()
            && !record.key.contains('/')
            && README_NAMES.contains(&record.key.to_lowercase().as_str())
    })
}
