//! Error types for listing compaction.

use thiserror::Error;

/// Result type alias for listing operations.
pub type Result<T> = std::result::Result<T, ListingError>;

/// Errors that can occur while preparing a listing for compaction.
///
/// Compaction itself never fails: malformed segments degrade to verbatim
/// enumeration. Only caller mistakes at the input boundary are reported.
#[derive(Error, Debug)]
pub enum ListingError {
    /// A record had no path segments after normalization.
    #[error("empty path for object key: {0:?}")]
    EmptyPath(String),

    /// An argument was outside its accepted range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
