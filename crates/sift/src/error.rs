//! Error types for the sift crate.

use thiserror::Error;

/// Errors that can occur when building predicates.
///
/// Evaluation itself never fails; malformed chains degrade to the
/// universal-true operation instead.
#[derive(Debug, Error)]
pub enum SiftError {
    /// Invalid regular expression pattern.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for sift operations.
pub type Result<T> = std::result::Result<T, SiftError>;
