//! Error types for the DDP kernel

use thiserror::Error;

/// DDP kernel error types
///
/// "Not found" conditions (unrecognized archive, absent field) are not
/// errors; they are reported as ordinary values. Only genuinely exceptional
/// conditions surface here.
#[derive(Debug, Error)]
pub enum DdpError {
    /// An epoch timestamp could not be converted to ISO 8601 under the
    /// strict policy. Carries the offending raw value.
    #[error("Cannot convert epoch timestamp: {raw:?}")]
    TimestampConversion {
        /// The raw input that failed to convert.
        raw: String,
    },
    /// Two fingerprints were registered under the same category id.
    #[error("Duplicate fingerprint category: {0}")]
    DuplicateCategory(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, DdpError>;
