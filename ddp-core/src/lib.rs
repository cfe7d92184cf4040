//! DDP Core - Recognition and normalization kernel for data download packages
//!
//! This crate provides the schema-variance kernel every platform module of a
//! data-donation application is built on, with no I/O dependencies. It
//! includes:
//!
//! - Archive fingerprint classification (which platform/schema variant does
//!   a file listing belong to)
//! - Structural flattening of JSON documents into path→value records
//! - Depth-based "least-nested match wins" field lookup
//! - Scalar classification and timestamp normalization
//!
//! All operations are pure, synchronous computations over in-memory values:
//! the crate never opens an archive, decodes bytes, or touches the network.
//! Calls for different documents are independent and safe to run from
//! multiple threads as long as the fingerprint registry is built once and
//! only read afterwards.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod fingerprint;
pub mod flatten;
pub mod lookup;
pub mod path;
pub mod scalar;
pub mod timestamp;

// Re-export commonly used types
pub use error::{DdpError, Result};
pub use fingerprint::{
    filter_by_extension, ClassificationResult, ClassificationStatus, FileFormat, Fingerprint,
    FingerprintRegistry, UiLanguage, DEFAULT_THRESHOLD_PERCENT,
};
pub use flatten::{flatten, FlatEntry, FlatRecord, LeafValue, ValueKind};
pub use path::{JsonPath, PathSegment};
pub use scalar::LeafClasses;
