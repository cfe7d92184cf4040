//! Archive fingerprint classification
//!
//! Platforms ship data download packages whose file listings differ per
//! schema variant, export-tool version and UI locale. A [`Fingerprint`] is
//! the set of file names a known variant is expected to contain; matching a
//! donated archive's listing against a registry of fingerprints identifies
//! the variant without opening a single member file.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DdpError, Result};

/// File format of a DDP variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileFormat {
    /// JSON member files
    Json,
    /// HTML member files
    Html,
    /// CSV member files
    Csv,
    /// Plain text member files
    Text,
}

/// UI language the export was produced under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UiLanguage {
    /// English
    En,
    /// Dutch
    Nl,
    /// German
    De,
    /// Spanish
    Es,
}

/// Characteristics that identify one platform/schema variant.
///
/// Immutable once registered; registries are built at startup by the
/// calling platform module and only read thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fingerprint {
    /// Unique identifier of this variant, e.g. `"json_en"`.
    pub category_id: String,
    /// Format of the member files this variant ships.
    pub file_format: FileFormat,
    /// UI language the export was produced under.
    pub ui_language: UiLanguage,
    /// Base file names a package of this variant is known to contain.
    pub known_file_names: Vec<String>,
}

impl Fingerprint {
    /// Create a fingerprint.
    pub fn new<I, S>(
        category_id: &str,
        file_format: FileFormat,
        ui_language: UiLanguage,
        known_file_names: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            category_id: category_id.to_string(),
            file_format,
            ui_language,
            known_file_names: known_file_names.into_iter().map(Into::into).collect(),
        }
    }
}

/// Outcome status of classifying one archive listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClassificationStatus {
    /// A fingerprint cleared the match threshold.
    Recognized,
    /// The listing was readable but no fingerprint cleared the threshold.
    /// A normal outcome, not an error: the donor may have picked the wrong
    /// file or the platform changed its export format.
    Unrecognized,
    /// The archive itself could not be opened. Signaled by the caller
    /// before classification; carried here so one result type covers the
    /// whole gate.
    ArchiveUnreadable,
}

/// Result of one classification call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    /// Outcome status.
    pub status: ClassificationStatus,
    /// The winning fingerprint, present only when recognized.
    pub matched: Option<Fingerprint>,
}

impl ClassificationResult {
    /// A recognized result carrying the winning fingerprint.
    pub fn recognized(fingerprint: Fingerprint) -> Self {
        Self {
            status: ClassificationStatus::Recognized,
            matched: Some(fingerprint),
        }
    }

    /// An unrecognized result.
    pub fn unrecognized() -> Self {
        Self {
            status: ClassificationStatus::Unrecognized,
            matched: None,
        }
    }

    /// Result for an archive the caller could not open.
    pub fn unreadable() -> Self {
        Self {
            status: ClassificationStatus::ArchiveUnreadable,
            matched: None,
        }
    }

    /// Whether a fingerprint was matched.
    pub fn is_recognized(&self) -> bool {
        self.status == ClassificationStatus::Recognized
    }

    /// Category id of the matched fingerprint, if any.
    pub fn category_id(&self) -> Option<&str> {
        self.matched.as_ref().map(|f| f.category_id.as_str())
    }
}

/// Default minimum percentage of known files that must be present.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 5.0;

/// Ordered, read-only collection of fingerprints for one platform.
///
/// Registration order is significant: it breaks ties between fingerprints
/// with equal match scores, so classification stays deterministic rather
/// than depending on hash-map iteration order.
#[derive(Debug, Clone)]
pub struct FingerprintRegistry {
    fingerprints: Vec<Fingerprint>,
}

impl FingerprintRegistry {
    /// Build a registry. Rejects duplicate category ids, which would make
    /// the registration-order tie-break ambiguous.
    pub fn new(fingerprints: Vec<Fingerprint>) -> Result<Self> {
        let mut seen = AHashSet::new();
        for fp in &fingerprints {
            if !seen.insert(fp.category_id.as_str()) {
                return Err(DdpError::DuplicateCategory(fp.category_id.clone()));
            }
        }
        Ok(Self { fingerprints })
    }

    /// All registered fingerprints in registration order.
    pub fn fingerprints(&self) -> &[Fingerprint] {
        &self.fingerprints
    }

    /// Look up a fingerprint by category id.
    pub fn get(&self, category_id: &str) -> Option<&Fingerprint> {
        self.fingerprints
            .iter()
            .find(|f| f.category_id == category_id)
    }

    /// Infer which fingerprint an archive listing belongs to.
    ///
    /// For each fingerprint the score is the percentage of its known files
    /// present in `entry_names`. The maximal score wins if it reaches
    /// `threshold_percent`; equal maximal scores resolve to the earliest
    /// registered fingerprint. Pure function of the two sets, independent
    /// of the order `entry_names` was collected in.
    pub fn classify(
        &self,
        entry_names: &AHashSet<String>,
        threshold_percent: f64,
    ) -> ClassificationResult {
        let mut best: Option<(&Fingerprint, f64)> = None;

        for fp in &self.fingerprints {
            if fp.known_file_names.is_empty() {
                continue;
            }
            let found = fp
                .known_file_names
                .iter()
                .filter(|name| entry_names.contains(name.as_str()))
                .count();
            let score = found as f64 / fp.known_file_names.len() as f64 * 100.0;
            debug!(category = %fp.category_id, score, "fingerprint match score");

            // Strict comparison keeps the earliest registered on ties.
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((fp, score));
            }
        }

        match best {
            Some((fp, score)) if score >= threshold_percent => {
                debug!(category = %fp.category_id, score, "archive recognized");
                ClassificationResult::recognized(fp.clone())
            }
            _ => {
                debug!("no fingerprint cleared the match threshold");
                ClassificationResult::unrecognized()
            }
        }
    }
}

/// Keep the base names of `names` whose suffix is in `extensions`.
///
/// The caller-side filter applied to a raw zip entry listing before
/// classification: directory components are stripped, and only names with a
/// format-relevant suffix (e.g. `.json`, `.html`) are kept.
pub fn filter_by_extension<I, S>(names: I, extensions: &[&str]) -> AHashSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| {
            let base = name.as_ref().rsplit('/').next().unwrap_or(name.as_ref());
            extensions
                .iter()
                .any(|ext| base.ends_with(ext))
                .then(|| base.to_string())
        })
        .collect()
}
