//! # Progress Error Types
//!
//! "No data" conditions (unknown selection, missing hierarchy rows, chapters
//! with no coverage) are never errors here; they surface as zero progress.
//! Errors are reserved for transport failures and invariant violations.

use thiserror::Error;

/// Errors that can occur while computing coverage progress.
///
/// `Clone` because a failed detail load is broadcast to every caller that
/// attached to it.
#[derive(Error, Debug, Clone)]
pub enum ProgressError {
    /// Reference data for a requested id is missing from the store.
    #[error("Hierarchy unavailable: {entity_type} with id {id}")]
    HierarchyUnavailable { entity_type: String, id: String },

    /// A chapter's detail fetch failed; the chapter degrades to not-started.
    #[error("Coverage fetch failed for chapter {chapter_id}: {reason}")]
    CoverageFetchFailed { chapter_id: String, reason: String },

    /// The selected content version does not match the coverage source.
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// The engine was constructed with an unusable configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A coverage fact violates a structural invariant (invalid verse span).
    #[error("Invalid coverage fact: {0}")]
    InvalidCoverageFact(String),

    /// A whole-book detail load failed before any chapter could be computed.
    #[error("Detail load failed for book {book_id}")]
    DetailLoadFailed { book_id: String },

    /// Underlying store error.
    #[error("Store error: {0}")]
    Store(String),
}

impl From<core_scripture::ScriptureError> for ProgressError {
    fn from(err: core_scripture::ScriptureError) -> Self {
        match err {
            core_scripture::ScriptureError::NotFound { entity_type, id } => {
                Self::HierarchyUnavailable { entity_type, id }
            }
            other => Self::Store(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProgressError>;
