//! Coverage query contract
//!
//! The remote data store implements these traits; the engine only reads
//! through them. Each content type has a per-chapter detail query and a bulk
//! "any coverage at all" query. The bulk variant exists so that listing a
//! whole bible version never requires per-verse queries; fast-mode progress
//! is computed from it alone.

use async_trait::async_trait;
use std::collections::HashSet;

use core_scripture::{ChapterId, VerseId};

use crate::coverage::{AudioCoverage, AudioVersionId, TextVersionId};
use crate::error::Result;

/// Coverage queries for audio recordings.
///
/// Audio coverage is range-based: each media file covers one contiguous span
/// of verses within a chapter, and spans from different files may overlap.
#[async_trait]
pub trait AudioCoverageStore: Send + Sync {
    /// All coverage facts recorded for one chapter.
    async fn chapter_coverage(
        &self,
        audio_version_id: AudioVersionId,
        chapter_id: ChapterId,
    ) -> Result<Vec<AudioCoverage>>;

    /// Of the given chapters, the subset that has at least one coverage fact.
    async fn chapters_with_any_coverage(
        &self,
        audio_version_id: AudioVersionId,
        chapter_ids: &[ChapterId],
    ) -> Result<HashSet<ChapterId>>;
}

/// Coverage queries for text transcriptions.
///
/// Text coverage is per-verse: a verse is covered iff its text field is
/// non-empty after trimming. The store applies that rule; the engine only
/// sees the resulting verse-id set.
#[async_trait]
pub trait TextCoverageStore: Send + Sync {
    /// Ids of verses in one chapter that have non-empty text.
    async fn chapter_text_coverage(
        &self,
        text_version_id: TextVersionId,
        chapter_id: ChapterId,
    ) -> Result<HashSet<VerseId>>;

    /// Of the given chapters, the subset with at least one verse of text.
    async fn chapters_with_any_text(
        &self,
        text_version_id: TextVersionId,
        chapter_ids: &[ChapterId],
    ) -> Result<HashSet<ChapterId>>;
}
