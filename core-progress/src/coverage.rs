//! Typed coverage facts and content-version selection
//!
//! Coverage rows arrive from the store in two structurally different shapes:
//! verse-number spans for audio recordings and per-verse-id sets for text.
//! Both are given explicit types at this boundary; nothing downstream handles
//! untyped rows.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use core_scripture::{BibleVersionId, ChapterId};

use crate::error::{ProgressError, Result};
use crate::store::{AudioCoverageStore, TextCoverageStore};

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for an audio version (one recording project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AudioVersionId(pub Uuid);

impl AudioVersionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ProgressError::InvalidSelection(e.to_string()))
    }
}

impl Default for AudioVersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AudioVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a text version (one transcription project)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextVersionId(pub Uuid);

impl TextVersionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| ProgressError::InvalidSelection(e.to_string()))
    }
}

impl Default for TextVersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TextVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The content version whose coverage is being aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentVersionId {
    Audio(AudioVersionId),
    Text(TextVersionId),
}

impl ContentVersionId {
    pub fn is_audio(&self) -> bool {
        matches!(self, Self::Audio(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }
}

/// What the caller is looking at: one bible version, one content version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub bible_version_id: BibleVersionId,
    pub content_version: ContentVersionId,
}

impl Selection {
    pub fn audio(bible_version_id: BibleVersionId, audio_version_id: AudioVersionId) -> Self {
        Self {
            bible_version_id,
            content_version: ContentVersionId::Audio(audio_version_id),
        }
    }

    pub fn text(bible_version_id: BibleVersionId, text_version_id: TextVersionId) -> Self {
        Self {
            bible_version_id,
            content_version: ContentVersionId::Text(text_version_id),
        }
    }
}

// =============================================================================
// Coverage Facts
// =============================================================================

/// One audio coverage fact: a media file spanning a verse range in a chapter
///
/// Spans are inclusive on both ends. Facts for the same chapter may overlap
/// or be disjoint; reconciliation dedups them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioCoverage {
    pub chapter_id: ChapterId,
    pub start_verse: u32,
    pub end_verse: u32,
}

impl AudioCoverage {
    pub fn new(chapter_id: ChapterId, start_verse: u32, end_verse: u32) -> Self {
        Self {
            chapter_id,
            start_verse,
            end_verse,
        }
    }

    /// Validate the span invariant: `1 <= start_verse <= end_verse`
    pub fn validate(&self) -> Result<()> {
        if self.start_verse == 0 {
            return Err(ProgressError::InvalidCoverageFact(format!(
                "start verse must be positive (chapter {})",
                self.chapter_id
            )));
        }

        if self.end_verse < self.start_verse {
            return Err(ProgressError::InvalidCoverageFact(format!(
                "end verse {} precedes start verse {} (chapter {})",
                self.end_verse, self.start_verse, self.chapter_id
            )));
        }

        Ok(())
    }
}

/// Expand audio coverage facts into the covered verse numbers of a chapter.
///
/// Numbers beyond `total_verses` are clamped away: a span reaching past the
/// end of the chapter contributes only the verses that exist. Duplicates from
/// overlapping facts are fine; reconciliation dedups.
pub fn covered_verse_numbers(facts: &[AudioCoverage], total_verses: u32) -> Result<Vec<u32>> {
    let mut numbers = Vec::new();

    for fact in facts {
        fact.validate()?;

        if fact.start_verse > total_verses {
            continue;
        }

        let end = fact.end_verse.min(total_verses);
        numbers.extend(fact.start_verse..=end);
    }

    Ok(numbers)
}

// =============================================================================
// Coverage Source
// =============================================================================

/// The coverage store bound to the selected content version
///
/// Decided once at the boundary; everything downstream dispatches on this
/// enum instead of re-deriving the content type.
#[derive(Clone)]
pub enum CoverageSource {
    Audio {
        audio_version_id: AudioVersionId,
        store: Arc<dyn AudioCoverageStore>,
    },
    Text {
        text_version_id: TextVersionId,
        store: Arc<dyn TextCoverageStore>,
    },
}

impl CoverageSource {
    pub fn audio(audio_version_id: AudioVersionId, store: Arc<dyn AudioCoverageStore>) -> Self {
        Self::Audio {
            audio_version_id,
            store,
        }
    }

    pub fn text(text_version_id: TextVersionId, store: Arc<dyn TextCoverageStore>) -> Self {
        Self::Text {
            text_version_id,
            store,
        }
    }

    /// The content version this source serves
    pub fn content_version(&self) -> ContentVersionId {
        match self {
            Self::Audio {
                audio_version_id, ..
            } => ContentVersionId::Audio(*audio_version_id),
            Self::Text {
                text_version_id, ..
            } => ContentVersionId::Text(*text_version_id),
        }
    }

    /// Whether detailed progress for this source carries verse spans
    pub fn has_spans(&self) -> bool {
        matches!(self, Self::Audio { .. })
    }

    /// Bulk fast-mode query: which of these chapters have any coverage at all
    pub(crate) async fn chapters_with_any_coverage(
        &self,
        chapter_ids: &[ChapterId],
    ) -> Result<HashSet<ChapterId>> {
        match self {
            Self::Audio {
                audio_version_id,
                store,
            } => {
                store
                    .chapters_with_any_coverage(*audio_version_id, chapter_ids)
                    .await
            }
            Self::Text {
                text_version_id,
                store,
            } => store.chapters_with_any_text(*text_version_id, chapter_ids).await,
        }
    }
}

impl fmt::Debug for CoverageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Audio {
                audio_version_id, ..
            } => f
                .debug_struct("CoverageSource::Audio")
                .field("audio_version_id", audio_version_id)
                .finish_non_exhaustive(),
            Self::Text {
                text_version_id, ..
            } => f
                .debug_struct("CoverageSource::Text")
                .field("text_version_id", text_version_id)
                .finish_non_exhaustive(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
