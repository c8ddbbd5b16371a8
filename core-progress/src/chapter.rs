//! # Chapter Progress
//!
//! One `ChapterProgress` record per chapter, produced in one of two tiers:
//!
//! - **Fast mode**: only "does this chapter have any coverage fact at all" is
//!   known, so the chapter is approximated as fully done or fully empty.
//!   Listing a project with thousands of chapters must not require per-verse
//!   queries; partial state becomes visible only after a detail load.
//! - **Detailed mode**: exact covered-verse counts, via range reconciliation
//!   for audio or distinct covered verse ids for text.
//!
//! The two tiers agree exactly at 0% and 100%.

use serde::{Deserialize, Serialize};

use core_scripture::{Chapter, ChapterId};

use crate::reconcile::{Reconciliation, VerseSpan};

/// Completion status of a chapter or book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// No verse has any coverage
    NotStarted,
    /// Some but not all verses are covered
    InProgress,
    /// Every verse is covered
    Complete,
}

impl ProgressStatus {
    /// Derive status from covered/total verse counts
    pub fn from_counts(covered_verses: u32, total_verses: u32) -> Self {
        if covered_verses == 0 || total_verses == 0 {
            Self::NotStarted
        } else if covered_verses >= total_verses {
            Self::Complete
        } else {
            Self::InProgress
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::InProgress => "in_progress",
            Self::Complete => "complete",
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Integer percentage of `part` out of `whole`.
///
/// Rounded half away from zero, except that 100 is reported only for
/// everything: a partially covered chapter of 200 verses must not round up
/// to 100.
pub(crate) fn completion_percentage(part: u32, whole: u32) -> u8 {
    if whole == 0 || part == 0 {
        return 0;
    }

    if part >= whole {
        return 100;
    }

    let rounded = ((part as f64 / whole as f64) * 100.0).round() as u8;
    rounded.min(99)
}

/// Progress of a single chapter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChapterProgress {
    pub chapter_id: ChapterId,
    /// Denominator for completion math; from the hierarchy, not coverage
    pub total_verses: u32,
    pub covered_verses: u32,
    /// 0-100; equals 100 only when the chapter is complete
    pub percentage: u8,
    pub status: ProgressStatus,
    /// Covered verse spans, present only once an audio detail load ran
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranges: Option<Vec<VerseSpan>>,
}

impl ChapterProgress {
    fn from_counts(chapter: &Chapter, covered_verses: u32, ranges: Option<Vec<VerseSpan>>) -> Self {
        let covered = covered_verses.min(chapter.total_verses);
        Self {
            chapter_id: chapter.id,
            total_verses: chapter.total_verses,
            covered_verses: covered,
            percentage: completion_percentage(covered, chapter.total_verses),
            status: ProgressStatus::from_counts(covered, chapter.total_verses),
            ranges,
        }
    }

    /// Fast-mode approximation: fully done if any coverage fact exists,
    /// fully empty otherwise.
    pub fn fast(chapter: &Chapter, has_any_coverage: bool) -> Self {
        let covered = if has_any_coverage {
            chapter.total_verses
        } else {
            0
        };
        Self::from_counts(chapter, covered, None)
    }

    /// Detailed audio progress from a reconciliation of coverage spans
    pub fn detailed_audio(chapter: &Chapter, reconciliation: Reconciliation) -> Self {
        Self::from_counts(
            chapter,
            reconciliation.covered_count,
            Some(reconciliation.spans),
        )
    }

    /// Detailed text progress from a distinct covered-verse count.
    ///
    /// Text coverage is not range-based, so no spans are attached.
    pub fn detailed_text(chapter: &Chapter, covered_verses: u32) -> Self {
        Self::from_counts(chapter, covered_verses, None)
    }

    /// Fallback when a chapter's detail fetch failed: not started.
    ///
    /// One bad chapter must not block visibility of the rest of its book.
    pub fn fetch_failed(chapter: &Chapter, with_spans: bool) -> Self {
        let ranges = if with_spans { Some(Vec::new()) } else { None };
        Self::from_counts(chapter, 0, ranges)
    }

    /// Fallback when the hierarchy has no such chapter.
    ///
    /// Absence of structure is absence of progress, not an error.
    pub fn missing(chapter_id: ChapterId) -> Self {
        Self {
            chapter_id,
            total_verses: 0,
            covered_verses: 0,
            percentage: 0,
            status: ProgressStatus::NotStarted,
            ranges: None,
        }
    }

    /// Whether this record carries covered verse spans (audio detail)
    pub fn has_ranges(&self) -> bool {
        self.ranges.is_some()
    }
}
