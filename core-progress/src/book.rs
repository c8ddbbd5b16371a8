//! # Book Progress
//!
//! Folds a book's ordered `ChapterProgress` records into book-level counts.
//! A book's percentage is the share of *chapters* complete, not a
//! verse-weighted average: a book is complete iff every chapter is complete.
//! Chapters with no verses defined cannot contribute to completion in either
//! direction, so they are excluded from the buckets and the denominator.

use serde::{Deserialize, Serialize};

use core_scripture::BookId;

use crate::chapter::{completion_percentage, ChapterProgress, ProgressStatus};

/// Progress of a single book, rolled up from its chapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookProgress {
    pub book_id: BookId,
    /// Per-chapter records in canonical chapter order (zero-verse chapters
    /// included for display, excluded from the counts below)
    pub chapters: Vec<ChapterProgress>,
    pub completed_chapters: u32,
    pub in_progress_chapters: u32,
    pub not_started_chapters: u32,
    /// Share of countable chapters complete; 100 only when all are
    pub percentage: u8,
}

impl BookProgress {
    /// Aggregate chapter records into book-level counts.
    ///
    /// Associative and order-independent: shuffling `chapters` changes only
    /// the display order, never the computed numbers.
    pub fn from_chapters(book_id: BookId, chapters: Vec<ChapterProgress>) -> Self {
        let mut completed = 0u32;
        let mut in_progress = 0u32;
        let mut not_started = 0u32;

        for chapter in chapters.iter().filter(|c| c.total_verses > 0) {
            match chapter.status {
                ProgressStatus::Complete => completed += 1,
                ProgressStatus::InProgress => in_progress += 1,
                ProgressStatus::NotStarted => not_started += 1,
            }
        }

        let total = completed + in_progress + not_started;

        Self {
            book_id,
            chapters,
            completed_chapters: completed,
            in_progress_chapters: in_progress,
            not_started_chapters: not_started,
            percentage: completion_percentage(completed, total),
        }
    }

    /// Number of chapters counted in the denominator
    pub fn total_chapters(&self) -> u32 {
        self.completed_chapters + self.in_progress_chapters + self.not_started_chapters
    }

    /// A book is complete iff it has at least one countable chapter and all
    /// of them are complete.
    pub fn is_complete(&self) -> bool {
        self.total_chapters() > 0 && self.completed_chapters == self.total_chapters()
    }

    /// Look up the record for one chapter
    pub fn chapter(&self, chapter_id: &core_scripture::ChapterId) -> Option<&ChapterProgress> {
        self.chapters.iter().find(|c| c.chapter_id == *chapter_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_scripture::{BookId, Chapter};

    fn chapter_progress(total: u32, covered: u32) -> ChapterProgress {
        let chapter = Chapter::new(BookId::new(), 1, total);
        ChapterProgress::detailed_text(&chapter, covered)
    }

    #[test]
    fn test_bucket_counts_sum_to_total() {
        let progress = BookProgress::from_chapters(
            BookId::new(),
            vec![
                chapter_progress(10, 10),
                chapter_progress(8, 3),
                chapter_progress(6, 0),
                chapter_progress(4, 4),
            ],
        );

        assert_eq!(progress.completed_chapters, 2);
        assert_eq!(progress.in_progress_chapters, 1);
        assert_eq!(progress.not_started_chapters, 1);
        assert_eq!(progress.total_chapters(), 4);
        assert_eq!(progress.percentage, 50);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_zero_verse_chapters_excluded() {
        let progress = BookProgress::from_chapters(
            BookId::new(),
            vec![
                chapter_progress(10, 10),
                chapter_progress(0, 0),
                chapter_progress(0, 0),
            ],
        );

        // Still visible in the chapter list, invisible in the counts
        assert_eq!(progress.chapters.len(), 3);
        assert_eq!(progress.total_chapters(), 1);
        assert_eq!(progress.percentage, 100);
        assert!(progress.is_complete());
    }

    #[test]
    fn test_empty_book() {
        let progress = BookProgress::from_chapters(BookId::new(), vec![]);
        assert_eq!(progress.total_chapters(), 0);
        assert_eq!(progress.percentage, 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_book_of_only_zero_verse_chapters() {
        let progress = BookProgress::from_chapters(
            BookId::new(),
            vec![chapter_progress(0, 0), chapter_progress(0, 0)],
        );
        assert_eq!(progress.total_chapters(), 0);
        assert_eq!(progress.percentage, 0);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let records = vec![
            chapter_progress(10, 10),
            chapter_progress(8, 3),
            chapter_progress(6, 0),
            chapter_progress(4, 4),
            chapter_progress(0, 0),
        ];

        let book_id = BookId::new();
        let forward = BookProgress::from_chapters(book_id, records.clone());

        let mut reversed_records = records;
        reversed_records.reverse();
        let reversed = BookProgress::from_chapters(book_id, reversed_records);

        assert_eq!(forward.completed_chapters, reversed.completed_chapters);
        assert_eq!(forward.in_progress_chapters, reversed.in_progress_chapters);
        assert_eq!(forward.not_started_chapters, reversed.not_started_chapters);
        assert_eq!(forward.percentage, reversed.percentage);
    }

    #[test]
    fn test_percentage_caps_below_complete() {
        // 199 of 200 chapters complete must not display as 100%
        let mut records: Vec<ChapterProgress> =
            (0..199).map(|_| chapter_progress(5, 5)).collect();
        records.push(chapter_progress(5, 2));

        let progress = BookProgress::from_chapters(BookId::new(), records);
        assert_eq!(progress.percentage, 99);
        assert!(!progress.is_complete());
    }

    #[test]
    fn test_chapter_lookup() {
        let record = chapter_progress(10, 4);
        let id = record.chapter_id;
        let progress = BookProgress::from_chapters(BookId::new(), vec![record]);

        assert_eq!(progress.chapter(&id).unwrap().covered_verses, 4);
        assert!(progress
            .chapter(&core_scripture::ChapterId::new())
            .is_none());
    }
}
