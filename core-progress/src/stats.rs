//! Version-wide aggregate statistics
//!
//! Derived strictly from per-book aggregates so the book and chapter numbers
//! can never disagree with what the book list displays.

use serde::{Deserialize, Serialize};

use crate::book::BookProgress;
use crate::chapter::completion_percentage;

/// Completed-out-of-total counter with a derived percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompletionCounts {
    pub completed: u32,
    pub total: u32,
    pub percentage: u8,
}

impl CompletionCounts {
    pub fn new(completed: u32, total: u32) -> Self {
        Self {
            completed,
            total,
            percentage: completion_percentage(completed, total),
        }
    }

    pub fn remaining(&self) -> u32 {
        self.total.saturating_sub(self.completed)
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.completed == self.total
    }
}

/// Aggregate progress over an entire bible version for one content version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressStats {
    pub books_progress: CompletionCounts,
    pub chapters_progress: CompletionCounts,
    /// Unix timestamp when the stats were computed
    pub computed_at: i64,
}

impl ProgressStats {
    /// Roll book aggregates up into version-wide counts.
    ///
    /// A book counts as completed iff its own aggregation says so; chapter
    /// counts are the sums of the per-book numbers. Neither is estimated
    /// independently of `BookProgress`.
    pub fn from_books(books: &[BookProgress]) -> Self {
        let books_completed = books.iter().filter(|b| b.is_complete()).count() as u32;
        let chapters_completed = books.iter().map(|b| b.completed_chapters).sum();
        let chapters_total = books.iter().map(|b| b.total_chapters()).sum();

        Self {
            books_progress: CompletionCounts::new(books_completed, books.len() as u32),
            chapters_progress: CompletionCounts::new(chapters_completed, chapters_total),
            computed_at: chrono::Utc::now().timestamp(),
        }
    }

    /// Zero aggregates, for selections with no data
    pub fn empty() -> Self {
        Self {
            books_progress: CompletionCounts::default(),
            chapters_progress: CompletionCounts::default(),
            computed_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.books_progress.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chapter::ChapterProgress;
    use core_scripture::{BookId, Chapter};

    fn book(completed: u32, partial: u32, untouched: u32) -> BookProgress {
        let book_id = BookId::new();
        let mut records = Vec::new();

        for _ in 0..completed {
            let ch = Chapter::new(book_id, 1, 10);
            records.push(ChapterProgress::detailed_text(&ch, 10));
        }
        for _ in 0..partial {
            let ch = Chapter::new(book_id, 1, 10);
            records.push(ChapterProgress::detailed_text(&ch, 4));
        }
        for _ in 0..untouched {
            let ch = Chapter::new(book_id, 1, 10);
            records.push(ChapterProgress::detailed_text(&ch, 0));
        }

        BookProgress::from_chapters(book_id, records)
    }

    #[test]
    fn test_from_books() {
        let books = vec![book(5, 0, 0), book(2, 1, 1), book(0, 0, 3)];
        let stats = ProgressStats::from_books(&books);

        assert_eq!(stats.books_progress.completed, 1);
        assert_eq!(stats.books_progress.total, 3);
        assert_eq!(stats.books_progress.percentage, 33);

        assert_eq!(stats.chapters_progress.completed, 7);
        assert_eq!(stats.chapters_progress.total, 12);
        assert!(stats.computed_at > 0);
    }

    #[test]
    fn test_chapter_sum_matches_books() {
        let books = vec![book(3, 2, 0), book(1, 0, 4)];
        let stats = ProgressStats::from_books(&books);

        let summed: u32 = books.iter().map(|b| b.completed_chapters).sum();
        assert_eq!(stats.chapters_progress.completed, summed);
    }

    #[test]
    fn test_empty() {
        let stats = ProgressStats::empty();
        assert_eq!(stats.books_progress.total, 0);
        assert_eq!(stats.chapters_progress.total, 0);
        assert_eq!(stats.books_progress.percentage, 0);
        assert!(!stats.is_complete());

        // Identical to aggregating no books
        let from_none = ProgressStats::from_books(&[]);
        assert_eq!(from_none.books_progress, stats.books_progress);
        assert_eq!(from_none.chapters_progress, stats.chapters_progress);
    }

    #[test]
    fn test_fully_complete_version() {
        let books = vec![book(4, 0, 0), book(6, 0, 0)];
        let stats = ProgressStats::from_books(&books);

        assert!(stats.is_complete());
        assert_eq!(stats.books_progress.percentage, 100);
        assert_eq!(stats.chapters_progress.percentage, 100);
    }

    #[test]
    fn test_completion_counts_helpers() {
        let counts = CompletionCounts::new(3, 10);
        assert_eq!(counts.remaining(), 7);
        assert!(!counts.is_complete());

        let done = CompletionCounts::new(10, 10);
        assert_eq!(done.remaining(), 0);
        assert!(done.is_complete());

        // Empty totals are never "complete"
        assert!(!CompletionCounts::new(0, 0).is_complete());
    }
}
