//! Hierarchy query contract
//!
//! The remote data store implements this trait; the core only ever reads
//! through it. Reference data is expected to be complete and consistent:
//! `Chapter::total_verses` equals the number of rows `get_verses` returns.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{BibleVersionId, Book, BookId, Chapter, ChapterId, Verse};

/// Read-only access to the Scripture hierarchy
///
/// # Example
///
/// ```ignore
/// use core_scripture::{ScriptureStore, BibleVersionId};
///
/// async fn book_count(store: &dyn ScriptureStore, version: BibleVersionId) -> usize {
///     store.get_books(version).await.map(|b| b.len()).unwrap_or(0)
/// }
/// ```
#[async_trait]
pub trait ScriptureStore: Send + Sync {
    /// List all books of a bible version, in canonical order
    async fn get_books(&self, bible_version_id: BibleVersionId) -> Result<Vec<Book>>;

    /// List all chapters of a book, in chapter-number order
    async fn get_chapters(&self, book_id: BookId) -> Result<Vec<Chapter>>;

    /// List all verses of a chapter, in verse-number order
    async fn get_verses(&self, chapter_id: ChapterId) -> Result<Vec<Verse>>;
}
