//! # Progress Service
//!
//! Façade wiring the hierarchy store, the coverage source, and the detail
//! cache into the API the UI consumes. One service instance serves one
//! `Selection`; switching the bible version or the content version means
//! constructing a new service, which also starts a fresh (empty) detail
//! cache for that selection.
//!
//! ## Data flow
//!
//! Listing calls (`book_progress`, `progress_stats`) run in fast mode from
//! one bulk coverage query and are safe to issue on every render. Expanding
//! a book calls `request_detailed_book_progress`, after which the same
//! listing calls transparently substitute exact per-verse detail for that
//! book in place of the boolean approximation.

use std::sync::Arc;

use tracing::{debug, instrument};

use core_scripture::{Book, BookId, Chapter, ChapterId, ScriptureError, ScriptureStore};

use crate::book::BookProgress;
use crate::cache::{DetailCache, DetailState};
use crate::chapter::ChapterProgress;
use crate::config::ProgressConfig;
use crate::coverage::{CoverageSource, Selection};
use crate::error::{ProgressError, Result};
use crate::stats::ProgressStats;

/// Coverage progress engine for one selection.
pub struct ProgressService {
    scripture: Arc<dyn ScriptureStore>,
    source: CoverageSource,
    selection: Selection,
    cache: DetailCache,
}

impl ProgressService {
    /// Create a service for one bible-version/content-version selection.
    ///
    /// Fails with `InvalidSelection` when the coverage source does not serve
    /// the selected content version.
    pub fn new(
        scripture: Arc<dyn ScriptureStore>,
        source: CoverageSource,
        selection: Selection,
        config: ProgressConfig,
    ) -> Result<Self> {
        if source.content_version() != selection.content_version {
            return Err(ProgressError::InvalidSelection(format!(
                "selection targets {:?} but the coverage source serves {:?}",
                selection.content_version,
                source.content_version()
            )));
        }

        config.validate().map_err(ProgressError::InvalidConfig)?;

        let cache = DetailCache::new(scripture.clone(), source.clone(), config);

        Ok(Self {
            scripture,
            source,
            selection,
            cache,
        })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Progress for every book of the selected bible version.
    ///
    /// Fast mode throughout, except that books whose detail has been loaded
    /// report exact per-verse numbers. One bulk coverage query regardless of
    /// how many books the version has.
    #[instrument(skip(self))]
    pub async fn book_progress(&self) -> Result<Vec<BookProgress>> {
        let books = self.books_for_selection().await?;
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let chapter_ids: Vec<ChapterId> = books
            .iter()
            .flat_map(|book| book.chapters.iter().map(|chapter| chapter.id))
            .collect();
        let covered = self.source.chapters_with_any_coverage(&chapter_ids).await?;

        let mut result = Vec::with_capacity(books.len());
        for book in &books {
            let detail = self.cache.loaded_book(&book.id).await;
            let records = book
                .chapters
                .iter()
                .map(|chapter| {
                    detail
                        .as_ref()
                        .and_then(|map| map.get(&chapter.id).cloned())
                        .unwrap_or_else(|| {
                            ChapterProgress::fast(chapter, covered.contains(&chapter.id))
                        })
                })
                .collect();
            result.push(BookProgress::from_chapters(book.id, records));
        }

        Ok(result)
    }

    /// Version-wide aggregate statistics for the selection.
    pub async fn progress_stats(&self) -> Result<ProgressStats> {
        let books = self.book_progress().await?;
        Ok(ProgressStats::from_books(&books))
    }

    /// Load exact per-verse detail for one book into the cache.
    ///
    /// Idempotent; concurrent calls for the same book share one load. After
    /// this resolves, `book_progress` and `chapter_progress` report exact
    /// numbers for the book.
    #[instrument(skip(self))]
    pub async fn request_detailed_book_progress(&self, book_id: BookId) -> Result<()> {
        self.cache.request_detail(book_id).await.map(|_| ())
    }

    /// Cache state for a book, for spinner-versus-empty display decisions.
    pub async fn detail_state(&self, book_id: &BookId) -> DetailState {
        self.cache.state(book_id).await
    }

    /// Best-effort progress for one chapter.
    ///
    /// Returns loaded detail when available, the fast approximation
    /// otherwise. Never waits for an in-flight detail load.
    pub async fn chapter_progress(
        &self,
        book_id: BookId,
        chapter_id: ChapterId,
    ) -> Result<ChapterProgress> {
        if let Some(map) = self.cache.loaded_book(&book_id).await {
            return Ok(map
                .get(&chapter_id)
                .cloned()
                .unwrap_or_else(|| ChapterProgress::missing(chapter_id)));
        }

        let chapters = self.chapters_for_book(book_id).await?;
        let Some(chapter) = chapters.into_iter().find(|c| c.id == chapter_id) else {
            return Ok(ChapterProgress::missing(chapter_id));
        };

        let covered = self.source.chapters_with_any_coverage(&[chapter_id]).await?;
        Ok(ChapterProgress::fast(&chapter, covered.contains(&chapter_id)))
    }

    /// Books of the selected bible version, in canonical order.
    ///
    /// An unknown bible version yields zero books, not an error.
    async fn books_for_selection(&self) -> Result<Vec<Book>> {
        match self.scripture.get_books(self.selection.bible_version_id).await {
            Ok(mut books) => {
                books.sort_by_key(|book| book.order);
                Ok(books)
            }
            Err(ScriptureError::NotFound { .. }) => {
                debug!(
                    "No books for bible version {}",
                    self.selection.bible_version_id
                );
                Ok(Vec::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn chapters_for_book(&self, book_id: BookId) -> Result<Vec<Chapter>> {
        match self.scripture.get_chapters(book_id).await {
            Ok(chapters) => Ok(chapters),
            Err(ScriptureError::NotFound { .. }) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::{AudioVersionId, TextVersionId};
    use crate::store::{AudioCoverageStore, TextCoverageStore};
    use async_trait::async_trait;
    use core_scripture::{BibleVersionId, Verse, VerseId};
    use std::collections::HashSet;

    struct NoopStore;

    #[async_trait]
    impl ScriptureStore for NoopStore {
        async fn get_books(&self, _: BibleVersionId) -> core_scripture::Result<Vec<Book>> {
            Ok(Vec::new())
        }

        async fn get_chapters(&self, _: BookId) -> core_scripture::Result<Vec<Chapter>> {
            Ok(Vec::new())
        }

        async fn get_verses(&self, _: ChapterId) -> core_scripture::Result<Vec<Verse>> {
            Ok(Vec::new())
        }
    }

    #[async_trait]
    impl AudioCoverageStore for NoopStore {
        async fn chapter_coverage(
            &self,
            _: AudioVersionId,
            _: ChapterId,
        ) -> Result<Vec<crate::coverage::AudioCoverage>> {
            Ok(Vec::new())
        }

        async fn chapters_with_any_coverage(
            &self,
            _: AudioVersionId,
            _: &[ChapterId],
        ) -> Result<HashSet<ChapterId>> {
            Ok(HashSet::new())
        }
    }

    #[async_trait]
    impl TextCoverageStore for NoopStore {
        async fn chapter_text_coverage(
            &self,
            _: TextVersionId,
            _: ChapterId,
        ) -> Result<HashSet<VerseId>> {
            Ok(HashSet::new())
        }

        async fn chapters_with_any_text(
            &self,
            _: TextVersionId,
            _: &[ChapterId],
        ) -> Result<HashSet<ChapterId>> {
            Ok(HashSet::new())
        }
    }

    #[tokio::test]
    async fn test_selection_and_source_must_match() {
        let scripture = Arc::new(NoopStore);
        let source = CoverageSource::audio(AudioVersionId::new(), Arc::new(NoopStore));
        let selection = Selection::text(BibleVersionId::new(), TextVersionId::new());

        let result = ProgressService::new(
            scripture,
            source,
            selection,
            ProgressConfig::default(),
        );
        assert!(matches!(result, Err(ProgressError::InvalidSelection(_))));
    }

    #[tokio::test]
    async fn test_audio_version_must_match_selection() {
        let scripture = Arc::new(NoopStore);
        let source = CoverageSource::audio(AudioVersionId::new(), Arc::new(NoopStore));
        // Same content type, different version id
        let selection = Selection::audio(BibleVersionId::new(), AudioVersionId::new());

        let result = ProgressService::new(
            scripture,
            source,
            selection,
            ProgressConfig::default(),
        );
        assert!(matches!(result, Err(ProgressError::InvalidSelection(_))));
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let scripture = Arc::new(NoopStore);
        let audio_version = AudioVersionId::new();
        let source = CoverageSource::audio(audio_version, Arc::new(NoopStore));
        let selection = Selection::audio(BibleVersionId::new(), audio_version);

        let config = ProgressConfig::new().with_max_concurrent_chapter_fetches(0);
        let result = ProgressService::new(scripture, source, selection, config);
        assert!(matches!(result, Err(ProgressError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_unknown_version_yields_empty_aggregates() {
        let audio_version = AudioVersionId::new();
        let service = ProgressService::new(
            Arc::new(NoopStore),
            CoverageSource::audio(audio_version, Arc::new(NoopStore)),
            Selection::audio(BibleVersionId::new(), audio_version),
            ProgressConfig::default(),
        )
        .unwrap();

        assert!(service.book_progress().await.unwrap().is_empty());

        let stats = service.progress_stats().await.unwrap();
        assert_eq!(stats.books_progress.total, 0);
        assert_eq!(stats.chapters_progress.total, 0);
    }
}
