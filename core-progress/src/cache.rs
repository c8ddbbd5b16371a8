//! # Per-Book Detail Cache
//!
//! Lazy cache of verse-level chapter progress, keyed by book id. Listing a
//! bible version shows fast-mode numbers; expanding a book triggers a detail
//! load through this cache, which fans out one coverage fetch per chapter
//! with bounded concurrency.
//!
//! State machine per book id: `Absent → Loading → Loaded`. The `Loading`
//! state is the dedup mechanism: concurrent requests for the same book
//! attach to the one in-flight load instead of issuing a second fan-out.
//! Loads run on a detached task, so a caller that navigates away before the
//! load resolves does not cancel it; the result is cached either way.
//! Loaded entries are never invalidated within a session: coverage facts are
//! append-only for the lifetime of a selection, so a book expanded before
//! new uploads keeps its old detail until a new engine is built for the
//! selection.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tokio::sync::{watch, Mutex, Semaphore};
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use core_scripture::{BookId, Chapter, ChapterId, ScriptureStore};

use crate::chapter::ChapterProgress;
use crate::config::ProgressConfig;
use crate::coverage::{covered_verse_numbers, CoverageSource};
use crate::error::{ProgressError, Result};
use crate::reconcile::reconcile;

/// Detailed progress for every chapter of one book
pub type ChapterDetailMap = HashMap<ChapterId, ChapterProgress>;

/// Externally visible cache state for one book
///
/// Callers use this to distinguish "still loading" from "loaded with zero
/// progress", a spinner versus an empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailState {
    Absent,
    Loading,
    Loaded,
}

type LoadResult = Result<Arc<ChapterDetailMap>>;

enum BookDetailEntry {
    Loading(watch::Receiver<Option<LoadResult>>),
    Loaded(Arc<ChapterDetailMap>),
}

/// Lazy per-book cache of detailed chapter progress.
pub struct DetailCache {
    scripture: Arc<dyn ScriptureStore>,
    source: CoverageSource,
    config: ProgressConfig,
    fetch_semaphore: Arc<Semaphore>,
    entries: Arc<Mutex<HashMap<BookId, BookDetailEntry>>>,
}

impl DetailCache {
    pub fn new(
        scripture: Arc<dyn ScriptureStore>,
        source: CoverageSource,
        config: ProgressConfig,
    ) -> Self {
        let fetch_semaphore = Arc::new(Semaphore::new(config.max_concurrent_chapter_fetches));

        Self {
            scripture,
            source,
            config,
            fetch_semaphore,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Clone for the background load task (avoids `Arc<Self>` receivers)
    fn clone_for_task(&self) -> Self {
        Self {
            scripture: Arc::clone(&self.scripture),
            source: self.source.clone(),
            config: self.config.clone(),
            fetch_semaphore: Arc::clone(&self.fetch_semaphore),
            entries: Arc::clone(&self.entries),
        }
    }

    /// Current cache state for a book. Never blocks on a load.
    pub async fn state(&self, book_id: &BookId) -> DetailState {
        let entries = self.entries.lock().await;
        match entries.get(book_id) {
            None => DetailState::Absent,
            Some(BookDetailEntry::Loading(_)) => DetailState::Loading,
            Some(BookDetailEntry::Loaded(_)) => DetailState::Loaded,
        }
    }

    /// The loaded detail map for a book, if a load has completed.
    pub async fn loaded_book(&self, book_id: &BookId) -> Option<Arc<ChapterDetailMap>> {
        let entries = self.entries.lock().await;
        match entries.get(book_id) {
            Some(BookDetailEntry::Loaded(map)) => Some(map.clone()),
            _ => None,
        }
    }

    /// Ensure detailed progress for a book is loaded, loading it if needed.
    ///
    /// At most one fan-out runs per book id at any time; callers arriving
    /// while a load is in flight await that load and resolve with its
    /// outcome. Once loaded, this is a cheap map lookup for the rest of the
    /// session.
    #[instrument(skip(self))]
    pub async fn request_detail(&self, book_id: BookId) -> Result<Arc<ChapterDetailMap>> {
        let rx = {
            let mut entries = self.entries.lock().await;
            match entries.get(&book_id) {
                Some(BookDetailEntry::Loaded(map)) => return Ok(map.clone()),
                Some(BookDetailEntry::Loading(rx)) => {
                    debug!("Detail load already in flight for book {}", book_id);
                    rx.clone()
                }
                None => {
                    let (tx, rx) = watch::channel(None);
                    entries.insert(book_id, BookDetailEntry::Loading(rx.clone()));
                    self.spawn_load(book_id, tx);
                    rx
                }
            }
        };

        Self::await_load(book_id, rx).await
    }

    /// Run the load on a detached task so it survives the caller.
    ///
    /// The task updates the entry table before publishing the outcome, so a
    /// woken waiter always observes the final state.
    fn spawn_load(&self, book_id: BookId, done: watch::Sender<Option<LoadResult>>) {
        let cache = self.clone_for_task();

        tokio::spawn(async move {
            let result = cache.load_book_detail(book_id).await;

            let outcome = {
                let mut entries = cache.entries.lock().await;
                match result {
                    Ok(map) => {
                        let map = Arc::new(map);
                        entries.insert(book_id, BookDetailEntry::Loaded(map.clone()));
                        Ok(map)
                    }
                    Err(e) => {
                        // Back to absent so a later request can retry
                        warn!("Detail load for book {} failed: {}", book_id, e);
                        entries.remove(&book_id);
                        Err(e)
                    }
                }
            };

            let _ = done.send(Some(outcome));
        });
    }

    /// Wait for an in-flight load and resolve with its outcome.
    async fn await_load(
        book_id: BookId,
        mut rx: watch::Receiver<Option<LoadResult>>,
    ) -> Result<Arc<ChapterDetailMap>> {
        loop {
            if let Some(outcome) = rx.borrow_and_update().clone() {
                return outcome;
            }

            if rx.changed().await.is_err() {
                // Sender dropped without publishing; only happens when the
                // runtime is tearing down
                return Err(ProgressError::DetailLoadFailed {
                    book_id: book_id.to_string(),
                });
            }
        }
    }

    /// Fetch and compute detailed progress for every chapter of a book.
    async fn load_book_detail(&self, book_id: BookId) -> Result<ChapterDetailMap> {
        info!("Loading detailed progress for book {}", book_id);

        let chapters = match self.scripture.get_chapters(book_id).await {
            Ok(chapters) => chapters,
            Err(core_scripture::ScriptureError::NotFound { .. }) => {
                // Absence of structure is absence of progress
                debug!("No chapters found for book {}", book_id);
                Vec::new()
            }
            Err(e) => {
                warn!("Failed to list chapters for book {}: {}", book_id, e);
                return Err(e.into());
            }
        };

        let fetches = chapters
            .iter()
            .map(|chapter| self.load_chapter_detail(chapter));
        let results = join_all(fetches).await;

        let mut map = ChapterDetailMap::with_capacity(chapters.len());
        for result in results {
            let (chapter_id, progress) = result?;
            map.insert(chapter_id, progress);
        }

        debug!(
            "Detail for book {} loaded ({} chapters)",
            book_id,
            map.len()
        );
        Ok(map)
    }

    /// One chapter's detail fetch, throttled and bounded by the timeout.
    ///
    /// Fetch failures and timeouts degrade the chapter to not-started so one
    /// bad chapter cannot block the rest of the book. Invariant violations in
    /// the returned facts are not degraded; they abort the book load.
    async fn load_chapter_detail(&self, chapter: &Chapter) -> Result<(ChapterId, ChapterProgress)> {
        let _permit = match self.fetch_semaphore.acquire().await {
            Ok(permit) => permit,
            Err(_) => {
                warn!("Fetch semaphore closed; degrading chapter {}", chapter.id);
                return Ok((
                    chapter.id,
                    ChapterProgress::fetch_failed(chapter, self.source.has_spans()),
                ));
            }
        };

        match timeout(
            self.config.chapter_fetch_timeout,
            self.fetch_chapter_detail(chapter),
        )
        .await
        {
            Ok(Ok(progress)) => Ok((chapter.id, progress)),
            Ok(Err(e @ ProgressError::InvalidCoverageFact(_))) => Err(e),
            Ok(Err(e)) => Ok((chapter.id, self.degrade_chapter(chapter, e.to_string()))),
            Err(_) => Ok((chapter.id, self.degrade_chapter(chapter, "timed out".to_string()))),
        }
    }

    /// Record a chapter's fetch failure and hand back the fallback.
    fn degrade_chapter(&self, chapter: &Chapter, reason: String) -> ChapterProgress {
        let err = ProgressError::CoverageFetchFailed {
            chapter_id: chapter.id.to_string(),
            reason,
        };
        warn!("{}", err);

        ChapterProgress::fetch_failed(chapter, self.source.has_spans())
    }

    /// Compute one chapter's exact progress from its coverage facts.
    async fn fetch_chapter_detail(&self, chapter: &Chapter) -> Result<ChapterProgress> {
        match &self.source {
            CoverageSource::Audio {
                audio_version_id,
                store,
            } => {
                let facts = store.chapter_coverage(*audio_version_id, chapter.id).await?;
                let covered = covered_verse_numbers(&facts, chapter.total_verses)?;
                Ok(ChapterProgress::detailed_audio(chapter, reconcile(covered)))
            }
            CoverageSource::Text {
                text_version_id,
                store,
            } => {
                let covered_ids = store
                    .chapter_text_coverage(*text_version_id, chapter.id)
                    .await?;
                let verses = self.scripture.get_verses(chapter.id).await?;
                let covered = verses
                    .iter()
                    .filter(|verse| covered_ids.contains(&verse.id))
                    .count() as u32;
                Ok(ChapterProgress::detailed_text(chapter, covered))
            }
        }
    }
}
