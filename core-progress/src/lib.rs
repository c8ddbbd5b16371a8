//! # Coverage Progress Aggregation Engine
//!
//! Computes completion status and percentages for a Bible translation
//! project: given the fixed Scripture hierarchy and the sparse coverage
//! facts recorded against it (audio recordings spanning verse ranges, or
//! per-verse text transcriptions), this crate rolls progress up to chapter,
//! book, and version granularity.
//!
//! ## Overview
//!
//! This module provides:
//! - Typed coverage facts and the coverage-store query contract
//! - Range reconciliation of covered verse numbers into contiguous spans
//! - Two-tier chapter progress: a fast binary approximation from one bulk
//!   query, and exact per-verse detail computed lazily per book
//! - Book-level and version-wide roll-ups with mutually consistent counts
//! - A per-book detail cache with in-flight load deduplication
//!
//! ## Usage
//!
//! ```ignore
//! use core_progress::{CoverageSource, ProgressConfig, ProgressService, Selection};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     scripture: Arc<dyn core_scripture::ScriptureStore>,
//! #     source: CoverageSource,
//! #     selection: Selection,
//! # ) -> core_progress::Result<()> {
//! let service = ProgressService::new(scripture, source, selection, ProgressConfig::default())?;
//!
//! // Fast-mode listing for every book of the version
//! let books = service.book_progress().await?;
//!
//! // Exact per-verse detail for one expanded book
//! if let Some(book) = books.first() {
//!     service.request_detailed_book_progress(book.book_id).await?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod book;
pub mod cache;
pub mod chapter;
pub mod config;
pub mod coverage;
pub mod error;
pub mod reconcile;
pub mod service;
pub mod stats;
pub mod store;

pub use book::BookProgress;
pub use cache::{ChapterDetailMap, DetailCache, DetailState};
pub use chapter::{ChapterProgress, ProgressStatus};
pub use config::ProgressConfig;
pub use coverage::{
    AudioCoverage, AudioVersionId, ContentVersionId, CoverageSource, Selection, TextVersionId,
};
pub use error::{ProgressError, Result};
pub use reconcile::{reconcile, Reconciliation, VerseSpan};
pub use service::ProgressService;
pub use stats::{CompletionCounts, ProgressStats};
pub use store::{AudioCoverageStore, TextCoverageStore};
