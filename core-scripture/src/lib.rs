//! # Scripture Reference Data
//!
//! Owns the canonical Scripture hierarchy (bible version → book → chapter →
//! verse) and the query contract for loading it from the remote store.
//!
//! ## Overview
//!
//! This module manages:
//! - Typed identifiers for every level of the hierarchy
//! - `Book`, `Chapter`, and `Verse` reference models with validation
//! - The `ScriptureStore` trait implemented by the remote data store
//!
//! The hierarchy is immutable reference data: it is loaded once per bible
//! version and never mutated by consumers. `Chapter::total_verses` is the
//! authoritative denominator for all completion math downstream.

pub mod error;
pub mod models;
pub mod provider;

pub use error::{Result, ScriptureError};
pub use models::{BibleVersionId, Book, BookId, Chapter, ChapterId, Verse, VerseId};
pub use provider::ScriptureStore;
