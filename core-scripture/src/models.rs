//! Domain models for the Scripture hierarchy
//!
//! Reference data loaded from the remote store. Verse numbers within a
//! chapter are contiguous integers starting at 1; verse ids are opaque and
//! distinct from verse numbers.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// ID Types
// =============================================================================

/// Unique identifier for a bible version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BibleVersionId(pub Uuid);

impl BibleVersionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BibleVersionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BibleVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookId(pub Uuid);

impl BookId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChapterId(pub Uuid);

impl ChapterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for ChapterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChapterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a verse
///
/// Opaque identifier assigned by the store; never confuse with the
/// human-facing verse number inside a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseId(pub Uuid);

impl VerseId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for VerseId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Domain Models
// =============================================================================

/// Book of a bible version with its chapters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: BookId,
    /// Book name (e.g., "Genesis")
    pub name: String,
    /// Canonical position within the bible version
    pub order: i32,
    /// Chapters in canonical order
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Create a new book with no chapters yet
    pub fn new(name: String, order: i32) -> Self {
        Self {
            id: BookId::new(),
            name,
            order,
            chapters: Vec::new(),
        }
    }

    /// Validate book data
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Book name cannot be empty".to_string());
        }

        if self.order < 0 {
            return Err("Book order cannot be negative".to_string());
        }

        for chapter in &self.chapters {
            chapter.validate()?;
        }

        Ok(())
    }

    /// Look up a chapter by id
    pub fn chapter(&self, chapter_id: &ChapterId) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == *chapter_id)
    }
}

/// Chapter of a book
///
/// `total_verses` is authoritative: it is the denominator for all chapter
/// completion math, and the store guarantees it equals the number of rows
/// `ScriptureStore::get_verses` returns for this chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    /// Unique identifier
    pub id: ChapterId,
    /// Book this chapter belongs to
    pub book_id: BookId,
    /// Chapter number within the book, starting at 1
    pub chapter_number: u32,
    /// Number of verses defined for this chapter
    pub total_verses: u32,
}

impl Chapter {
    pub fn new(book_id: BookId, chapter_number: u32, total_verses: u32) -> Self {
        Self {
            id: ChapterId::new(),
            book_id,
            chapter_number,
            total_verses,
        }
    }

    /// Validate chapter data
    pub fn validate(&self) -> Result<(), String> {
        if self.chapter_number == 0 {
            return Err("Chapter number must be positive".to_string());
        }

        Ok(())
    }
}

/// Verse of a chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    /// Unique identifier
    pub id: VerseId,
    /// Chapter this verse belongs to
    pub chapter_id: ChapterId,
    /// Verse number within the chapter, starting at 1
    pub verse_number: u32,
}

impl Verse {
    pub fn new(chapter_id: ChapterId, verse_number: u32) -> Self {
        Self {
            id: VerseId::new(),
            chapter_id,
            verse_number,
        }
    }

    /// Validate verse data
    pub fn validate(&self) -> Result<(), String> {
        if self.verse_number == 0 {
            return Err("Verse number must be positive".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
