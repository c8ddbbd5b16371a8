//! Range reconciliation
//!
//! Collapses a set of covered verse numbers into the minimal list of maximal
//! contiguous spans. Sort + dedup + one ascending scan; n is bounded by the
//! chapter's verse count, so no cleverness is warranted.

use serde::{Deserialize, Serialize};

/// Contiguous run of covered verse numbers, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseSpan {
    pub start: u32,
    pub end: u32,
}

impl VerseSpan {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of verses in the span
    pub fn verse_count(&self) -> u32 {
        self.end - self.start + 1
    }

    pub fn contains(&self, verse_number: u32) -> bool {
        (self.start..=self.end).contains(&verse_number)
    }
}

/// Result of reconciling one chapter's covered verse numbers
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Distinct covered verses
    pub covered_count: u32,
    /// Minimal list of maximal contiguous spans, ascending
    pub spans: Vec<VerseSpan>,
}

/// Reconcile covered verse numbers into spans.
///
/// Input may contain duplicates (overlapping coverage facts); reconciliation
/// is idempotent under repeated facts. Each returned span is maximal: the
/// verse before `start` and the verse after `end` are not covered.
pub fn reconcile(covered: impl IntoIterator<Item = u32>) -> Reconciliation {
    let mut numbers: Vec<u32> = covered.into_iter().collect();
    numbers.sort_unstable();
    numbers.dedup();

    let mut spans: Vec<VerseSpan> = Vec::new();

    for number in &numbers {
        match spans.last_mut() {
            Some(span) if span.end + 1 == *number => span.end = *number,
            _ => spans.push(VerseSpan::new(*number, *number)),
        }
    }

    Reconciliation {
        covered_count: numbers.len() as u32,
        spans,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        let rec = reconcile([]);
        assert_eq!(rec.covered_count, 0);
        assert!(rec.spans.is_empty());
    }

    #[test]
    fn test_single_verse() {
        let rec = reconcile([4]);
        assert_eq!(rec.covered_count, 1);
        assert_eq!(rec.spans, vec![VerseSpan::new(4, 4)]);
    }

    #[test]
    fn test_two_disjoint_spans() {
        let rec = reconcile([2, 3, 4, 7, 8]);
        assert_eq!(rec.covered_count, 5);
        assert_eq!(rec.spans, vec![VerseSpan::new(2, 4), VerseSpan::new(7, 8)]);
    }

    #[test]
    fn test_fully_covered_chapter() {
        let rec = reconcile([1, 2, 3, 4, 5]);
        assert_eq!(rec.covered_count, 5);
        assert_eq!(rec.spans, vec![VerseSpan::new(1, 5)]);
    }

    #[test]
    fn test_unsorted_input() {
        let rec = reconcile([8, 2, 7, 4, 3]);
        assert_eq!(rec.covered_count, 5);
        assert_eq!(rec.spans, vec![VerseSpan::new(2, 4), VerseSpan::new(7, 8)]);
    }

    #[test]
    fn test_duplicates_are_deduplicated() {
        let rec = reconcile([1, 2, 2, 3, 3, 3]);
        assert_eq!(rec.covered_count, 3);
        assert_eq!(rec.spans, vec![VerseSpan::new(1, 3)]);
    }

    #[test]
    fn test_idempotent() {
        let input = [2, 3, 4, 7, 8];
        let first = reconcile(input);
        let again = reconcile(input);
        assert_eq!(first, again);

        // Re-reconciling the expansion of the spans changes nothing
        let expanded = first.spans.iter().flat_map(|s| s.start..=s.end);
        assert_eq!(reconcile(expanded), first);
    }

    #[test]
    fn test_alternating_singletons() {
        let rec = reconcile([1, 3, 5, 7]);
        assert_eq!(rec.covered_count, 4);
        assert_eq!(
            rec.spans,
            vec![
                VerseSpan::new(1, 1),
                VerseSpan::new(3, 3),
                VerseSpan::new(5, 5),
                VerseSpan::new(7, 7),
            ]
        );
    }

    #[test]
    fn test_span_helpers() {
        let span = VerseSpan::new(3, 6);
        assert_eq!(span.verse_count(), 4);
        assert!(span.contains(3));
        assert!(span.contains(6));
        assert!(!span.contains(7));
    }
}
