//! Progress engine configuration

use std::time::Duration;

/// Configuration for detail loading.
#[derive(Debug, Clone)]
pub struct ProgressConfig {
    /// Number of concurrent per-chapter coverage fetches during a book's
    /// detail load (default: 8)
    pub max_concurrent_chapter_fetches: usize,

    /// Timeout for one chapter's coverage fetch (default: 30s). A chapter
    /// that times out degrades to not-started instead of failing the book.
    pub chapter_fetch_timeout: Duration,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            max_concurrent_chapter_fetches: 8,
            chapter_fetch_timeout: Duration::from_secs(30),
        }
    }
}

impl ProgressConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fan-out width for per-chapter fetches.
    pub fn with_max_concurrent_chapter_fetches(mut self, count: usize) -> Self {
        self.max_concurrent_chapter_fetches = count;
        self
    }

    /// Set the per-chapter fetch timeout.
    pub fn with_chapter_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.chapter_fetch_timeout = timeout;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_concurrent_chapter_fetches == 0 {
            return Err("max_concurrent_chapter_fetches must be at least 1".to_string());
        }

        if self.chapter_fetch_timeout.is_zero() {
            return Err("chapter_fetch_timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ProgressConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_concurrent_chapter_fetches, 8);
    }

    #[test]
    fn test_builder() {
        let config = ProgressConfig::new()
            .with_max_concurrent_chapter_fetches(2)
            .with_chapter_fetch_timeout(Duration::from_secs(5));

        assert_eq!(config.max_concurrent_chapter_fetches, 2);
        assert_eq!(config.chapter_fetch_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_validation_rejects_zeroes() {
        let config = ProgressConfig::new().with_max_concurrent_chapter_fetches(0);
        assert!(config.validate().is_err());

        let config = ProgressConfig::new().with_chapter_fetch_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
